//! # Core types of the log stream viewer
//!
//! **Not recommended to use this in your own projects!**
//!
//! Shared between the client library (`lsv_client`) and the
//! `log_stream_viewer` binary:
//! - [`LogLine`] and [`View`]: what ends up on screen
//! - [`ViewerEvent`]: what sessions send to whoever owns the [`View`]
//! - Error types with path/json context ([`IoError`], [`JsonError`],
//!   [`RequestError`])
//! - Logging macros ([`info!`], [`err!`], [`pt!`])

use std::{path::PathBuf, sync::LazyLock};

pub mod error;
mod event;
mod line;
pub mod print;
mod view;

pub use error::{
    IntoIoError, IntoJsonError, IoError, JsonError, JsonFileError, RequestError,
};
pub use event::{SessionEnd, SessionKind, ViewSender, ViewerEvent};
pub use line::{LogLine, Severity, TIMESTAMP_FORMAT};
pub use view::View;

// Used by the logging macros, so that users of this crate
// don't need `owo-colors` themselves.
#[doc(hidden)]
pub use owo_colors;

pub const VIEWER_VERSION_NAME: &str = env!("CARGO_PKG_VERSION");

/// The directory holding `config.json` and the `logs/` folder.
///
/// - Linux: `~/.config/LogStreamViewer`
/// - macOS: `~/Library/Application Support/LogStreamViewer`
/// - Windows: `%APPDATA%\LogStreamViewer`
///
/// Falls back to `./LogStreamViewer` if the platform has
/// no config directory. Can be overridden with the
/// `LSV_DIR` environment variable.
pub static VIEWER_DIR: LazyLock<PathBuf> = LazyLock::new(|| {
    if let Some(dir) = std::env::var_os("LSV_DIR") {
        return PathBuf::from(dir);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("LogStreamViewer")
});
