//! # Client side of the log stream viewer
//!
//! Talks to a log server exposing three endpoints:
//! - `GET /stream_logs`: a `text/event-stream` of log lines
//! - `GET /clear_logs`: clears the server's log
//! - `POST /run_script`: runs a named script (form field `script_name`)
//!
//! [`LogStreamViewer`] ties it together, rendering through the
//! [`lsv_core::ViewSender`] it was given.

pub mod backend;
mod session;
pub mod sse;
mod viewer;

pub use backend::{BodyDrain, HttpBackend, LogBackend, RunResponse};
pub use reqwest::StatusCode;
pub use session::{CONNECTION_LOST, StreamSession};
pub use sse::{EventStream, SseDecoder, SseEvent};
pub use viewer::{
    CLEAR_CONFIRMATION, CLEAR_FAILED, CLEAR_REJECTED, ClearOutcome, LogStreamViewer, Prompt,
    RunOutcome, SCRIPT_RUN_WINDOW, ScriptRunHandle, ViewerOptions,
};
