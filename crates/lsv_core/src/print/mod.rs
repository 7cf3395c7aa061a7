//! Diagnostic logging for the viewer itself.
//!
//! This is *not* where the streamed server logs go (those end up in a
//! [`crate::View`]). Messages printed with [`crate::info!`],
//! [`crate::err!`] and [`crate::pt!`] are:
//! - printed to the terminal (unless disabled with [`set_print`],
//!   e.g. while the TUI owns the screen)
//! - appended to `logs/<date>.log` in [`crate::VIEWER_DIR`],
//!   unless disabled with [`set_file_logging`] or the `no_log` form
//!   of a macro was used

use std::{
    fmt::Display,
    fs::File,
    io::{BufWriter, Write},
    sync::{
        LazyLock, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use crate::{IntoIoError, IoError, VIEWER_DIR};

mod macros;

static PRINT: AtomicBool = AtomicBool::new(true);
static FILE_LOGGING: AtomicBool = AtomicBool::new(true);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogType {
    Info,
    Error,
    Point,
}

impl Display for LogType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                LogType::Info => "[info]",
                LogType::Error => "[error]",
                LogType::Point => "-",
            }
        )
    }
}

pub struct LoggingState {
    // Opened on first use, so that disabling file logging
    // early means no file is ever created.
    file: Option<BufWriter<File>>,
    tried_opening: bool,
}

impl LoggingState {
    fn write_to_file(&mut self, msg: &str, t: LogType) {
        if !self.tried_opening {
            self.tried_opening = true;
            match open_log_file() {
                Ok(file) => self.file = Some(BufWriter::new(file)),
                Err(error) => {
                    if is_print() {
                        eprintln!("[error] couldn't open log file: {error}");
                    }
                }
            }
        }
        if let Some(file) = &mut self.file {
            let timestamp = chrono::Local::now().format("%H:%M:%S");
            // A failing log file shouldn't take the viewer down with it.
            _ = writeln!(file, "[{timestamp}] {t} {msg}");
            _ = file.flush();
        }
    }
}

fn open_log_file() -> Result<File, IoError> {
    let logs_dir = VIEWER_DIR.join("logs");
    std::fs::create_dir_all(&logs_dir).path(&logs_dir)?;
    let path = logs_dir.join(format!("{}.log", chrono::Local::now().format("%Y-%m-%d")));
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .path(path)
}

pub static LOGGER: LazyLock<Mutex<LoggingState>> = LazyLock::new(|| {
    Mutex::new(LoggingState {
        file: None,
        tried_opening: false,
    })
});

#[must_use]
pub fn is_print() -> bool {
    PRINT.load(Ordering::Relaxed)
}

/// Enables or disables printing log messages to the terminal.
pub fn set_print(print: bool) {
    PRINT.store(print, Ordering::Relaxed);
}

/// Enables or disables writing log messages to the log file.
pub fn set_file_logging(enabled: bool) {
    FILE_LOGGING.store(enabled, Ordering::Relaxed);
}

#[must_use]
pub fn is_file_logging() -> bool {
    FILE_LOGGING.load(Ordering::Relaxed)
}

pub fn print_to_file(msg: &str, t: LogType) {
    if !is_file_logging() {
        return;
    }
    if let Ok(mut logger) = LOGGER.lock() {
        logger.write_to_file(msg, t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_file_logging_never_opens_a_file() {
        set_print(false);
        set_file_logging(false);
        crate::info!("first {}", 1);
        crate::err!(no_log, "second");
        crate::pt!("third");

        let logger = LOGGER.lock().unwrap();
        assert!(!logger.tried_opening);
        assert!(logger.file.is_none());
    }

    #[test]
    fn log_type_tags() {
        assert_eq!(LogType::Info.to_string(), "[info]");
        assert_eq!(LogType::Error.to_string(), "[error]");
        assert_eq!(LogType::Point.to_string(), "-");
    }
}
