use std::fmt::Display;

use owo_colors::OwoColorize;

/// How client-side timestamps are rendered (local wall clock).
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

const PLACEHOLDER_TEXT: &str = "Logs cleared successfully. Waiting for new output...";

/// Only lines made up by the viewer itself have a severity.
/// Lines pushed by the server never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// One line of the view.
///
/// The text is always kept as plain text. Whatever markup the
/// server sends is shown as-is, never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// Local time the line was received, for page session lines.
    pub timestamp: Option<String>,
    /// Short label like `ERROR` or `EXECUTING`, shown in brackets.
    pub tag: Option<&'static str>,
    pub text: String,
    pub severity: Option<Severity>,
}

impl LogLine {
    /// A line received on the page session: timestamp + payload.
    #[must_use]
    pub fn stamped(text: impl Into<String>) -> Self {
        Self {
            timestamp: Some(chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()),
            tag: None,
            text: text.into(),
            severity: None,
        }
    }

    /// A line received on a script run session, shown verbatim.
    #[must_use]
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            timestamp: None,
            tag: None,
            text: text.into(),
            severity: None,
        }
    }

    /// A status or error line made up by the viewer.
    #[must_use]
    pub fn synthetic(severity: Severity, tag: &'static str, text: impl Into<String>) -> Self {
        Self {
            timestamp: None,
            tag: Some(tag),
            text: text.into(),
            severity: Some(severity),
        }
    }

    /// The single line left behind after the logs are cleared.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            timestamp: None,
            tag: None,
            text: PLACEHOLDER_TEXT.to_owned(),
            severity: Some(Severity::Info),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Some(Severity::Error)
    }

    /// Formats the line for a terminal, coloured by severity.
    #[must_use]
    pub fn print_colored(&self) -> String {
        let mut out = String::new();
        if let Some(timestamp) = &self.timestamp {
            out.push_str(&format!("[{timestamp}] ").cyan().to_string());
        }
        let body = match self.tag {
            Some(tag) => format!("[{tag}] {}", self.text),
            None => self.text.clone(),
        };
        out.push_str(&match self.severity {
            Some(Severity::Error) => body.red().to_string(),
            Some(Severity::Warning) => body.yellow().to_string(),
            Some(Severity::Info) | None => body,
        });
        out
    }
}

impl Display for LogLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(timestamp) = &self.timestamp {
            write!(f, "[{timestamp}] ")?;
        }
        if let Some(tag) = self.tag {
            write!(f, "[{tag}] ")?;
        }
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamped_line_has_timestamp_and_no_severity() {
        let line = LogLine::stamped("job 4 done");
        let timestamp = line.timestamp.clone().unwrap();
        assert_eq!(timestamp.len(), "12:34:56".len());
        assert_eq!(line.severity, None);
        assert_eq!(line.to_string(), format!("[{timestamp}] job 4 done"));
    }

    #[test]
    fn raw_line_is_verbatim() {
        let line = LogLine::raw("<b>not bold</b>");
        assert_eq!(line.to_string(), "<b>not bold</b>");
        assert_eq!(line.timestamp, None);
        assert_eq!(line.severity, None);
    }

    #[test]
    fn synthetic_line_shows_tag() {
        let line = LogLine::synthetic(Severity::Error, "ERROR", "boom");
        assert!(line.is_error());
        assert_eq!(line.to_string(), "[ERROR] boom");
        assert!(line.print_colored().contains("[ERROR] boom"));
    }

    #[test]
    fn placeholder_text() {
        assert_eq!(
            LogLine::placeholder().to_string(),
            "Logs cleared successfully. Waiting for new output..."
        );
    }
}
