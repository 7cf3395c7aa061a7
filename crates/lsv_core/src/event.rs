use std::fmt::Display;

use tokio::sync::mpsc::UnboundedSender;

use crate::LogLine;

/// The handle every session and action renders through.
///
/// Whoever holds the receiving end owns the [`crate::View`]
/// and applies events one at a time, in the order received.
pub type ViewSender = UnboundedSender<ViewerEvent>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKind {
    /// The long-lived subscription opened when the viewer attaches.
    Page,
    /// The subscription opened after a script run, closed at a deadline.
    ScriptRun,
}

impl Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionKind::Page => write!(f, "log stream"),
            SessionKind::ScriptRun => write!(f, "script run stream"),
        }
    }
}

/// Why a session stopped. Every session ends exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    Deadline,
    Closed,
    TransportError(String),
    /// The server closed the response body.
    StreamEnded,
}

impl Display for SessionEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionEnd::Deadline => write!(f, "time window elapsed"),
            SessionEnd::Closed => write!(f, "closed"),
            SessionEnd::TransportError(err) => write!(f, "connection lost: {err}"),
            SessionEnd::StreamEnded => write!(f, "server closed the stream"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEvent {
    Append(LogLine),
    /// Replaces the whole view with this one line.
    Replace(LogLine),
    SessionOpened(SessionKind),
    SessionEnded {
        kind: SessionKind,
        reason: SessionEnd,
    },
}
