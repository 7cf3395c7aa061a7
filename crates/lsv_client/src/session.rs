use std::{sync::Arc, time::Duration};

use futures::StreamExt;
use lsv_core::{
    LogLine, SessionEnd, SessionKind, Severity, ViewSender, ViewerEvent, err, pt,
};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::backend::LogBackend;

pub const CONNECTION_LOST: &str =
    "Connection to log stream lost. Refresh page to reconnect.";

/// One live subscription to the log stream.
///
/// Stops at the first of: the deadline passing, [`StreamSession::close`],
/// a transport error, or the server ending the stream. Dropping the
/// handle does *not* stop the session.
#[derive(Debug)]
pub struct StreamSession {
    closer: CancellationToken,
    handle: JoinHandle<SessionEnd>,
}

impl StreamSession {
    /// Spawns the session on the current tokio runtime.
    ///
    /// `closer` is cancelled by the session itself once it finishes.
    pub fn open(
        kind: SessionKind,
        backend: Arc<dyn LogBackend>,
        deadline: Option<Duration>,
        view: ViewSender,
        closer: CancellationToken,
    ) -> Self {
        let handle = tokio::spawn(run(kind, backend, deadline, view, closer.clone()));
        Self { closer, handle }
    }

    pub fn close(&self) {
        self.closer.cancel();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the session to end.
    pub async fn wait(self) -> SessionEnd {
        match self.handle.await {
            Ok(reason) => reason,
            Err(err) if err.is_cancelled() => SessionEnd::Closed,
            Err(err) => SessionEnd::TransportError(format!("session task failed: {err}")),
        }
    }
}

async fn run(
    kind: SessionKind,
    backend: Arc<dyn LogBackend>,
    deadline: Option<Duration>,
    view: ViewSender,
    closer: CancellationToken,
) -> SessionEnd {
    let deadline = async move {
        match deadline {
            Some(deadline) => tokio::time::sleep(deadline).await,
            None => std::future::pending().await,
        }
    };

    let reason = tokio::select! {
        () = closer.cancelled() => SessionEnd::Closed,
        () = deadline => SessionEnd::Deadline,
        reason = forward(kind, backend.as_ref(), &view) => reason,
    };
    closer.cancel();

    match &reason {
        SessionEnd::TransportError(error) => err!("{kind} ended: {error}"),
        reason => pt!("{kind} ended: {reason}"),
    }
    // Only the page session reports a broken connection in the view.
    if kind == SessionKind::Page
        && matches!(
            reason,
            SessionEnd::TransportError(_) | SessionEnd::StreamEnded
        )
    {
        _ = view.send(ViewerEvent::Append(LogLine::synthetic(
            Severity::Error,
            "ERROR",
            CONNECTION_LOST,
        )));
    }
    _ = view.send(ViewerEvent::SessionEnded {
        kind,
        reason: reason.clone(),
    });
    reason
}

async fn forward(kind: SessionKind, backend: &dyn LogBackend, view: &ViewSender) -> SessionEnd {
    let mut stream = match backend.open_stream().await {
        Ok(stream) => stream,
        Err(error) => return SessionEnd::TransportError(error.to_string()),
    };
    pt!("{kind} opened");
    if view.send(ViewerEvent::SessionOpened(kind)).is_err() {
        return SessionEnd::Closed;
    }

    while let Some(event) = stream.next().await {
        let event = match event {
            Ok(event) => event,
            Err(error) => return SessionEnd::TransportError(error.to_string()),
        };
        if !event.is_message() || event.data.is_empty() {
            continue;
        }
        let line = match kind {
            SessionKind::Page => LogLine::stamped(event.data),
            SessionKind::ScriptRun => LogLine::raw(event.data),
        };
        if view.send(ViewerEvent::Append(line)).is_err() {
            // Nobody is looking anymore.
            return SessionEnd::Closed;
        }
    }
    SessionEnd::StreamEnded
}
