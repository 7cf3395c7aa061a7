use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use async_trait::async_trait;
use futures::StreamExt;
use lsv_core::{
    LogLine, RequestError, SessionEnd, SessionKind, Severity, ViewSender, ViewerEvent, err, info,
    pt,
};
use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;

use crate::{
    backend::{BodyDrain, LogBackend},
    session::StreamSession,
};

/// How long the stream opened after a script run stays open.
pub const SCRIPT_RUN_WINDOW: Duration = Duration::from_secs(30);

pub const CLEAR_CONFIRMATION: &str =
    "Are you sure you want to clear all logs? This action cannot be undone.";
pub const CLEAR_REJECTED: &str = "Failed to clear logs. Please try again.";
pub const CLEAR_FAILED: &str = "Error clearing logs. Please try again.";

/// Asks the user things. Both methods may take as long as the
/// user needs; the calling operation waits for them.
#[async_trait]
pub trait Prompt: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;
    async fn alert(&self, message: &str);
}

#[derive(Debug, Clone)]
pub struct ViewerOptions {
    pub script_run_window: Duration,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            script_run_window: SCRIPT_RUN_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The user said no, nothing was sent.
    Declined,
    Cleared,
    /// The server answered with a non-success status.
    Rejected(StatusCode),
    /// The request never got an answer.
    Failed,
}

#[derive(Debug)]
pub enum RunOutcome {
    Declined,
    Started(ScriptRunHandle),
    Failed(RequestError),
}

/// The stream session opened after a run request was answered.
#[derive(Debug)]
pub struct ScriptRunHandle {
    status: StatusCode,
    session: StreamSession,
}

impl ScriptRunHandle {
    /// What the server answered the run request with.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn close(&self) {
        self.session.close();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.session.is_finished()
    }

    pub async fn wait(self) -> SessionEnd {
        self.session.wait().await
    }
}

/// Streams server logs into a view and runs the clear/run actions.
///
/// Nothing here touches the view directly: every change is sent
/// as a [`ViewerEvent`] to the [`ViewSender`] given at construction.
pub struct LogStreamViewer {
    backend: Arc<dyn LogBackend>,
    view: ViewSender,
    options: ViewerOptions,
    page: Mutex<Option<StreamSession>>,
    // Parent of every session's closer, cancelled by `close`.
    shutdown: CancellationToken,
}

impl LogStreamViewer {
    #[must_use]
    pub fn new(backend: Arc<dyn LogBackend>, view: ViewSender, options: ViewerOptions) -> Self {
        Self {
            backend,
            view,
            options,
            page: Mutex::new(None),
            shutdown: CancellationToken::new(),
        }
    }

    /// Opens the page-level log stream.
    ///
    /// There is only ever one per viewer: returns `false` (and does
    /// nothing) if it was already opened, even if it has since died.
    /// Must be called from within a tokio runtime.
    pub fn attach(&self) -> bool {
        let mut page = self.page.lock().unwrap_or_else(PoisonError::into_inner);
        if page.is_some() {
            return false;
        }
        info!("Attaching to log stream");
        *page = Some(StreamSession::open(
            SessionKind::Page,
            self.backend.clone(),
            None,
            self.view.clone(),
            self.shutdown.child_token(),
        ));
        true
    }

    /// Whether the page session was opened and is still running.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.page
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|n| !n.is_finished())
    }

    /// Clears the server logs after asking the user.
    ///
    /// On success the whole view is replaced by a single placeholder
    /// line. On failure the user is alerted and the view is untouched.
    pub async fn clear_logs(&self, prompt: &dyn Prompt) -> ClearOutcome {
        if !prompt.confirm(CLEAR_CONFIRMATION).await {
            return ClearOutcome::Declined;
        }
        match self.backend.clear_logs().await {
            Ok(status) if status.is_success() => {
                info!("Cleared server logs");
                _ = self.view.send(ViewerEvent::Replace(LogLine::placeholder()));
                ClearOutcome::Cleared
            }
            Ok(status) => {
                err!("Couldn't clear logs: server answered {status}");
                prompt.alert(CLEAR_REJECTED).await;
                ClearOutcome::Rejected(status)
            }
            Err(error) => {
                err!("Error clearing logs: {error}");
                prompt.alert(CLEAR_FAILED).await;
                ClearOutcome::Failed
            }
        }
    }

    /// Confirms with the user, then [`Self::run_script`].
    pub async fn submit_run_form(&self, script_name: &str, prompt: &dyn Prompt) -> RunOutcome {
        if !prompt
            .confirm(&format!("Run script \"{script_name}\"?"))
            .await
        {
            return RunOutcome::Declined;
        }
        match self.run_script(script_name).await {
            Ok(handle) => RunOutcome::Started(handle),
            Err(error) => RunOutcome::Failed(error),
        }
    }

    /// Asks the server to run a script, then follows the log stream
    /// for [`ViewerOptions::script_run_window`].
    ///
    /// An "executing" line is shown right away. The stream is opened
    /// whatever status the server answers with; only a failed request
    /// skips it (and shows an error line instead). The run response
    /// body keeps being read after the run session ends.
    ///
    /// # Errors
    /// The run request itself failed.
    pub async fn run_script(&self, script_name: &str) -> Result<ScriptRunHandle, RequestError> {
        _ = self.view.send(ViewerEvent::Append(LogLine::synthetic(
            Severity::Warning,
            "EXECUTING",
            format!("Running script: {script_name}"),
        )));
        info!("Running script: {script_name}");

        let response = match self.backend.run_script(script_name).await {
            Ok(response) => response,
            Err(error) => {
                err!("Error running script: {error}");
                _ = self.view.send(ViewerEvent::Append(LogLine::synthetic(
                    Severity::Error,
                    "ERROR",
                    format!("Failed to run script: {error}"),
                )));
                return Err(error);
            }
        };

        let status = response.status;
        if !status.is_success() {
            pt!("Run request for {script_name} answered {status}, following the stream anyway");
        }
        // The request outlives the run session: its body is read
        // to the end, only viewer shutdown stops it early.
        if let Some(body) = response.into_body() {
            tokio::spawn(drain(body, self.shutdown.clone()));
        }
        let session = StreamSession::open(
            SessionKind::ScriptRun,
            self.backend.clone(),
            Some(self.options.script_run_window),
            self.view.clone(),
            self.shutdown.child_token(),
        );
        Ok(ScriptRunHandle { status, session })
    }

    /// Closes every open session, page and script runs alike.
    pub fn close(&self) {
        self.shutdown.cancel();
    }
}

async fn drain(mut body: BodyDrain, until: CancellationToken) {
    loop {
        tokio::select! {
            () = until.cancelled() => break,
            chunk = body.next() => if chunk.is_none() {
                break;
            },
        }
    }
}
