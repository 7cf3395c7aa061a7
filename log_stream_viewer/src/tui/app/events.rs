// Centralized handlers for events coming from background tasks

use lsv_client::ClearOutcome;
use lsv_core::{SessionEnd, SessionKind, ViewerEvent};

use crate::tui::{
    AppEvent,
    app::{App, StreamStatus},
};

impl App {
    /// Applies a view change sent by the viewer's sessions or actions.
    pub fn handle_viewer_event(&mut self, event: ViewerEvent) {
        match &event {
            ViewerEvent::Append(line) => self.keep_scroll_position(line),
            ViewerEvent::SessionOpened(SessionKind::Page) => {
                self.stream_status = StreamStatus::Live;
                self.status_message = format!("Streaming logs from {}", self.server);
            }
            ViewerEvent::SessionEnded {
                kind: SessionKind::Page,
                reason,
            } => {
                self.stream_status = match reason {
                    SessionEnd::Closed => StreamStatus::Closed,
                    _ => StreamStatus::Lost,
                };
                self.status_message = format!("Log stream {reason}. Restart to reconnect.");
            }
            ViewerEvent::Replace(_)
            | ViewerEvent::SessionOpened(SessionKind::ScriptRun)
            | ViewerEvent::SessionEnded {
                kind: SessionKind::ScriptRun,
                ..
            } => {}
        }
        self.view.apply(event);
        if self.view.generation() != self.view_generation {
            self.reset_log_rows();
        }
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Prompt(request) => self.pending_prompts.push_back(request),
            AppEvent::ClearFinished(outcome) => {
                self.status_message = match outcome {
                    ClearOutcome::Declined => "Cancelled.".to_owned(),
                    ClearOutcome::Cleared => "Logs cleared".to_owned(),
                    ClearOutcome::Rejected(status) => {
                        format!("Couldn't clear logs (server answered {status})")
                    }
                    ClearOutcome::Failed => "Couldn't reach the server to clear logs".to_owned(),
                };
            }
            AppEvent::ScriptStarted { script, status } => {
                self.running_scripts += 1;
                self.status_message = if status.is_success() {
                    format!("Running {script}, following its output")
                } else {
                    format!("Run request for {script} answered {status}, following output anyway")
                };
            }
            AppEvent::ScriptFailed { script, error } => {
                self.status_message = format!("Failed to run {script}: {error}");
            }
            AppEvent::ScriptEnded { script, reason } => {
                self.running_scripts = self.running_scripts.saturating_sub(1);
                self.status_message = format!("Stopped following {script}: {reason}");
            }
        }
    }
}
