// Log Stream Viewer TUI - Application State

use std::{collections::VecDeque, error::Error, fmt, sync::Arc};

use lsv_client::LogStreamViewer;
use lsv_core::View;
use tokio::sync::mpsc::UnboundedSender;

use crate::tui::{AppEvent, PromptRequest, TuiPrompt};

pub type AppResult<T> = Result<T, Box<dyn Error>>;

/// State of the page-level log stream, shown in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamStatus {
    Connecting,
    Live,
    Lost,
    Closed,
}

impl fmt::Display for StreamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StreamStatus::Connecting => "Connecting",
            StreamStatus::Live => "Live",
            StreamStatus::Lost => "Disconnected",
            StreamStatus::Closed => "Closed",
        };
        write!(f, "{name}")
    }
}

pub struct App {
    pub viewer: Arc<LogStreamViewer>,
    pub prompt: TuiPrompt,
    pub app_sender: UnboundedSender<AppEvent>,
    pub server: String,

    pub view: View,
    pub stream_status: StreamStatus,
    pub running_scripts: usize,

    pub status_message: String,
    pub should_quit: bool,
    pub show_help_popup: bool,
    // Some while the user is typing a script name
    pub script_input: Option<String>,
    // Questions from background actions, the front one is on screen
    pub pending_prompts: VecDeque<PromptRequest>,

    // Logs view state
    pub log_rows: usize,           // rows the whole view takes, kept in step with `view`
    pub view_generation: u64,      // last `View::generation` seen
    pub logs_offset: usize,        // number of rows scrolled up from the bottom (0 = bottom)
    pub logs_visible_lines: usize, // rows that fit in viewport (updated by renderer)
    pub logs_auto_follow: bool,    // stick to the bottom as lines arrive
}

impl App {
    pub fn new(
        viewer: Arc<LogStreamViewer>,
        app_sender: UnboundedSender<AppEvent>,
        server: String,
    ) -> Self {
        Self {
            viewer,
            prompt: TuiPrompt::new(app_sender.clone()),
            app_sender,
            status_message: format!(
                "Connecting to {server}... Press '?' for help, 'q' to quit."
            ),
            server,
            view: View::new(),
            stream_status: StreamStatus::Connecting,
            running_scripts: 0,
            should_quit: false,
            show_help_popup: false,
            script_input: None,
            pending_prompts: VecDeque::new(),
            log_rows: 0,
            view_generation: 0,
            logs_offset: 0,
            logs_visible_lines: 20,
            logs_auto_follow: true,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn toggle_help_popup(&mut self) {
        self.show_help_popup = !self.show_help_popup;
    }

    pub fn has_pending_prompt(&self) -> bool {
        !self.pending_prompts.is_empty()
    }

    /// Answers the confirmation on screen, if that's what's on screen.
    pub fn answer_confirm(&mut self, yes: bool) {
        if !matches!(
            self.pending_prompts.front(),
            Some(PromptRequest::Confirm { .. })
        ) {
            return;
        }
        if let Some(PromptRequest::Confirm { reply, .. }) = self.pending_prompts.pop_front() {
            if !yes {
                self.status_message = "Cancelled.".to_owned();
            }
            _ = reply.send(yes);
        }
    }

    /// Dismisses the alert on screen, if that's what's on screen.
    pub fn dismiss_alert(&mut self) {
        if !matches!(self.pending_prompts.front(), Some(PromptRequest::Alert { .. })) {
            return;
        }
        if let Some(PromptRequest::Alert { dismissed, .. }) = self.pending_prompts.pop_front() {
            _ = dismissed.send(());
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use lsv_client::{HttpBackend, ViewerOptions};
    use tokio::sync::{
        mpsc::{self, UnboundedReceiver},
        oneshot,
    };

    use super::*;

    /// An app pointed at a server nobody listens on.
    /// Nothing connects until an action is spawned.
    pub(crate) fn test_app() -> (App, UnboundedReceiver<AppEvent>) {
        lsv_core::print::set_print(false);
        lsv_core::print::set_file_logging(false);
        let backend = HttpBackend::new("http://127.0.0.1:9").unwrap();
        let (view_tx, _view_rx) = mpsc::unbounded_channel();
        let viewer = LogStreamViewer::new(Arc::new(backend), view_tx, ViewerOptions::default());
        let (tx, rx) = mpsc::unbounded_channel();
        let app = App::new(Arc::new(viewer), tx, "http://127.0.0.1:9".to_owned());
        (app, rx)
    }

    #[test]
    fn confirmation_is_answered_once() {
        let (mut app, _rx) = test_app();
        let (reply, mut answer) = oneshot::channel();
        app.pending_prompts.push_back(PromptRequest::Confirm {
            message: "Sure?".to_owned(),
            reply,
        });

        app.dismiss_alert();
        assert!(app.has_pending_prompt());

        app.answer_confirm(false);
        assert!(!app.has_pending_prompt());
        assert_eq!(answer.try_recv(), Ok(false));
        assert_eq!(app.status_message, "Cancelled.");
    }

    #[test]
    fn alerts_queue_behind_each_other() {
        let (mut app, _rx) = test_app();
        let (first, mut first_rx) = oneshot::channel();
        let (second, mut second_rx) = oneshot::channel();
        for (message, dismissed) in [("one", first), ("two", second)] {
            app.pending_prompts.push_back(PromptRequest::Alert {
                message: message.to_owned(),
                dismissed,
            });
        }

        app.answer_confirm(true);
        app.dismiss_alert();
        assert_eq!(first_rx.try_recv(), Ok(()));
        assert!(second_rx.try_recv().is_err());
        assert!(app.has_pending_prompt());
        app.dismiss_alert();
        assert_eq!(second_rx.try_recv(), Ok(()));
    }
}
