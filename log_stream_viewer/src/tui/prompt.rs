// Log Stream Viewer TUI - Prompt bridge
//
// Actions run on background tasks but their questions
// have to be answered from the UI loop.

use async_trait::async_trait;
use lsv_client::Prompt;
use tokio::sync::{mpsc::UnboundedSender, oneshot};

use crate::tui::AppEvent;

#[derive(Debug)]
pub enum PromptRequest {
    Confirm {
        message: String,
        reply: oneshot::Sender<bool>,
    },
    Alert {
        message: String,
        dismissed: oneshot::Sender<()>,
    },
}

/// A [`Prompt`] answered by popups in the terminal UI.
///
/// If the UI goes away before answering, confirmations
/// count as declined.
#[derive(Debug, Clone)]
pub struct TuiPrompt {
    sender: UnboundedSender<AppEvent>,
}

impl TuiPrompt {
    pub fn new(sender: UnboundedSender<AppEvent>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl Prompt for TuiPrompt {
    async fn confirm(&self, message: &str) -> bool {
        let (reply, answer) = oneshot::channel();
        let request = PromptRequest::Confirm {
            message: message.to_owned(),
            reply,
        };
        if self.sender.send(AppEvent::Prompt(request)).is_err() {
            return false;
        }
        answer.await.unwrap_or(false)
    }

    async fn alert(&self, message: &str) {
        let (dismissed, wait) = oneshot::channel();
        let request = PromptRequest::Alert {
            message: message.to_owned(),
            dismissed,
        };
        if self.sender.send(AppEvent::Prompt(request)).is_ok() {
            _ = wait.await;
        }
    }
}
