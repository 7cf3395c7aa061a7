// Clear and run actions: spawned, answered through the prompt popups

use lsv_client::RunOutcome;

use crate::tui::{AppEvent, app::App};

impl App {
    /// Starts the clear action. The confirmation shows up as a popup.
    pub fn start_clear(&mut self) {
        let viewer = self.viewer.clone();
        let prompt = self.prompt.clone();
        let sender = self.app_sender.clone();
        tokio::spawn(async move {
            let outcome = viewer.clear_logs(&prompt).await;
            _ = sender.send(AppEvent::ClearFinished(outcome));
        });
    }

    pub fn open_script_input(&mut self) {
        self.script_input = Some(String::new());
        self.status_message = "Type a script name, Enter to run, Esc to cancel.".to_owned();
    }

    pub fn close_script_input(&mut self) {
        self.script_input = None;
        self.status_message = "Cancelled.".to_owned();
    }

    pub fn push_script_char(&mut self, c: char) {
        if let Some(input) = &mut self.script_input {
            input.push(c);
        }
    }

    pub fn pop_script_char(&mut self) {
        if let Some(input) = &mut self.script_input {
            input.pop();
        }
    }

    /// Submits the typed script name, asking for confirmation
    /// before anything is sent.
    pub fn submit_script_input(&mut self) {
        let Some(script) = self.script_input.take() else {
            return;
        };
        if script.is_empty() {
            self.script_input = Some(script);
            self.status_message = "Enter a script name first.".to_owned();
            return;
        }

        let viewer = self.viewer.clone();
        let prompt = self.prompt.clone();
        let sender = self.app_sender.clone();
        tokio::spawn(async move {
            match viewer.submit_run_form(&script, &prompt).await {
                RunOutcome::Declined => {}
                RunOutcome::Failed(error) => {
                    _ = sender.send(AppEvent::ScriptFailed { script, error });
                }
                RunOutcome::Started(handle) => {
                    _ = sender.send(AppEvent::ScriptStarted {
                        script: script.clone(),
                        status: handle.status(),
                    });
                    let reason = handle.wait().await;
                    _ = sender.send(AppEvent::ScriptEnded { script, reason });
                }
            }
        });
    }
}
