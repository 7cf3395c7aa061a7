use std::sync::Arc;

use async_trait::async_trait;
use lsv_client::{ClearOutcome, LogStreamViewer, Prompt, RunOutcome};
use lsv_core::{SessionKind, ViewerEvent, err, info, pt};
use owo_colors::OwoColorize;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    sync::mpsc::UnboundedReceiver,
};

use crate::tui::AppResult;

/// A [`Prompt`] on the plain terminal.
///
/// Confirmations read a `y/N` answer from stdin unless
/// `assume_yes` is set; alerts are printed as errors.
pub struct TerminalPrompt {
    pub assume_yes: bool,
}

#[async_trait]
impl Prompt for TerminalPrompt {
    async fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            pt!("{message} (yes)");
            return true;
        }

        let mut stdout = tokio::io::stdout();
        let question = format!("{} {} ", message.bold(), "[y/N]".bright_black());
        if stdout.write_all(question.as_bytes()).await.is_err() || stdout.flush().await.is_err()
        {
            return false;
        }
        let mut answer = String::new();
        if BufReader::new(tokio::io::stdin())
            .read_line(&mut answer)
            .await
            .is_err()
        {
            return false;
        }
        is_yes(&answer)
    }

    async fn alert(&self, message: &str) {
        err!("{message}");
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Prints what the viewer renders, until `stop` says so.
async fn print_events(
    events: &mut UnboundedReceiver<ViewerEvent>,
    mut stop: impl FnMut(&ViewerEvent) -> bool,
) {
    while let Some(event) = events.recv().await {
        match &event {
            ViewerEvent::Append(line) | ViewerEvent::Replace(line) => {
                println!("{}", line.print_colored());
            }
            ViewerEvent::SessionOpened(_) | ViewerEvent::SessionEnded { .. } => {}
        }
        if stop(&event) {
            break;
        }
    }
}

/// Follows the page log stream on stdout until it ends.
pub async fn tail(
    viewer: Arc<LogStreamViewer>,
    mut events: UnboundedReceiver<ViewerEvent>,
) -> AppResult<()> {
    viewer.attach();
    print_events(&mut events, |event| {
        matches!(
            event,
            ViewerEvent::SessionEnded {
                kind: SessionKind::Page,
                ..
            }
        )
    })
    .await;
    Ok(())
}

pub async fn clear(
    viewer: Arc<LogStreamViewer>,
    mut events: UnboundedReceiver<ViewerEvent>,
    prompt: TerminalPrompt,
) -> AppResult<()> {
    let outcome = viewer.clear_logs(&prompt).await;
    while let Ok(ViewerEvent::Replace(line) | ViewerEvent::Append(line)) = events.try_recv() {
        println!("{}", line.print_colored());
    }
    match outcome {
        ClearOutcome::Declined => {
            pt!("Cancelled");
            Ok(())
        }
        ClearOutcome::Cleared => {
            info!("Logs cleared");
            Ok(())
        }
        ClearOutcome::Rejected(status) => {
            Err(format!("server refused to clear logs ({status})").into())
        }
        ClearOutcome::Failed => Err("couldn't reach the server to clear logs".into()),
    }
}

/// Runs a script and prints its run stream until the window closes.
pub async fn run(
    viewer: Arc<LogStreamViewer>,
    mut events: UnboundedReceiver<ViewerEvent>,
    prompt: TerminalPrompt,
    script: &str,
) -> AppResult<()> {
    match viewer.submit_run_form(script, &prompt).await {
        RunOutcome::Declined => {
            pt!("Cancelled");
            Ok(())
        }
        RunOutcome::Failed(error) => {
            while let Ok(ViewerEvent::Append(line)) = events.try_recv() {
                println!("{}", line.print_colored());
            }
            Err(error.into())
        }
        RunOutcome::Started(handle) => {
            if !handle.status().is_success() {
                pt!("Server answered {}", handle.status());
            }
            print_events(&mut events, |event| {
                matches!(
                    event,
                    ViewerEvent::SessionEnded {
                        kind: SessionKind::ScriptRun,
                        ..
                    }
                )
            })
            .await;
            let reason = handle.wait().await;
            info!("Stopped following {script}: {reason}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        for answer in ["y\n", "Y\n", "yes\r\n", " YES "] {
            assert!(is_yes(answer), "{answer:?}");
        }
        for answer in ["", "\n", "n\n", "no", "yep", "sure"] {
            assert!(!is_yes(answer), "{answer:?}");
        }
    }

    #[tokio::test]
    async fn assume_yes_skips_stdin() {
        lsv_core::print::set_print(false);
        lsv_core::print::set_file_logging(false);
        let prompt = TerminalPrompt { assume_yes: true };
        assert!(prompt.confirm("Clear?").await);
    }
}
