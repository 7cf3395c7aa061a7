// Log Stream Viewer TUI Module

use std::{io, sync::Arc, time::Duration};

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use lsv_client::{ClearOutcome, LogStreamViewer, StatusCode};
use lsv_core::{RequestError, SessionEnd, ViewerEvent, print};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use tokio::sync::mpsc::{self, UnboundedReceiver};

mod app;
mod handlers;
mod prompt;
mod ui;
mod widgets;

pub use app::{App, AppResult};
pub use prompt::{PromptRequest, TuiPrompt};

// How often the screen is redrawn while no key is pressed.
const TICK: Duration = Duration::from_millis(100);

/// Things finishing in the background that the UI should know about.
#[derive(Debug)]
pub enum AppEvent {
    Prompt(PromptRequest),
    ClearFinished(ClearOutcome),
    ScriptStarted {
        script: String,
        status: StatusCode,
    },
    ScriptFailed {
        script: String,
        error: RequestError,
    },
    ScriptEnded {
        script: String,
        reason: SessionEnd,
    },
}

/// Entry point for the TUI mode.
///
/// Must be called from within a tokio runtime context
/// (the sessions and actions are spawned on it).
pub fn run_tui(
    viewer: Arc<LogStreamViewer>,
    view_events: UnboundedReceiver<ViewerEvent>,
    server: &str,
) -> AppResult<()> {
    // Anything printed would corrupt the screen
    print::set_print(false);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (app_sender, app_events) = mpsc::unbounded_channel();
    let app = App::new(viewer.clone(), app_sender, server.to_owned());
    viewer.attach();
    let res = run_app(&mut terminal, app, view_events, app_events);
    viewer.close();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    print::set_print(true);

    res
}

/// Main event loop for the TUI
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut view_events: UnboundedReceiver<ViewerEvent>,
    mut app_events: UnboundedReceiver<AppEvent>,
) -> AppResult<()> {
    loop {
        while let Ok(event) = view_events.try_recv() {
            app.handle_viewer_event(event);
        }
        while let Ok(event) = app_events.try_recv() {
            app.handle_app_event(event);
        }

        terminal.draw(|f| ui::render(f, &mut app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if handlers::input::handle_key_event(&mut app, key) {
                    app.quit();
                }
            }
        }

        if app.should_quit() {
            break;
        }
    }
    Ok(())
}
