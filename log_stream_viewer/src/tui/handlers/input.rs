// Log Stream Viewer TUI - Input Event Handler

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::tui::{App, PromptRequest};

/// Handle keyboard input events.
/// Returns `true` when the app should quit.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    // Raw mode swallows the signal, so handle it here
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    // Popups take every key while they're up
    if app.has_pending_prompt() {
        handle_prompt_input(app, key.code);
        return false;
    }
    if app.show_help_popup {
        handle_help_popup_input(app, key.code);
        return false;
    }
    if app.script_input.is_some() {
        handle_script_input(app, key.code);
        return false;
    }

    let page = app.logs_visible_lines.max(1);
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('c') => app.start_clear(),
        KeyCode::Char('r') => app.open_script_input(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_logs_up(1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_logs_down(1),
        KeyCode::PageUp => app.scroll_logs_up(page),
        KeyCode::PageDown => app.scroll_logs_down(page),
        KeyCode::Home | KeyCode::Char('g') => app.scroll_logs_top(),
        KeyCode::End | KeyCode::Char('G') => app.scroll_logs_bottom(),
        KeyCode::Char('f') => app.toggle_follow(),
        KeyCode::Char('?') => app.toggle_help_popup(),
        _ => {}
    }
    false
}

fn handle_prompt_input(app: &mut App, code: KeyCode) {
    match app.pending_prompts.front() {
        Some(PromptRequest::Confirm { .. }) => match code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => app.answer_confirm(true),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => app.answer_confirm(false),
            _ => {}
        },
        Some(PromptRequest::Alert { .. }) => app.dismiss_alert(),
        None => {}
    }
}

fn handle_help_popup_input(app: &mut App, code: KeyCode) {
    if matches!(code, KeyCode::Char('q' | '?') | KeyCode::Esc) {
        app.toggle_help_popup();
    }
}

fn handle_script_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Enter => app.submit_script_input(),
        KeyCode::Esc => app.close_script_input(),
        KeyCode::Backspace => app.pop_script_char(),
        KeyCode::Char(c) => app.push_script_char(c),
        _ => {}
    }
}
