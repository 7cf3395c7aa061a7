// Log Stream Viewer TUI - Rendering

use lsv_core::{LogLine, Severity};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::{
    PromptRequest,
    app::{App, line_rows},
    widgets::{
        render_alert_popup, render_confirm_popup, render_footer, render_header,
        render_help_popup, render_script_input_popup,
    },
};

pub fn render(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Logs
            Constraint::Length(3), // Footer with status
        ])
        .split(f.area());

    render_header(f, chunks[0], app);
    render_logs(f, chunks[1], app);
    render_footer(f, chunks[2], app);

    if let Some(input) = &app.script_input {
        render_script_input_popup(f, input);
    }
    if app.show_help_popup {
        render_help_popup(f);
    }
    match app.pending_prompts.front() {
        Some(PromptRequest::Confirm { message, .. }) => render_confirm_popup(f, message),
        Some(PromptRequest::Alert { message, .. }) => render_alert_popup(f, message),
        None => {}
    }
}

fn render_logs(f: &mut Frame, area: Rect, app: &mut App) {
    app.logs_visible_lines = usize::from(area.height.saturating_sub(2));
    let (start, end) = app.visible_log_rows();

    // Walk back from the newest line, so a view following the
    // bottom only touches what is on screen.
    let mut rows = Vec::with_capacity(end - start);
    let mut row_end = app.total_log_rows();
    for line in app.view.lines().iter().rev() {
        if row_end <= start {
            break;
        }
        let row_start = row_end - line_rows(line);
        if row_start < end {
            let parts: Vec<&str> = line.text.split('\n').collect();
            for (i, part) in parts.into_iter().enumerate().rev() {
                if (start..end).contains(&(row_start + i)) {
                    rows.push(render_row(line, part, i == 0));
                }
            }
        }
        row_end = row_start;
    }
    rows.reverse();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Logs ({} lines) ", app.view.len()));
    let paragraph = if rows.is_empty() {
        Paragraph::new("Waiting for log output...").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(rows)
    };
    f.render_widget(paragraph.block(block), area);
}

/// One screen row of a line. Text always goes in as plain spans,
/// so nothing the server sends is interpreted.
fn render_row<'a>(line: &'a LogLine, part: &'a str, first: bool) -> Line<'a> {
    let text_style = match line.severity {
        Some(Severity::Error) => Style::default().fg(Color::Red),
        Some(Severity::Warning) => Style::default().fg(Color::Yellow),
        Some(Severity::Info) => Style::default().fg(Color::Green),
        None => Style::default(),
    };
    let part = part.strip_suffix('\r').unwrap_or(part);

    let mut spans = Vec::new();
    if first {
        if let Some(timestamp) = &line.timestamp {
            spans.push(Span::styled(
                format!("[{timestamp}] "),
                Style::default().fg(Color::Cyan),
            ));
        }
        if let Some(tag) = line.tag {
            spans.push(Span::styled(format!("[{tag}] "), text_style.bold()));
        }
    } else {
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(part, text_style));
    Line::from(spans)
}
