// Log Stream Viewer TUI - Header Widget

use lsv_core::VIEWER_VERSION_NAME;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::app::{App, StreamStatus};

/// Render the header with the server and stream state
pub fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let status_color = match app.stream_status {
        StreamStatus::Connecting => Color::Yellow,
        StreamStatus::Live => Color::Green,
        StreamStatus::Lost => Color::Red,
        StreamStatus::Closed => Color::Gray,
    };

    let mut spans = vec![
        Span::raw(" Server: "),
        Span::styled(app.server.clone(), Style::default().fg(Color::Cyan)),
        Span::raw("  │  Stream: "),
        Span::styled(
            format!("● {}", app.stream_status),
            Style::default().fg(status_color).bold(),
        ),
    ];
    if app.running_scripts > 0 {
        spans.push(Span::raw("  │  "));
        spans.push(Span::styled(
            format!("{} script run(s) followed", app.running_scripts),
            Style::default().fg(Color::Yellow),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(format!(" Log Stream Viewer {VIEWER_VERSION_NAME} ")).centered()),
    );
    f.render_widget(header.alignment(Alignment::Left), area);
}
