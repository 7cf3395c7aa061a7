// Log Stream Viewer TUI - Footer Widget

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::tui::app::App;

/// Render the footer with status and help
pub fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(24),
            Constraint::Length(34),
        ])
        .split(area);

    // Status message
    let status = Paragraph::new(app.status_message.clone())
        .block(Block::default().borders(Borders::ALL).title(" Status "))
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });
    f.render_widget(status, chunks[0]);

    let (follow_text, follow_color) = if app.logs_auto_follow {
        ("Following", Color::Green)
    } else {
        ("Paused", Color::Yellow)
    };
    let follow = Paragraph::new(follow_text)
        .block(Block::default().borders(Borders::ALL).title(" Scroll "))
        .style(Style::default().fg(follow_color))
        .alignment(Alignment::Center);
    f.render_widget(follow, chunks[1]);

    // Help/keybinds
    let help = Paragraph::new("'c' clear | 'r' run | '?' help")
        .block(Block::default().borders(Borders::ALL).title(" Keys "))
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[2]);
}
