// Log Stream Viewer TUI - Popup Widgets

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Helper function to center a rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn render_confirm_popup(f: &mut Frame, message: &str) {
    let popup_area = centered_rect(50, 30, f.area());

    let block = Block::default()
        .title(" Confirm ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow).bold())
        .style(Style::default().bg(Color::Black));

    let lines = vec![
        Line::from(""),
        Line::from(message.to_owned()),
        Line::from(""),
        Line::from("Press 'Y' to confirm, 'N' or Esc to cancel."),
    ];

    let para = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, popup_area);
    f.render_widget(para, popup_area);
}

pub fn render_alert_popup(f: &mut Frame, message: &str) {
    let popup_area = centered_rect(50, 25, f.area());

    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red).bold())
        .style(Style::default().bg(Color::Black));

    let lines = vec![
        Line::from(""),
        Line::from(message.to_owned()),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to dismiss.",
            Style::default().fg(Color::Gray).italic(),
        )),
    ];

    let para = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, popup_area);
    f.render_widget(para, popup_area);
}

/// The run form: one text field for the script name
pub fn render_script_input_popup(f: &mut Frame, input: &str) {
    let area = centered_rect(50, 20, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" Run Script ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("Script name: "),
            Span::styled(input.to_owned(), Style::default().fg(Color::Yellow)),
            Span::styled("█", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter to run, Esc to cancel",
            Style::default().fg(Color::Gray).italic(),
        )),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn render_help_popup(f: &mut Frame) {
    let area = centered_rect(60, 70, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title("Help & Controls")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let help_paragraph = Paragraph::new(get_help())
        .block(block)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Left);

    f.render_widget(help_paragraph, area);
}

pub fn get_help() -> Vec<Line<'static>> {
    vec![
        Line::from(vec![Span::styled(
            "Log Stream Viewer Controls",
            Style::default().fg(Color::Yellow).bold(),
        )]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "═══ ACTIONS ═══",
            Style::default().fg(Color::Cyan).bold(),
        )]),
        Line::from("c                  Clear all server logs (asks first)"),
        Line::from("r                  Run a script and follow its output"),
        Line::from("y / n              Answer a confirmation"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "═══ SCROLLING ═══",
            Style::default().fg(Color::Green).bold(),
        )]),
        Line::from("↑/↓ or j/k         Scroll one line"),
        Line::from("PgUp/PgDn          Scroll one page"),
        Line::from("Home/End or g/G    Jump to top / bottom"),
        Line::from("f                  Pause / resume following new lines"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "═══ GLOBAL CONTROLS ═══",
            Style::default().fg(Color::White).bold(),
        )]),
        Line::from("?                  Show/hide this help popup"),
        Line::from("q or Esc           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press '?' or Esc to close this help",
            Style::default().fg(Color::Green).italic(),
        )]),
    ]
}
