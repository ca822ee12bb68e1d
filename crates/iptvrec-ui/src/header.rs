use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct HeaderView<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub clock_label: &'a str,
    pub clock_running: bool,
}

/// Draw the header bar: window title on the left, clock label packed at the
/// end, and a rule underneath.
pub fn render_header(f: &mut Frame, area: Rect, view: HeaderView<'_>) {
    let block = Block::default().borders(Borders::BOTTOM);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let clock_width = (view.clock_label.chars().count() as u16).saturating_add(2);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(clock_width)])
        .split(inner);

    let title = Line::from(vec![
        Span::styled(view.title, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!(" | {}", view.subtitle), Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(title), cols[0]);

    let clock_style = if view.clock_running {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    f.render_widget(
        Paragraph::new(Line::styled(view.clock_label, clock_style)).alignment(Alignment::Right),
        cols[1],
    );
}
