use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use iptvrec_core::form::TextField;

fn frame_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Draw a bordered entry.
///
/// An empty field shows its placeholder dimmed. A masked field shows one mask
/// glyph per character. The terminal cursor is placed only when `focused`.
pub fn render_field(f: &mut Frame, area: Rect, field: &TextField, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if focused { BorderType::Thick } else { BorderType::Rounded })
        .border_style(frame_style(focused));
    let inner = block.inner(area);

    let line = if field.is_empty() {
        Line::styled(
            field.placeholder().to_string(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )
    } else {
        Line::raw(field.display_text())
    };

    // Keep the cursor in view for values wider than the entry.
    let cursor_col = field.display_prefix().width() as u16;
    let scroll = cursor_col.saturating_sub(inner.width.saturating_sub(1));

    f.render_widget(Paragraph::new(line).scroll((0, scroll)).block(block), area);

    if focused && inner.width > 0 && inner.height > 0 {
        f.set_cursor_position((inner.x + cursor_col - scroll, inner.y));
    }
}

/// Draw a push button, highlighted when focused.
pub fn render_button(f: &mut Frame, area: Rect, label: &str, focused: bool) {
    let text_style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(frame_style(focused));

    f.render_widget(
        Paragraph::new(Line::styled(label.to_string(), text_style))
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}
