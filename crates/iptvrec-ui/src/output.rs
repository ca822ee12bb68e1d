use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use iptvrec_core::logging::LogLevel;
use iptvrec_core::transcript::{LineKind, Transcript, TranscriptLine};

fn level_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Error => Color::Red,
        LogLevel::Warn => Color::Yellow,
        LogLevel::Info => Color::Green,
        LogLevel::Debug => Color::Cyan,
        LogLevel::Trace => Color::DarkGray,
    }
}

fn to_line(line: &TranscriptLine) -> Line<'_> {
    match line.kind {
        LineKind::Output => Line::raw(line.text.as_str()),
        LineKind::Log(level) => Line::from(vec![
            Span::styled(
                format!("{:5} ", level),
                Style::default()
                    .fg(level_color(level))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("[{}] ", line.target),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw(line.text.as_str()),
        ]),
    }
}

/// Hard-wrap a line into rows of at most `width` columns, keeping span styles.
fn wrap_rows(line: Line<'_>, width: usize) -> Vec<Line<'static>> {
    let mut rows = Vec::new();
    let mut row: Vec<Span<'static>> = Vec::new();
    let mut used = 0;
    for span in line.spans {
        let mut chunk = String::new();
        for c in span.content.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width && used > 0 {
                if !chunk.is_empty() {
                    row.push(Span::styled(std::mem::take(&mut chunk), span.style));
                }
                rows.push(Line::from(std::mem::take(&mut row)));
                used = 0;
            }
            chunk.push(c);
            used += w;
        }
        if !chunk.is_empty() {
            row.push(Span::styled(chunk, span.style));
        }
    }
    rows.push(Line::from(row));
    rows
}

/// Render the output pane: action output in plain text, mirrored log records
/// colour-coded by level.
///
/// Rows are filled from the bottom up after wrapping, so the newest line is
/// always on screen (fully, unless it alone is taller than the pane, in which
/// case its tail is shown). Scrolling moves the bottom edge back by whole
/// transcript lines.
pub fn render_output(f: &mut Frame, area: Rect, transcript: &Transcript, status: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" OUTPUT | {} ", status),
            Style::default().fg(Color::White),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = inner.width as usize;
    let visible = inner.height as usize;
    if width == 0 || visible == 0 {
        return;
    }

    let lines = transcript.lines();
    let end = lines.len().saturating_sub(transcript.scroll_offset());

    let mut blocks: Vec<Vec<Line<'static>>> = Vec::new();
    let mut filled = 0;
    for line in lines.range(..end).rev() {
        if filled >= visible {
            break;
        }
        let rows = wrap_rows(to_line(line), width);
        filled += rows.len();
        blocks.push(rows);
    }

    let rows: Vec<Line<'static>> = blocks.into_iter().rev().flatten().collect();
    let skip = rows.len().saturating_sub(visible);
    let text: Vec<Line<'static>> = rows.into_iter().skip(skip).collect();

    f.render_widget(Paragraph::new(text), inner);
}
