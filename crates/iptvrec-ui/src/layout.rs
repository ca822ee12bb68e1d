use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Height of a bordered single-line entry or button.
pub const ROW_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy)]
pub struct WindowRects {
    pub header: Rect,
    pub username: Rect,
    pub password: Rect,
    pub url: Rect,
    pub record: Rect,
    pub clear: Rect,
    pub output: Rect,
    pub exit: Rect,
}

/// Split the window into the form column.
///
/// Top to bottom: header bar, three entries, Record, Clear, the output pane
/// taking whatever height is left, and Exit pinned to the bottom edge. The
/// column is inset by `margin` cells on every side.
pub fn window_layout(area: Rect, margin: u16) -> WindowRects {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header bar + rule
            Constraint::Min(0),    // form body
        ])
        .split(area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(margin)
        .constraints([
            Constraint::Length(ROW_HEIGHT), // username
            Constraint::Length(ROW_HEIGHT), // password
            Constraint::Length(ROW_HEIGHT), // url
            Constraint::Length(ROW_HEIGHT), // record
            Constraint::Length(ROW_HEIGHT), // clear
            Constraint::Min(0),             // output
            Constraint::Length(ROW_HEIGHT), // exit
        ])
        .split(outer[1]);

    WindowRects {
        header: outer[0],
        username: chunks[0],
        password: chunks[1],
        url: chunks[2],
        record: chunks[3],
        clear: chunks[4],
        output: chunks[5],
        exit: chunks[6],
    }
}
