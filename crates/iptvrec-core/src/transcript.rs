use std::collections::VecDeque;

use crate::logging::{LogEntry, LogLevel};

/// Origin of a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Written by a form action (Record, Clear).
    Output,
    /// Mirrored from the tracing console layer.
    Log(LogLevel),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    pub kind: LineKind,
    pub target: String,
    pub text: String,
}

/// Action output lines kept for the stdout replay on exit.
pub const OUTPUT_HISTORY_LIMIT: usize = 10_000;

/// The console stream shown in the output pane.
///
/// Display lines live in a bounded ring. Action output is additionally kept
/// in a larger ring of [`OUTPUT_HISTORY_LIMIT`] lines so it can be replayed to
/// stdout once the alternate screen is gone; past that the oldest lines drop.
pub struct Transcript {
    lines: VecDeque<TranscriptLine>,
    output: VecDeque<String>,
    output_limit: usize,
    scroll_offset: usize,
    max_lines: usize,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl Transcript {
    pub fn new(max_lines: usize) -> Self {
        Self::with_output_limit(max_lines, OUTPUT_HISTORY_LIMIT)
    }

    pub fn with_output_limit(max_lines: usize, output_limit: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(max_lines),
            output: VecDeque::new(),
            output_limit,
            scroll_offset: 0,
            max_lines,
        }
    }

    /// Append a line of action output.
    pub fn println(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.output.len() >= self.output_limit {
            self.output.pop_front();
        }
        self.output.push_back(text.clone());
        self.push(TranscriptLine {
            kind: LineKind::Output,
            target: "output".into(),
            text,
        });
    }

    pub fn push_log(&mut self, entry: LogEntry) {
        self.push(TranscriptLine {
            kind: LineKind::Log(entry.level),
            target: entry.target,
            text: entry.message,
        });
    }

    fn push(&mut self, line: TranscriptLine) {
        if self.lines.len() >= self.max_lines {
            self.lines.pop_front();
            // Adjust scroll offset if we're scrolled up
            if self.scroll_offset > 0 {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
            }
        }
        self.lines.push_back(line);
    }

    pub fn lines(&self) -> &VecDeque<TranscriptLine> {
        &self.lines
    }

    /// Retained action output lines, oldest first.
    pub fn output(&self) -> &VecDeque<String> {
        &self.output
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn scroll_up(&mut self, amount: usize) {
        let max_offset = self.lines.len().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + amount).min(max_offset);
    }

    pub fn scroll_down(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }
}
