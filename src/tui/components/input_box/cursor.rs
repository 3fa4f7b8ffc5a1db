//! Cursor position and internal scroll for the InputBox.
//!
//! The text itself is owned by `InputBox`; every method takes it as `buffer`.

use ratatui::layout::Rect;

use super::text_wrap::{
    CONTENT_OFFSET, MAX_VISIBLE_LINES, inner_width, wrap_line_count, wrap_lines, wrap_options,
};

pub(super) struct CursorState {
    /// Byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible wrapped line (0 when content fits)
    pub scroll_offset: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Wrapped line and column of the cursor, relative to the content area.
    pub fn line_and_column(&self, buffer: &str, content_width: u16) -> (u16, u16) {
        let width = inner_width(content_width);
        if width == 0 {
            return (0, 0);
        }

        let before = &buffer[..self.pos];
        let line = wrap_lines(before, width).len().saturating_sub(1) as u16;

        // textwrap trims trailing spaces, so count characters on the logical
        // line instead of measuring the last wrapped segment.
        let logical_start = before.rfind('\n').map_or(0, |i| i + 1);
        let logical = &before[logical_start..];
        let segments = textwrap::wrap(logical, wrap_options(width));
        let consumed: usize = segments
            .iter()
            .take(segments.len().saturating_sub(1))
            .map(|seg| seg.chars().count())
            .sum();
        let column = logical.chars().count().saturating_sub(consumed) as u16;

        (line, column.min(width))
    }

    /// Keeps the cursor line inside the visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, content_width: u16) {
        let total = wrap_line_count(buffer, inner_width(content_width));
        if total <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let (line, _) = self.line_and_column(buffer, content_width);
        if line < self.scroll_offset {
            self.scroll_offset = line;
        } else if line >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = line + 1 - MAX_VISIBLE_LINES;
        }
    }

    /// Terminal cell for the cursor inside `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let (line, column) = self.line_and_column(buffer, area.width);
        let row = line.saturating_sub(self.scroll_offset);
        (area.x + CONTENT_OFFSET + column, area.y + 1 + row)
    }
}
