//! Cursor position and navigation for the InputBox.
//!
//! `CursorState` owns the cursor byte offset, the internal scroll offset and
//! the width seen at the last render. The text itself stays in `InputBox` and
//! is passed in explicitly.

use super::text_wrap::{
    CONTENT_OFFSET_X, CONTENT_OFFSET_Y, MAX_VISIBLE_LINES, inner_width, line_ranges,
    next_char_boundary, next_word_boundary, prev_char_boundary, prev_word_boundary,
    wrap_line_count,
};
use ratatui::layout::Rect;

pub(super) struct CursorState {
    /// Byte offset into the buffer (0..=buffer.len()), always on a char boundary
    pub pos: usize,
    /// First visible wrapped line (0 when content fits in the viewport)
    pub scroll_offset: u16,
    /// Area width from the last render, used for vertical movement
    pub last_content_width: u16,
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_content_width: Self::DEFAULT_WIDTH,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Wrapped line and column (in chars) of the cursor.
    pub fn locate(&self, buffer: &str, content_width: u16) -> (u16, u16) {
        let ranges = line_ranges(buffer, inner_width(content_width));
        let idx = ranges
            .iter()
            .rposition(|r| r.start <= self.pos)
            .unwrap_or(0);
        let start = ranges[idx].start.min(self.pos);
        let tail = &buffer[start..self.pos];

        // A newline textwrap never turned into a line of its own
        match tail.rfind('\n') {
            Some(nl) => (idx as u16 + 1, tail[nl + 1..].chars().count() as u16),
            None => (idx as u16, tail.chars().count() as u16),
        }
    }

    /// Move one wrapped line up (`-1`) or down (`1`), keeping the column where possible.
    ///
    /// Returns `false` at the first or last line so the caller can hand the key
    /// to something else.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16, content_width: u16) -> bool {
        if buffer.is_empty() {
            return false;
        }

        let ranges = line_ranges(buffer, inner_width(content_width));
        let (line, column) = self.locate(buffer, content_width);
        let line = line as usize;

        let target = if direction < 0 {
            match line.checked_sub(1) {
                Some(t) => t.min(ranges.len() - 1),
                None => return false,
            }
        } else {
            if line + 1 >= ranges.len() {
                return false;
            }
            line + 1
        };

        let range = ranges[target].clone();
        self.pos = buffer[range.clone()]
            .char_indices()
            .nth(column as usize)
            .map_or(range.end, |(i, _)| range.start + i);
        true
    }

    pub fn left(&mut self, buffer: &str) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos = prev_char_boundary(buffer, self.pos);
        true
    }

    pub fn right(&mut self, buffer: &str) -> bool {
        if self.pos >= buffer.len() {
            return false;
        }
        self.pos = next_char_boundary(buffer, self.pos);
        true
    }

    pub fn word_left(&mut self, buffer: &str) -> bool {
        self.jump_to(prev_word_boundary(buffer, self.pos))
    }

    pub fn word_right(&mut self, buffer: &str) -> bool {
        self.jump_to(next_word_boundary(buffer, self.pos))
    }

    /// Start of the current logical line.
    pub fn home(&mut self, buffer: &str) -> bool {
        let start = buffer[..self.pos].rfind('\n').map_or(0, |i| i + 1);
        self.jump_to(start)
    }

    /// End of the current logical line.
    pub fn end(&mut self, buffer: &str) -> bool {
        let end = buffer[self.pos..]
            .find('\n')
            .map_or(buffer.len(), |i| self.pos + i);
        self.jump_to(end)
    }

    fn jump_to(&mut self, pos: usize) -> bool {
        let moved = pos != self.pos;
        self.pos = pos;
        moved
    }

    /// Keep the cursor line inside the visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, content_width: u16) {
        let total_lines = wrap_line_count(buffer, inner_width(content_width));
        if total_lines <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let (cursor_line, _) = self.locate(buffer, content_width);
        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = cursor_line - (MAX_VISIBLE_LINES - 1);
        }
    }

    /// Terminal (column, row) of the cursor inside `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let (line, column) = self.locate(buffer, area.width);
        let row = line.saturating_sub(self.scroll_offset);
        (
            area.x + CONTENT_OFFSET_X + column,
            area.y + CONTENT_OFFSET_Y + row,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Width 9 leaves 5 columns for text
    const NARROW: u16 = 9;

    fn at(pos: usize) -> CursorState {
        let mut cursor = CursorState::new();
        cursor.pos = pos;
        cursor
    }

    #[test]
    fn locate_soft_wrapped() {
        let text = "hello world";
        assert_eq!(at(3).locate(text, NARROW), (0, 3));
        assert_eq!(at(5).locate(text, NARROW), (0, 5));
        assert_eq!(at(6).locate(text, NARROW), (1, 0));
        assert_eq!(at(11).locate(text, NARROW), (1, 5));
    }

    #[test]
    fn locate_after_trailing_newline() {
        assert_eq!(at(6).locate("hello\n", 80), (1, 0));
    }

    #[test]
    fn locate_keeps_trailing_spaces() {
        assert_eq!(at(6).locate("hello ", 80), (0, 6));
    }

    #[test]
    fn vertical_movement_keeps_column() {
        let text = "hello world";
        let mut cursor = at(8);
        assert!(cursor.move_vertically(text, -1, NARROW));
        assert_eq!(cursor.pos, 2);
        assert!(!cursor.move_vertically(text, -1, NARROW));
        assert!(cursor.move_vertically(text, 1, NARROW));
        assert_eq!(cursor.pos, 8);
        assert!(!cursor.move_vertically(text, 1, NARROW));
    }

    #[test]
    fn vertical_movement_clamps_to_short_line() {
        let text = "abcdef\nab";
        let mut cursor = at(5);
        assert!(cursor.move_vertically(text, 1, 80));
        assert_eq!(cursor.pos, text.len());
    }

    #[test]
    fn vertical_movement_on_empty_buffer() {
        let mut cursor = at(0);
        assert!(!cursor.move_vertically("", 1, 80));
        assert!(!cursor.move_vertically("", -1, 80));
    }

    #[test]
    fn home_and_end_use_logical_lines() {
        let text = "first\nsecond";
        let mut cursor = at(9);
        assert!(cursor.home(text));
        assert_eq!(cursor.pos, 6);
        assert!(!cursor.home(text));
        assert!(cursor.end(text));
        assert_eq!(cursor.pos, text.len());
    }

    #[test]
    fn scroll_follows_cursor() {
        let text = "1\n2\n3\n4\n5\n6\n7";
        let mut cursor = at(text.len());
        cursor.update_scroll_offset(text, 80);
        assert_eq!(cursor.scroll_offset, 2);

        cursor.pos = 0;
        cursor.update_scroll_offset(text, 80);
        assert_eq!(cursor.scroll_offset, 0);
    }

    #[test]
    fn screen_pos_accounts_for_border_and_padding() {
        let area = Rect::new(10, 20, 40, 4);
        assert_eq!(at(3).screen_pos("abc", area), (15, 21));
    }
}
