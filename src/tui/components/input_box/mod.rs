//! # InputBox Component
//!
//! Multi-line text entry for chat questions.
//!
//! ## Responsibilities
//!
//! - Capture text input and bracketed paste
//! - Handle editing (backspace, delete, cursor and word movement)
//! - Emit the buffer on Enter
//! - Refuse input while locked, naming the reason in the title
//!
//! ## State Management
//!
//! The buffer is internal state. `locked` is a prop the parent refreshes from
//! application state before each frame and each key. Cursor position and
//! scroll state are encapsulated in `CursorState`.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{
    Block, BorderType, Padding, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use text_wrap::{MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width, line_ranges, wrap_line_count};

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    /// Text or cursor changed
    ContentChanged,
}

/// Text input component.
///
/// # Props
///
/// - `locked`: why input is currently refused, if it is
///
/// # State
///
/// - `buffer`: Current text being typed
/// - `cursor`: Cursor position, scroll offset, and cached width (see `CursorState`)
pub struct InputBox {
    pub buffer: String,
    pub locked: Option<&'static str>,
    cursor: CursorState,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            locked: None,
            cursor: CursorState::new(),
        }
    }

    /// Height needed for the current buffer, between one and `MAX_VISIBLE_LINES` rows of text.
    pub fn calculate_height(&self, content_width: u16) -> u16 {
        let content_lines = wrap_line_count(&self.buffer, inner_width(content_width));
        content_lines.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn title(&self) -> String {
        match self.locked {
            Some(reason) => format!("Input ({reason})"),
            None => "Input (Enter to send, Shift+Enter for newline)".to_string(),
        }
    }

    /// Wrapped lines inside the scroll window.
    fn visible_lines(&self, content_width: u16) -> Vec<&str> {
        line_ranges(&self.buffer, inner_width(content_width))
            .into_iter()
            .skip(self.cursor.scroll_offset as usize)
            .take(MAX_VISIBLE_LINES as usize)
            .map(|r| &self.buffer[r])
            .collect()
    }

    fn render_scrollbar(&self, frame: &mut Frame, area: Rect) {
        let total_lines = wrap_line_count(&self.buffer, inner_width(area.width));
        if total_lines <= MAX_VISIBLE_LINES {
            return;
        }

        // content_length is the number of scroll positions, not lines
        let max_scroll = total_lines.saturating_sub(MAX_VISIBLE_LINES);
        let mut scrollbar_state = ScrollbarState::default()
            .content_length(max_scroll as usize)
            .position(self.cursor.scroll_offset as usize);

        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut scrollbar_state,
        );
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.last_content_width = area.width;
        self.cursor.update_scroll_offset(&self.buffer, area.width);

        let (text_color, border_color) = if self.locked.is_some() {
            (Color::DarkGray, Color::DarkGray)
        } else {
            (Color::Green, Color::Reset)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .padding(Padding::horizontal(1))
            .title(self.title());

        let input = Paragraph::new(self.visible_lines(area.width).join("\n"))
            .block(block)
            .style(Style::default().fg(text_color));

        frame.render_widget(input, area);
        self.render_scrollbar(frame, area);

        if self.locked.is_none() {
            frame.set_cursor_position(self.cursor.screen_pos(&self.buffer, area));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.locked.is_some() {
            return None;
        }

        let buffer = &self.buffer;
        let moved = match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor.pos, *c);
                self.cursor.pos += c.len_utf8();
                true
            }
            TuiEvent::Paste(text) => {
                // Normalize CRLF from Windows clipboards
                let text = text.replace("\r\n", "\n");
                self.buffer.insert_str(self.cursor.pos, &text);
                self.cursor.pos += text.len();
                true
            }
            TuiEvent::Backspace => {
                let end = self.cursor.pos;
                if self.cursor.left(buffer) {
                    self.buffer.drain(self.cursor.pos..end);
                    true
                } else {
                    false
                }
            }
            TuiEvent::Delete => {
                if self.cursor.pos < buffer.len() {
                    let next = text_wrap::next_char_boundary(buffer, self.cursor.pos);
                    self.buffer.drain(self.cursor.pos..next);
                    true
                } else {
                    false
                }
            }
            TuiEvent::CursorLeft => self.cursor.left(buffer),
            TuiEvent::CursorRight => self.cursor.right(buffer),
            TuiEvent::CursorWordLeft => self.cursor.word_left(buffer),
            TuiEvent::CursorWordRight => self.cursor.word_right(buffer),
            TuiEvent::CursorHome => self.cursor.home(buffer),
            TuiEvent::CursorEnd => self.cursor.end(buffer),
            TuiEvent::CursorUp => {
                let width = self.cursor.last_content_width;
                self.cursor.move_vertically(buffer, -1, width)
            }
            TuiEvent::CursorDown => {
                let width = self.cursor.last_content_width;
                self.cursor.move_vertically(buffer, 1, width)
            }
            TuiEvent::Submit => {
                if buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor.reset();
                return Some(InputEvent::Submit(text));
            }
            _ => false,
        };

        moved.then_some(InputEvent::ContentChanged)
    }
}
