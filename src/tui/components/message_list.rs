//! # MessageList Component
//!
//! Scrollable view of the conversation.
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the message slice
//! (props). Since `Component::render` takes `&mut self`, the layout cache and
//! scroll state are updated during the render pass.
//!
//! Messages never change after they are appended, so cached heights stay
//! valid until the width changes or the conversation is cleared.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::state;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::{Message, ThinkingRow};
use crate::tui::event::TuiEvent;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Last rendered canvas height, including the thinking row
    pub content_height: u16,
    /// Content exists below the visible area
    pub has_unseen_content: bool,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
            content_height: 0,
            has_unseen_content: false,
        }
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll if the user has scrolled back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [state::Message],
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        messages: &'a [state::Message],
        is_loading: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            messages,
            is_loading,
            spinner_frame,
        }
    }
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let count = self.messages.len();

        // 1. Update layout cache
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(count, content_width);
        layout.heights.truncate(reusable);
        for message in self.messages.iter().skip(layout.heights.len()) {
            layout
                .heights
                .push(Message::calculate_height(message, content_width));
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(count, content_width);

        let messages_height = layout.total_height();
        let thinking_height = if self.is_loading { ThinkingRow::HEIGHT } else { 0 };
        let canvas_height = messages_height.saturating_add(thinking_height);

        // 2. Pin to bottom or clamp to the new bounds
        self.state.viewport_height = area.height;
        self.state.content_height = canvas_height;
        if self.state.stick_to_bottom {
            let x = self.state.scroll_state.offset().x;
            self.state.scroll_state.set_offset(Position {
                x,
                y: self.state.max_offset(),
            });
        } else {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible messages into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset = self.state.layout.top_of(visible_range.start);
        for i in visible_range {
            let height = self.state.layout.heights[i];
            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(Message::new(&self.messages[i]), rect);
            y_offset = y_offset.saturating_add(height);
        }

        if self.is_loading {
            let rect = Rect::new(0, messages_height, content_width, thinking_height);
            scroll_view.render_widget(
                ThinkingRow {
                    frame: self.spinner_frame,
                },
                rect,
            );
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);

        // 4. "↓ New" indicator
        self.state.has_unseen_content =
            !self.state.stick_to_bottom && self.state.scroll_state.offset().y < self.state.max_offset();
    }
}

/// Implemented on the state because `MessageList` is rebuilt every frame.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached layout measurements
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    message_count: usize,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            message_count: 0,
            content_width: 0,
        }
    }

    /// How many cached heights are still valid for `message_count` messages at `content_width`.
    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width {
            return 0;
        }
        // Fewer messages than last frame means the conversation was reset
        if message_count < self.message_count {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    pub fn update_metadata(&mut self, message_count: usize, content_width: u16) {
        self.message_count = message_count;
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Y coordinate where message `index` starts.
    pub fn top_of(&self, index: usize) -> u16 {
        if index == 0 {
            0
        } else {
            self.prefix_heights[index - 1]
        }
    }

    /// Messages intersecting the viewport, padded by half a screen each side.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end.max(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn cache_with(heights: &[u16]) -> LayoutCache {
        let mut cache = LayoutCache::new();
        cache.heights = heights.to_vec();
        cache.rebuild_prefix_heights();
        cache.update_metadata(heights.len(), 80);
        cache
    }

    fn render(state: &mut MessageListState, messages: &[state::Message], loading: bool, height: u16) -> String {
        let backend = TestBackend::new(60, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| MessageList::new(state, messages, loading, 3).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_layout_cache_reusable() {
        let cache = cache_with(&[3, 3, 3]);
        assert_eq!(cache.reusable_count(3, 80), 3);
        // New message appended: old heights still valid
        assert_eq!(cache.reusable_count(4, 80), 3);
        // Width changed: recompute everything
        assert_eq!(cache.reusable_count(3, 40), 0);
        // Conversation cleared
        assert_eq!(cache.reusable_count(0, 80), 0);
    }

    #[test]
    fn test_prefix_heights_and_top_of() {
        let cache = cache_with(&[3, 5, 4]);
        assert_eq!(cache.prefix_heights, vec![3, 8, 12]);
        assert_eq!(cache.total_height(), 12);
        assert_eq!(cache.top_of(0), 0);
        assert_eq!(cache.top_of(2), 8);
    }

    #[test]
    fn test_prefix_heights_saturate() {
        let cache = cache_with(&[40_002, 40_002, 3]);
        assert_eq!(cache.prefix_heights, vec![40_002, u16::MAX, u16::MAX]);
        assert_eq!(cache.total_height(), u16::MAX);
    }

    #[test]
    fn test_visible_range_covers_viewport() {
        let cache = cache_with(&[3; 20]); // 60 rows of content
        let range = cache.visible_range(30, 10);
        // Viewport rows 30..40 padded by 5 → rows 25..45 → messages 8..15
        assert!(range.start <= 10);
        assert!(range.end >= 13);
        assert!(range.end <= 20);
    }

    #[test]
    fn test_visible_range_empty_cache() {
        let cache = LayoutCache::new();
        assert_eq!(cache.visible_range(0, 10), 0..0);
    }

    #[test]
    fn test_renders_messages_and_thinking_row() {
        let messages = vec![
            state::Message::user("What are symptoms of the flu?"),
            state::Message::assistant("Fever and cough.", Some("faq".into())),
            state::Message::user("Anything else?"),
        ];
        let mut list_state = MessageListState::new();
        let text = render(&mut list_state, &messages, true, 20);
        assert!(text.contains("What are symptoms of the flu?"));
        assert!(text.contains("[Tool: faq]"));
        assert!(text.contains("Thinking..."));
    }

    #[test]
    fn test_sticks_to_bottom_on_overflow() {
        let messages: Vec<_> = (0..10)
            .map(|i| state::Message::user(format!("message number {i}")))
            .collect();
        let mut list_state = MessageListState::new();
        let text = render(&mut list_state, &messages, false, 9);
        assert!(text.contains("message number 9"));
        assert!(!text.contains("message number 0"));
        assert!(!list_state.has_unseen_content);
    }

    #[test]
    fn test_replies_taller_than_canvas_limit_render() {
        let messages = vec![
            state::Message::assistant("line\n".repeat(40_000), None),
            state::Message::assistant("line\n".repeat(40_000), None),
        ];
        let mut list_state = MessageListState::new();
        let backend = TestBackend::new(12, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| MessageList::new(&mut list_state, &messages, true, 0).render(f, f.area()))
            .unwrap();

        assert_eq!(list_state.content_height, u16::MAX);
        assert_eq!(list_state.scroll_state.offset().y, list_state.max_offset());
    }

    #[test]
    fn test_scroll_up_unpins_and_flags_unseen() {
        let messages: Vec<_> = (0..10)
            .map(|i| state::Message::user(format!("message number {i}")))
            .collect();
        let mut list_state = MessageListState::new();
        render(&mut list_state, &messages, false, 9);

        list_state.handle_event(&TuiEvent::ScrollPageUp);
        assert!(!list_state.stick_to_bottom);
        render(&mut list_state, &messages, false, 9);
        assert!(list_state.has_unseen_content);
    }

    #[test]
    fn test_scroll_down_repins_at_bottom() {
        let mut list_state = MessageListState::new();
        list_state.content_height = 6;
        list_state.viewport_height = 10; // content fits, max offset is 0
        list_state.stick_to_bottom = false;
        list_state.handle_event(&TuiEvent::ScrollDown);
        assert!(list_state.stick_to_bottom);
    }
}
