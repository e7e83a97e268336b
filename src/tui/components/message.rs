use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::state::{self, Role};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
pub const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders a single chat turn with role-based styling.
///
/// `Message` is created fresh each frame by the parent `MessageList`.
///
/// - **User** (green): what was typed
/// - **Assistant** (blue): replies, with a `Tool: <name>` badge in the title
///   when the API reported one
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered height
/// with `textwrap` options matching ratatui's `Paragraph` wrapping, so the
/// list can lay out its scroll view before rendering anything.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub message: &'a state::Message,
}

impl<'a> Message<'a> {
    pub fn new(message: &'a state::Message) -> Self {
        Self { message }
    }

    /// Calculate the height required for this message given a width.
    pub fn calculate_height(message: &state::Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders + padding; still occupy one row.
            return 1;
        }

        let content = message.content.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options).len();
        u16::try_from(lines)
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }
}

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "you",
        Role::Assistant => "assistant",
    }
}

pub fn role_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::Green),
        Role::Assistant => Style::default().fg(Color::Blue),
    }
}

/// Block title: role label, plus the tool badge for assistant turns.
fn title(message: &state::Message) -> Line<'_> {
    let style = role_style(message.role).add_modifier(Modifier::DIM);
    let mut spans = vec![Span::styled(role_label(message.role), style)];
    if message.role == Role::Assistant
        && let Some(tool) = message.tool.as_deref()
    {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("[Tool: {tool}]"),
            Style::default().fg(Color::Magenta),
        ));
    }
    Line::from(spans)
}

impl Widget for Message<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = role_style(self.message.role);
        let border_style = style.add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .title(title(self.message))
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.message.content.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

/// Trailing "Thinking..." row shown while a reply is pending.
pub struct ThinkingRow {
    /// Animation frame, advances the trailing dots.
    pub frame: usize,
}

impl ThinkingRow {
    pub const HEIGHT: u16 = 1 + VERTICAL_OVERHEAD;

    pub fn text(&self) -> String {
        format!("Thinking{:<3}", ".".repeat(self.frame % 4))
    }
}

impl Widget for ThinkingRow {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = role_style(Role::Assistant).add_modifier(Modifier::ITALIC);
        let block = Block::bordered()
            .title(role_label(Role::Assistant))
            .border_type(BorderType::Rounded)
            .border_style(style.add_modifier(Modifier::DIM))
            .padding(Padding::horizontal(CONTENT_PAD_H));
        let inner_area = block.inner(area);
        block.render(area, buf);
        Paragraph::new(self.text()).style(style).render(inner_area, buf);
    }
}
