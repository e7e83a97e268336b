//! # TitleBar Component
//!
//! Top status bar: application name, API address and connection badge, advertised tools,
//! transient status text and a "↓ New" hint when content sits below the
//! current scroll position.
//!
//! TitleBar is purely presentational. It receives every value as a prop and
//! owns no state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(ConnectionStatus::Connected, None, &app.tools);
//! title_bar.status_message = &app.status_message;
//! title_bar.render(frame, area);
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::state::ConnectionStatus;
use crate::tui::component::Component;

pub const APP_TITLE: &str = "Medical Chatbot";

/// Top status bar component.
pub struct TitleBar<'a> {
    pub connection: ConnectionStatus,
    pub base_url: &'a str,
    /// Message the API returned from the probe, shown instead of the default badge text.
    pub greeting: Option<&'a str>,
    pub tools: &'a [String],
    pub status_message: &'a str,
    pub has_unseen_content: bool,
}

impl<'a> TitleBar<'a> {
    pub fn new(connection: ConnectionStatus, greeting: Option<&'a str>, tools: &'a [String]) -> Self {
        Self {
            connection,
            base_url: "",
            greeting,
            tools,
            status_message: "",
            has_unseen_content: false,
        }
    }

    /// Text and color of the connection badge.
    pub fn badge(&self) -> (String, Color) {
        match self.connection {
            ConnectionStatus::Checking => ("Checking...".to_string(), Color::Yellow),
            ConnectionStatus::Connected => (
                self.greeting.unwrap_or("API Connected").to_string(),
                Color::Green,
            ),
            ConnectionStatus::Disconnected => ("API Disconnected".to_string(), Color::Red),
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (badge_text, badge_color) = self.badge();
        let separator = Span::styled(" | ", Style::default().fg(Color::DarkGray));

        let mut spans = vec![
            Span::styled(APP_TITLE, Style::default().add_modifier(Modifier::BOLD)),
            separator.clone(),
        ];
        if !self.base_url.is_empty() {
            spans.push(Span::styled(
                self.base_url.to_string(),
                Style::default().fg(Color::DarkGray),
            ));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(badge_text, Style::default().fg(badge_color)));

        if !self.tools.is_empty() {
            spans.push(separator.clone());
            spans.push(Span::raw(format!("Tools: {}", self.tools.join(", "))));
        }
        if !self.status_message.is_empty() {
            spans.push(separator.clone());
            spans.push(Span::styled(
                self.status_message.to_string(),
                Style::default().add_modifier(Modifier::ITALIC),
            ));
        }
        if self.has_unseen_content {
            spans.push(separator);
            spans.push(Span::styled("↓ New", Style::default().fg(Color::Cyan)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_string(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(120, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_badge_per_status() {
        let tools = Vec::new();
        assert_eq!(
            TitleBar::new(ConnectionStatus::Checking, None, &tools).badge().0,
            "Checking..."
        );
        assert_eq!(
            TitleBar::new(ConnectionStatus::Connected, None, &tools).badge(),
            ("API Connected".to_string(), Color::Green)
        );
        assert_eq!(
            TitleBar::new(ConnectionStatus::Disconnected, Some("stale"), &tools).badge(),
            ("API Disconnected".to_string(), Color::Red)
        );
    }

    #[test]
    fn test_greeting_replaces_default_badge() {
        let tools = Vec::new();
        let title_bar = TitleBar::new(ConnectionStatus::Connected, Some("API is working!"), &tools);
        assert_eq!(title_bar.badge().0, "API is working!");
    }

    #[test]
    fn test_renders_tools_and_status() {
        let tools = vec!["faq".to_string(), "clinic_search".to_string()];
        let mut title_bar = TitleBar::new(ConnectionStatus::Connected, None, &tools);
        title_bar.base_url = "http://localhost:8000";
        title_bar.status_message = "Request cancelled";
        title_bar.has_unseen_content = true;

        let text = render_to_string(&mut title_bar);
        assert!(text.contains(APP_TITLE));
        assert!(text.contains("http://localhost:8000 API Connected"));
        assert!(text.contains("Tools: faq, clinic_search"));
        assert!(text.contains("Request cancelled"));
        assert!(text.contains("↓ New"));
    }

    #[test]
    fn test_minimal_title_has_no_tools_section() {
        let tools = Vec::new();
        let mut title_bar = TitleBar::new(ConnectionStatus::Disconnected, None, &tools);
        let text = render_to_string(&mut title_bar);
        assert!(text.contains("API Disconnected"));
        assert!(!text.contains("Tools:"));
        assert!(!text.contains("↓ New"));
    }
}
