//! # Welcome Screen Component
//!
//! Shown instead of the message list while the conversation is empty.
//! Lists what the chatbot can do, a few example questions, and a warning
//! when the API could not be reached.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::core::state::ConnectionStatus;
use crate::tui::component::Component;

const CAPABILITIES: &[&str] = &[
    "Answering medical questions",
    "Finding clinics by location or specialty",
    "Providing information about medical services",
    "Looking up appointments",
    "Scheduling new appointments",
    "Comparing prices for medical services",
];

const EXAMPLES: &[&str] = &[
    "What are symptoms of the flu?",
    "Find dermatologists in Boston",
    "What services do you offer for prenatal care?",
];

pub const DISCONNECTED_WARNING: &str =
    "Warning: The API is not connected. Your messages will not be processed.";

pub struct WelcomeScreen {
    pub connection: ConnectionStatus,
}

impl WelcomeScreen {
    pub fn new(connection: ConnectionStatus) -> Self {
        Self { connection }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let heading = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let dim = Style::default().fg(Color::DarkGray);

        let mut lines = vec![
            Line::from(Span::styled("Welcome to the Medical Chatbot!", heading)),
            Line::default(),
            Line::from("This chatbot can help you with:"),
        ];
        lines.extend(CAPABILITIES.iter().map(|c| Line::from(format!("• {c}"))));
        lines.push(Line::default());
        lines.push(Line::from("Try asking something like:"));
        lines.extend(
            EXAMPLES
                .iter()
                .map(|e| Line::from(Span::styled(format!("\"{e}\""), dim))),
        );

        match self.connection {
            ConnectionStatus::Disconnected => {
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    DISCONNECTED_WARNING,
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(Span::styled("Press Ctrl+R to check again.", dim)));
            }
            ConnectionStatus::Checking => {
                lines.push(Line::default());
                lines.push(Line::from(Span::styled("Checking API connection...", dim)));
            }
            ConnectionStatus::Connected => {}
        }

        lines
    }

    /// Rows the lines occupy once wrapped to `width`.
    fn wrapped_height(lines: &[Line], width: u16) -> u16 {
        let width = usize::from(width.max(1));
        let rows: usize = lines
            .iter()
            .map(|line| {
                let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
                textwrap::wrap(&text, width).len().max(1)
            })
            .sum();
        u16::try_from(rows).unwrap_or(u16::MAX)
    }
}

impl Component for WelcomeScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.lines();
        let height = Self::wrapped_height(&lines, area.width).min(area.height);

        let [centered] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, centered);
    }
}
