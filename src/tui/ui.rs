use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::{App, ConnectionStatus};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{MessageList, TitleBar, WelcomeScreen};

/// Why the input box currently refuses text, if it does.
pub fn input_lock_reason(app: &App) -> Option<&'static str> {
    if app.is_loading() {
        return Some("waiting for reply");
    }
    match app.connection {
        ConnectionStatus::Connected => None,
        ConnectionStatus::Checking => Some("checking connection"),
        ConnectionStatus::Disconnected => Some("API disconnected"),
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let input_height = tui.input_box.calculate_height(frame.area().width);
    let [title_area, main_area, input_area] =
        Layout::vertical([Length(1), Min(0), Length(input_height)]).areas(frame.area());

    // Main area: welcome screen until the first message, then the conversation
    if app.messages.is_empty() {
        tui.message_list.has_unseen_content = false;
        WelcomeScreen::new(app.connection).render(frame, main_area);
    } else {
        MessageList::new(
            &mut tui.message_list,
            &app.messages,
            app.is_loading(),
            spinner_frame,
        )
        .render(frame, main_area);
    }

    // Title bar reads the unseen flag the list just computed
    let mut title_bar = TitleBar::new(app.connection, app.greeting.as_deref(), &app.tools);
    title_bar.base_url = app.backend.base_url();
    title_bar.status_message = &app.status_message;
    title_bar.has_unseen_content = tui.message_list.has_unseen_content;
    title_bar.render(frame, title_area);

    tui.input_box.locked = input_lock_reason(app);
    tui.input_box.render(frame, input_area);
}
