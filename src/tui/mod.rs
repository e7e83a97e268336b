//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Background Work
//!
//! Network calls run as tokio tasks. Each one reports back by sending a
//! single `Action` over a std `mpsc` channel, which the loop drains between
//! frames. The chat task's `AbortHandle` is kept so Esc and Ctrl+N can drop it;
//! the reducer's request ids make a late reply harmless either way.
//!
//! ## Redraw Strategy
//!
//! - **Loading** (reply pending): draws every ~80ms to animate the thinking row.
//! - **Idle**: sleeps up to 500ms, only redraws on events, replies or resize.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::api::{ChatBackend, ChatBody, HttpBackend, probe};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, RequestId};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Shift+Enter through; terminals without it ignore the request
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste
        );
    }
}

/// Runs a terminal teardown hook when dropped, so `?` exits still leave raw mode.
struct RestoreOnDrop(fn());

impl Drop for RestoreOnDrop {
    fn drop(&mut self) {
        (self.0)();
    }
}

/// Side effects the event loop owns: the action channel and the running chat task.
struct Background {
    tx: mpsc::Sender<Action>,
    chat_task: Option<AbortHandle>,
}

impl Background {
    /// Carry out an effect. Returns `true` when the app should exit.
    fn perform(&mut self, app: &App, effect: Effect) -> bool {
        match effect {
            Effect::None => {}
            Effect::SpawnProbe => spawn_probe(app, self.tx.clone()),
            Effect::SpawnChat { request, body } => {
                self.abort_chat();
                self.chat_task = Some(spawn_chat(app, request, body, self.tx.clone()));
            }
            Effect::AbortRequest => self.abort_chat(),
            Effect::Quit => return true,
        }
        false
    }

    fn abort_chat(&mut self) {
        if let Some(handle) = self.chat_task.take() {
            debug!("Aborting in-flight chat task");
            handle.abort();
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    info!(
        "Connecting to {} (request mode: {:?}, probe tools: {})",
        config.base_url, config.request_mode, config.probe_tools
    );
    let backend: Arc<dyn ChatBackend> = Arc::new(HttpBackend::new(config.base_url.clone()));
    let mut app = App::from_config(backend, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _restore = RestoreOnDrop(ratatui::restore);
    let _terminal_mode_guard = TerminalModeGuard::new();

    let (tx, rx) = mpsc::channel();
    let mut background = Background {
        tx,
        chat_task: None,
    };

    // The app starts in Checking; kick off the first probe
    spawn_probe(&app, background.tx.clone());

    let start_time = Instant::now();
    let mut needs_redraw = true;
    let mut should_quit = false;

    while !should_quit {
        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_millis() / 250) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain every pending event before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = route_event(&app, &mut tui, event) else {
                continue;
            };
            if matches!(action, Action::NewConversation) {
                tui.message_list = MessageListState::new();
            }
            let effect = update(&mut app, action);
            if background.perform(&app, effect) {
                should_quit = true;
                break;
            }
        }

        // Results from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if background.perform(&app, effect) {
                should_quit = true;
            }
        }
    }

    background.abort_chat();
    Ok(())
}

/// Turn a terminal event into an `Action`, letting components consume what they own.
fn route_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    tui.input_box.locked = ui::input_lock_reason(app);

    match event {
        TuiEvent::Resize => None,
        TuiEvent::ForceQuit => Some(Action::Quit),
        TuiEvent::Escape => app.is_loading().then_some(Action::CancelRequest),
        TuiEvent::NewConversation => Some(Action::NewConversation),
        TuiEvent::Reprobe => Some(Action::Reprobe),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(&event);
            None
        }
        TuiEvent::CursorUp | TuiEvent::CursorDown => {
            // Arrows move through the input first and scroll the conversation at its edges
            if tui.input_box.handle_event(&event).is_none() {
                let scroll = if event == TuiEvent::CursorUp {
                    TuiEvent::ScrollUp
                } else {
                    TuiEvent::ScrollDown
                };
                tui.message_list.handle_event(&scroll);
            }
            None
        }
        _ => match tui.input_box.handle_event(&event)? {
            InputEvent::Submit(text) => {
                tui.message_list.stick_to_bottom = true;
                Some(Action::Submit(text))
            }
            InputEvent::ContentChanged => None,
        },
    }
}

fn spawn_probe(app: &App, tx: mpsc::Sender<Action>) {
    info!("Probing API at {}", app.backend.base_url());
    let backend = app.backend.clone();
    let probe_tools = app.probe_tools;
    tokio::spawn(async move {
        let outcome = probe(backend.as_ref(), probe_tools).await;
        if tx.send(Action::ProbeCompleted(outcome)).is_err() {
            warn!("Failed to send probe result: receiver dropped");
        }
    });
}

fn spawn_chat(app: &App, request: RequestId, body: ChatBody, tx: mpsc::Sender<Action>) -> AbortHandle {
    info!("Spawning chat request {:?}", request);
    let backend = app.backend.clone();
    let handle = tokio::spawn(async move {
        let started = Instant::now();
        let result = backend.chat(&body).await;
        debug!(
            "Chat request {:?} finished in {}ms (ok={})",
            request,
            started.elapsed().as_millis(),
            result.is_ok()
        );
        if tx.send(Action::ReplyReceived { request, result }).is_err() {
            warn!("Failed to send reply for {:?}: receiver dropped", request);
        }
    });
    handle.abort_handle()
}
