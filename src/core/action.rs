//! # Actions
//!
//! Everything that can happen in medichat becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The API answers? That's `Action::ReplyReceived { .. }`.
//!
//! `update()` applies an action to the state and returns the `Effect` the
//! caller must perform. No I/O happens here; the TUI spawns the network
//! tasks and feeds their results back in as new actions.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Request lifecycle: idle → in-flight (`Submit`) → idle (`ReplyReceived`,
//! `CancelRequest` or `NewConversation`).

use log::{debug, info};

use crate::api::{ApiError, ChatBody, ChatReply, ProbeOutcome};
use crate::core::config::RequestMode;
use crate::core::state::{App, ConnectionStatus, Message, RequestId};

/// Appended when the request never produced a usable reply.
pub const FALLBACK_ERROR: &str =
    "Sorry, I encountered an error connecting to the server. Please try again.";

/// Used when the server reports a failure without saying why.
pub const GENERIC_FAILURE: &str = "Something went wrong";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ProbeCompleted(ProbeOutcome),
    Reprobe,
    Submit(String),
    ReplyReceived {
        request: RequestId,
        result: Result<ChatReply, ApiError>,
    },
    CancelRequest,
    NewConversation,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    SpawnProbe,
    SpawnChat { request: RequestId, body: ChatBody },
    /// Drop whatever task is still running for the old request.
    AbortRequest,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::ProbeCompleted(outcome) => {
            match outcome {
                ProbeOutcome::Connected { greeting, tools } => {
                    info!("Probe succeeded ({} tools)", tools.len());
                    app.connection = ConnectionStatus::Connected;
                    app.greeting = greeting;
                    app.tools = tools;
                }
                ProbeOutcome::Disconnected(reason) => {
                    info!("Probe failed: {}", reason);
                    app.connection = ConnectionStatus::Disconnected;
                    app.greeting = None;
                    app.tools.clear();
                }
            }
            app.status_message.clear();
            Effect::None
        }
        Action::Reprobe => {
            if app.connection == ConnectionStatus::Checking {
                return Effect::None;
            }
            app.connection = ConnectionStatus::Checking;
            app.status_message.clear();
            Effect::SpawnProbe
        }
        Action::Submit(text) => {
            if text.trim().is_empty() {
                debug!("Ignoring empty submission");
                return Effect::None;
            }
            if !app.accepts_input() {
                debug!(
                    "Ignoring submission (loading={}, connection={:?})",
                    app.is_loading(),
                    app.connection
                );
                return Effect::None;
            }

            app.messages.push(Message::user(text.clone()));
            let request = app.issue_request_id();
            app.in_flight = Some(request);
            app.status_message.clear();

            let session_id = app.session_id.clone();
            let body = match app.request_mode {
                RequestMode::Transcript => ChatBody::Transcript {
                    messages: app.messages.clone(),
                    session_id,
                },
                RequestMode::Latest => ChatBody::Latest {
                    message: text,
                    session_id,
                },
            };
            Effect::SpawnChat { request, body }
        }
        Action::ReplyReceived { request, result } => {
            if app.in_flight != Some(request) {
                debug!("Discarding reply for superseded request {:?}", request);
                return Effect::None;
            }
            app.in_flight = None;

            let message = match result {
                Ok(ChatReply::Success {
                    response,
                    tool_used,
                    session_id,
                }) => {
                    if session_id.is_some() {
                        app.session_id = session_id;
                    }
                    Message::assistant(response, tool_used)
                }
                Ok(ChatReply::Failure { error }) => {
                    let text = error.unwrap_or_else(|| GENERIC_FAILURE.to_string());
                    Message::assistant(format!("Error: {text}"), None)
                }
                Err(e) => {
                    info!("Chat request failed: {}", e);
                    Message::assistant(FALLBACK_ERROR, None)
                }
            };
            app.messages.push(message);
            Effect::None
        }
        Action::CancelRequest => {
            if app.in_flight.take().is_none() {
                return Effect::None;
            }
            app.status_message = "Request cancelled".to_string();
            Effect::AbortRequest
        }
        Action::NewConversation => {
            let was_loading = app.in_flight.take().is_some();
            app.messages.clear();
            app.session_id = None;
            app.status_message = "New conversation".to_string();
            if was_loading {
                Effect::AbortRequest
            } else {
                Effect::None
            }
        }
        Action::Quit => Effect::Quit,
    }
}
