//! # Application State
//!
//! Core state for medichat. Domain data only; scroll positions, input
//! buffers and other presentation state live in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn ChatBackend>   // remote chatbot API
//! ├── request_mode: RequestMode       // transcript or latest message
//! ├── probe_tools: bool               // ask /tools after the probe
//! ├── messages: Vec<Message>          // append-only conversation
//! ├── connection: ConnectionStatus    // probe result
//! ├── greeting: Option<String>        // server's probe message
//! ├── tools: Vec<String>              // advertised tool names
//! ├── session_id: Option<String>      // opaque, echoed back to the API
//! ├── in_flight: Option<RequestId>    // the one pending chat request
//! ├── next_request: u64               // generation counter
//! └── status_message: String          // transient title bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::ChatBackend;
use crate::core::config::{RequestMode, ResolvedConfig};

/// Who contributed a turn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    #[serde(alias = "bot")]
    Assistant,
}

/// A single turn in the conversation. Never modified after it is appended.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Opaque label the API may attach to an assistant turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            tool: None,
        }
    }

    pub fn assistant(content: impl Into<String>, tool: Option<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            tool,
        }
    }
}

/// Outcome of the startup probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Checking,
    Connected,
    Disconnected,
}

/// Generation token for a chat request. A reply is only applied when its
/// token matches the request still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

pub struct App {
    pub backend: Arc<dyn ChatBackend>,
    pub request_mode: RequestMode,
    pub probe_tools: bool,
    pub messages: Vec<Message>,
    pub connection: ConnectionStatus,
    pub greeting: Option<String>,
    pub tools: Vec<String>,
    pub session_id: Option<String>,
    pub in_flight: Option<RequestId>,
    pub next_request: u64,
    pub status_message: String,
}

impl App {
    pub fn new(backend: Arc<dyn ChatBackend>, request_mode: RequestMode) -> Self {
        Self {
            backend,
            request_mode,
            probe_tools: true,
            messages: Vec::new(),
            connection: ConnectionStatus::Checking,
            greeting: None,
            tools: Vec::new(),
            session_id: None,
            in_flight: None,
            next_request: 0,
            status_message: String::new(),
        }
    }

    pub fn from_config(backend: Arc<dyn ChatBackend>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(backend, config.request_mode);
        app.probe_tools = config.probe_tools;
        app
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether new text may be sent right now (ignoring the text itself).
    pub fn accepts_input(&self) -> bool {
        !self.is_loading() && self.connection == ConnectionStatus::Connected
    }

    /// Hands out the next request token.
    pub fn issue_request_id(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId(self.next_request)
    }
}
