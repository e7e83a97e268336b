//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::types::HealthResponse;
use crate::api::{ApiError, ChatBackend, ChatBody, ChatReply, ProbeOutcome};
use crate::core::action::{Action, update};
use crate::core::config::RequestMode;
use crate::core::state::App;

/// A backend with canned answers for every endpoint.
pub struct StubBackend {
    pub health: Result<HealthResponse, ApiError>,
    pub tools: Result<Vec<String>, ApiError>,
    pub chat: Result<ChatReply, ApiError>,
}

impl StubBackend {
    pub fn connected(greeting: Option<&str>, tools: &[&str]) -> Self {
        Self {
            health: Ok(HealthResponse {
                message: greeting.map(str::to_string),
            }),
            tools: Ok(tools.iter().map(|t| t.to_string()).collect()),
            chat: Ok(ChatReply::Success {
                response: "ok".to_string(),
                tool_used: None,
                session_id: None,
            }),
        }
    }

    pub fn unreachable() -> Self {
        let err = ApiError::Network("connection refused".to_string());
        Self {
            health: Err(err.clone()),
            tools: Err(err.clone()),
            chat: Err(err),
        }
    }
}

#[async_trait]
impl ChatBackend for StubBackend {
    fn base_url(&self) -> &str {
        "http://stub"
    }

    async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.health.clone()
    }

    async fn tools(&self) -> Result<Vec<String>, ApiError> {
        self.tools.clone()
    }

    async fn chat(&self, _body: &ChatBody) -> Result<ChatReply, ApiError> {
        self.chat.clone()
    }
}

/// Creates a test App that has not been probed yet.
pub fn test_app() -> App {
    App::new(
        Arc::new(StubBackend::connected(None, &[])),
        RequestMode::Transcript,
    )
}

/// Creates a test App whose probe already succeeded.
pub fn connected_app() -> App {
    let mut app = test_app();
    update(
        &mut app,
        Action::ProbeCompleted(ProbeOutcome::Connected {
            greeting: None,
            tools: Vec::new(),
        }),
    );
    app
}
