use std::fmt;

use async_trait::async_trait;
use log::{info, warn};

use super::types::{ChatBody, ChatReply, HealthResponse};

/// Errors that can occur while talking to the chatbot API.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// The API answered with a non-success HTTP status.
    Api { status: u16, message: String },
    /// The body was not JSON or did not match the reply schema.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The remote chatbot service, as seen by the client.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Base URL shown to the user.
    fn base_url(&self) -> &str;

    /// `GET /`
    async fn health(&self) -> Result<HealthResponse, ApiError>;

    /// `GET /tools`
    async fn tools(&self) -> Result<Vec<String>, ApiError>;

    /// `POST /chat`
    async fn chat(&self, body: &ChatBody) -> Result<ChatReply, ApiError>;
}

/// Result of the startup reachability check.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    Connected {
        greeting: Option<String>,
        tools: Vec<String>,
    },
    Disconnected(String),
}

/// Check that the API answers and, optionally, ask which tools it offers.
///
/// Only the root request decides connectivity. A failing `/tools` call leaves
/// the tool list empty.
pub async fn probe(backend: &dyn ChatBackend, probe_tools: bool) -> ProbeOutcome {
    let greeting = match backend.health().await {
        Ok(health) => health.message,
        Err(e) => {
            warn!("API connection check failed: {}", e);
            return ProbeOutcome::Disconnected(e.to_string());
        }
    };
    info!("API reachable at {}", backend.base_url());

    let tools = if probe_tools {
        match backend.tools().await {
            Ok(tools) => {
                info!("API advertises {} tools", tools.len());
                tools
            }
            Err(e) => {
                warn!("Tool listing failed: {}", e);
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    ProbeOutcome::Connected { greeting, tools }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubBackend;

    #[tokio::test]
    async fn test_probe_connected_with_tools() {
        let backend = StubBackend::connected(Some("API is working!"), &["faq", "clinic_search"]);
        let outcome = probe(&backend, true).await;
        assert_eq!(
            outcome,
            ProbeOutcome::Connected {
                greeting: Some("API is working!".to_string()),
                tools: vec!["faq".to_string(), "clinic_search".to_string()],
            }
        );
    }

    #[tokio::test]
    async fn test_probe_skips_tools_when_disabled() {
        let backend = StubBackend::connected(None, &["faq"]);
        let outcome = probe(&backend, false).await;
        assert_eq!(
            outcome,
            ProbeOutcome::Connected {
                greeting: None,
                tools: vec![],
            }
        );
    }

    #[tokio::test]
    async fn test_probe_tools_failure_keeps_connection() {
        let mut backend = StubBackend::connected(None, &[]);
        backend.tools = Err(ApiError::Api {
            status: 404,
            message: "Not Found".to_string(),
        });
        let outcome = probe(&backend, true).await;
        assert!(matches!(outcome, ProbeOutcome::Connected { ref tools, .. } if tools.is_empty()));
    }

    #[tokio::test]
    async fn test_probe_health_failure_disconnects() {
        let backend = StubBackend::unreachable();
        let outcome = probe(&backend, true).await;
        assert!(matches!(outcome, ProbeOutcome::Disconnected(ref msg) if msg.contains("network error")));
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Api {
            status: 502,
            message: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 502): Bad Gateway");
        assert_eq!(
            ApiError::Parse("eof".to_string()).to_string(),
            "parse error: eof"
        );
    }
}
