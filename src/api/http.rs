//! reqwest-backed implementation of [`ChatBackend`].

use async_trait::async_trait;
use log::{debug, info, warn};

use super::backend::{ApiError, ChatBackend};
use super::types::{ChatBody, ChatReply, HealthResponse, ToolsResponse, decode_reply};

/// Chatbot API over plain HTTP/JSON. No auth, no retries.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Sends a prepared request and returns the body of a 2xx response.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        debug!("API response status: {}", status);

        if !status.is_success() {
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("API error: {} - {}", status.as_u16(), err_body);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: err_body,
            });
        }

        response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn health(&self) -> Result<HealthResponse, ApiError> {
        let body = self.send(self.client.get(self.url("/"))).await?;
        // Any 2xx means alive; the greeting is a bonus.
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }

    async fn tools(&self) -> Result<Vec<String>, ApiError> {
        let body = self.send(self.client.get(self.url("/tools"))).await?;
        let parsed: ToolsResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(parsed.tools)
    }

    async fn chat(&self, body: &ChatBody) -> Result<ChatReply, ApiError> {
        match body {
            ChatBody::Transcript { messages, .. } => {
                info!("POST /chat with {} messages", messages.len())
            }
            ChatBody::Latest { message, .. } => {
                info!("POST /chat with latest message ({} bytes)", message.len())
            }
        }

        let text = self
            .send(self.client.post(self.url("/chat")).json(body))
            .await?;

        decode_reply(&text).map_err(|e| {
            warn!("Unusable chat reply: {}", e);
            ApiError::Parse(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let backend = HttpBackend::new("http://localhost:8000/");
        assert_eq!(backend.base_url(), "http://localhost:8000");
        assert_eq!(backend.url("/chat"), "http://localhost:8000/chat");
        assert_eq!(backend.url("tools"), "http://localhost:8000/tools");
        assert_eq!(backend.url("/"), "http://localhost:8000/");
    }

    #[test]
    fn test_url_keeps_path_prefix() {
        let backend = HttpBackend::new("https://example.onrender.com/api");
        assert_eq!(backend.url("/chat"), "https://example.onrender.com/api/chat");
    }
}
