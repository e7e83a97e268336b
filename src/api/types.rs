//! Wire types for the chatbot HTTP API.
//!
//! Requests are plain serde structs. Replies go through [`RawReply`] first and
//! are then validated into [`ChatReply`], so a reply that doesn't match the
//! canonical schema surfaces as a parse error instead of a half-filled message.

use serde::{Deserialize, Serialize};

use crate::core::state::Message;

/// `GET /` body. Only used as a liveness signal.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct HealthResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// `GET /tools` body.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ToolsResponse {
    #[serde(default)]
    pub tools: Vec<String>,
}

/// `POST /chat` body. Which shape is sent depends on the configured request mode.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ChatBody {
    /// Whole conversation so far, newest user turn last.
    Transcript {
        messages: Vec<Message>,
        #[serde(skip_serializing_if = "Option::is_none")]
        session_id: Option<String>,
    },
    /// Only the text the user just submitted.
    Latest {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        session_id: Option<String>,
    },
}

/// `POST /chat` reply exactly as it comes off the wire.
#[derive(Deserialize, Debug, Default)]
pub struct RawReply {
    pub status: Option<String>,
    pub response: Option<String>,
    pub message: Option<String>,
    pub tool_used: Option<String>,
    pub session_id: Option<String>,
}

/// Validated `POST /chat` reply.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatReply {
    Success {
        response: String,
        tool_used: Option<String>,
        session_id: Option<String>,
    },
    /// The server answered but flagged the request as failed.
    Failure { error: Option<String> },
}

pub const STATUS_SUCCESS: &str = "success";

impl TryFrom<RawReply> for ChatReply {
    type Error = String;

    fn try_from(raw: RawReply) -> Result<Self, Self::Error> {
        let status = raw.status.ok_or("reply has no status field")?;

        if status == STATUS_SUCCESS {
            let response = raw
                .response
                .ok_or("successful reply has no response field")?;
            Ok(ChatReply::Success {
                response,
                tool_used: raw.tool_used,
                session_id: raw.session_id,
            })
        } else {
            // Error replies put their text in either field depending on the server.
            Ok(ChatReply::Failure {
                error: raw.response.or(raw.message),
            })
        }
    }
}

/// Decode a `/chat` body into a validated reply.
pub fn decode_reply(body: &str) -> Result<ChatReply, String> {
    let raw: RawReply = serde_json::from_str(body).map_err(|e| e.to_string())?;
    ChatReply::try_from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Role;

    #[test]
    fn test_decode_success_with_tool_and_session() {
        let body = r#"{
            "response": "Dr. Smith is available on Monday.",
            "status": "success",
            "session_id": "demo-123",
            "tool_used": "booking_search"
        }"#;
        assert_eq!(
            decode_reply(body).unwrap(),
            ChatReply::Success {
                response: "Dr. Smith is available on Monday.".to_string(),
                tool_used: Some("booking_search".to_string()),
                session_id: Some("demo-123".to_string()),
            }
        );
    }

    #[test]
    fn test_decode_failure_prefers_response_text() {
        let body = r#"{"status": "error", "response": "model offline", "message": "ignored"}"#;
        assert_eq!(
            decode_reply(body).unwrap(),
            ChatReply::Failure {
                error: Some("model offline".to_string())
            }
        );
    }

    #[test]
    fn test_decode_failure_falls_back_to_message() {
        let body = r#"{"status": "error", "message": "Last message must be from user"}"#;
        assert_eq!(
            decode_reply(body).unwrap(),
            ChatReply::Failure {
                error: Some("Last message must be from user".to_string())
            }
        );
    }

    #[test]
    fn test_decode_failure_without_text() {
        let body = r#"{"status": "error"}"#;
        assert_eq!(decode_reply(body).unwrap(), ChatReply::Failure { error: None });
    }

    #[test]
    fn test_decode_rejects_missing_status() {
        // Bare `{message}` replies are not the canonical schema
        let err = decode_reply(r#"{"message": "hello"}"#).unwrap_err();
        assert!(err.contains("status"));
    }

    #[test]
    fn test_decode_rejects_success_without_response() {
        let err = decode_reply(r#"{"status": "success"}"#).unwrap_err();
        assert!(err.contains("response"));
    }

    #[test]
    fn test_decode_rejects_non_json() {
        assert!(decode_reply("<html>Bad Gateway</html>").is_err());
    }

    #[test]
    fn test_transcript_body_shape() {
        let body = ChatBody::Transcript {
            messages: vec![Message::user("What are symptoms of the flu?")],
            session_id: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "messages": [{"role": "user", "content": "What are symptoms of the flu?"}]
            })
        );
    }

    #[test]
    fn test_latest_body_carries_session_id() {
        let body = ChatBody::Latest {
            message: "and for adults?".to_string(),
            session_id: Some("demo-123".to_string()),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"message": "and for adults?", "session_id": "demo-123"})
        );
    }

    #[test]
    fn test_transcript_serializes_tool_label() {
        let body = ChatBody::Transcript {
            messages: vec![Message::assistant("Found 2 clinics.", Some("clinic_search".into()))],
            session_id: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][0]["role"], "assistant");
        assert_eq!(json["messages"][0]["tool"], "clinic_search");
        assert_eq!(Role::Assistant, Message::assistant("x", None).role);
    }

    #[test]
    fn test_tools_response_defaults_to_empty() {
        let tools: ToolsResponse = serde_json::from_str("{}").unwrap();
        assert!(tools.tools.is_empty());
    }
}
