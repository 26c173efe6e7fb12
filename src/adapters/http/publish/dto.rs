//! HTTP DTOs for the publish endpoint.
//!
//! Every request field is optional so that absent or `null` values reach
//! the domain and are reported with its error codes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::adapters::pubsub::OutcomeStats;
use crate::application::PublishReceipt;
use crate::domain::publish::{Message, PublishRequest};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/publish`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequestDto {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub messages: Option<Vec<MessageDto>>,
}

/// One message of a publish request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    #[serde(default, alias = "id")]
    pub message_id: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub publish_time: Option<String>,
    #[serde(default)]
    pub attributes: Option<Value>,
}

impl From<MessageDto> for Message {
    fn from(dto: MessageDto) -> Self {
        Self {
            id: dto.message_id,
            data: dto.data,
            publish_time: dto.publish_time,
            attributes: dto.attributes,
        }
    }
}

impl From<PublishRequestDto> for PublishRequest {
    fn from(dto: PublishRequestDto) -> Self {
        Self {
            topic: dto.topic,
            messages: dto
                .messages
                .map(|messages| messages.into_iter().map(Into::into).collect()),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response once every message has been submitted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishAcceptedResponse {
    pub request_id: String,
    pub topic: String,
    pub accepted: usize,
}

impl From<&PublishReceipt> for PublishAcceptedResponse {
    fn from(receipt: &PublishReceipt) -> Self {
        Self {
            request_id: receipt.request_id.to_string(),
            topic: receipt.topic.clone(),
            accepted: receipt.submitted,
        }
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub topics: usize,
    pub acknowledged: u64,
    pub failed: u64,
}

impl HealthResponse {
    pub fn ok(topics: usize, stats: OutcomeStats) -> Self {
        Self {
            status: "ok",
            topics,
            acknowledged: stats.acknowledged,
            failed: stats.failed,
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl ToString, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn publish_request_deserializes() {
        let body = r#"{
            "topic": "orders",
            "messages": [{
                "messageId": "m1",
                "data": "hello",
                "publishTime": "2024-01-01T00:00:00Z",
                "attributes": {"k": "v"}
            }]
        }"#;
        let dto: PublishRequestDto = serde_json::from_str(body).unwrap();
        let request: PublishRequest = dto.into();

        assert_eq!(request.topic.as_deref(), Some("orders"));
        let message = &request.messages.unwrap()[0];
        assert_eq!(message.id.as_deref(), Some("m1"));
        assert_eq!(message.data.as_deref(), Some("hello"));
        assert_eq!(message.attributes, Some(json!({"k": "v"})));
    }

    #[test]
    fn id_alias_is_accepted() {
        let dto: MessageDto = serde_json::from_str(r#"{"id": "m2"}"#).unwrap();
        assert_eq!(dto.message_id.as_deref(), Some("m2"));
    }

    #[test]
    fn missing_and_null_fields_become_none() {
        let dto: PublishRequestDto =
            serde_json::from_str(r#"{"topic": null, "messages": [{"data": null}]}"#).unwrap();
        assert!(dto.topic.is_none());
        let message = &dto.messages.unwrap()[0];
        assert!(message.data.is_none());
        assert!(message.attributes.is_none());
        assert!(message.publish_time.is_none());
    }

    #[test]
    fn error_response_omits_empty_details() {
        let body = serde_json::to_value(ErrorResponse::new("INVALID_JSON", "nope")).unwrap();
        assert_eq!(body, json!({"code": "INVALID_JSON", "message": "nope"}));
    }

    #[test]
    fn health_response_copies_stats() {
        let health = HealthResponse::ok(
            3,
            OutcomeStats {
                acknowledged: 10,
                failed: 1,
            },
        );
        assert_eq!(health.status, "ok");
        assert_eq!(health.topics, 3);
        assert_eq!(health.acknowledged, 10);
        assert_eq!(health.failed, 1);
    }
}
