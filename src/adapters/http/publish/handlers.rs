//! HTTP handlers for publish endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{debug, error};

use crate::adapters::pubsub::TracingOutcomeListener;
use crate::application::PublishMessagesHandler;
use crate::domain::publish::{PublishError, PublishRequest};

use super::dto::{ErrorResponse, HealthResponse, PublishAcceptedResponse, PublishRequestDto};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PublishAppState {
    publish_handler: Arc<PublishMessagesHandler>,
    outcomes: Arc<TracingOutcomeListener>,
}

impl PublishAppState {
    /// `outcomes` should be the listener the handler reports to, so that
    /// `/health` shows its totals.
    pub fn new(
        publish_handler: Arc<PublishMessagesHandler>,
        outcomes: Arc<TracingOutcomeListener>,
    ) -> Self {
        Self {
            publish_handler,
            outcomes,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/publish - Submit a batch of messages to one topic
pub async fn publish_messages(State(state): State<PublishAppState>, body: Bytes) -> Response {
    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("INVALID_JSON", message)),
            )
                .into_response()
        }
    };

    match state.publish_handler.handle(request).await {
        Ok(receipt) => {
            let response = PublishAcceptedResponse::from(&receipt);
            (StatusCode::ACCEPTED, Json(response)).into_response()
        }
        Err(e) => handle_publish_error(e),
    }
}

/// GET /health - Liveness and publish totals
pub async fn health(State(state): State<PublishAppState>) -> Response {
    let topics = state.publish_handler.registry().len().await;
    let response = HealthResponse::ok(topics, state.outcomes.stats());
    (StatusCode::OK, Json(response)).into_response()
}

/// Empty and `null` bodies both mean "no request". Only JSON whitespace
/// counts as empty.
fn parse_request(body: &[u8]) -> Result<Option<PublishRequest>, String> {
    if body.iter().all(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r')) {
        return Ok(None);
    }
    let dto: Option<PublishRequestDto> =
        serde_json::from_slice(body).map_err(|e| format!("Invalid request body: {}", e))?;
    Ok(dto.map(Into::into))
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_publish_error(error: PublishError) -> Response {
    let code = error.code();
    let message = error.to_string();

    match error {
        PublishError::NullRequest | PublishError::MissingRequiredFields(_) => {
            debug!(%code, "Rejected publish request: {}", message);
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(code, message)),
            )
                .into_response()
        }
        PublishError::EnvelopeConstruction {
            index, message_id, ..
        } => {
            debug!(%code, index, "Rejected publish request: {}", message);
            let response = ErrorResponse::new(code, message)
                .with_details(json!({ "index": index, "messageId": message_id }));
            (StatusCode::BAD_REQUEST, Json(response)).into_response()
        }
        PublishError::PublisherUnavailable(err) => {
            error!(%code, "Publisher unavailable: {}", err);
            let mut response = ErrorResponse::new(code, message);
            if !err.details.is_empty() {
                response = response.with_details(json!(err.details));
            }
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
        PublishError::Submission { index, .. } => {
            error!(%code, index, "Publisher rejected message: {}", message);
            let response =
                ErrorResponse::new(code, message).with_details(json!({ "index": index }));
            (StatusCode::BAD_GATEWAY, Json(response)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DomainError;
    use crate::domain::publish::{EnvelopeError, RequestValidationError, SubmitError};

    #[test]
    fn null_request_maps_to_400() {
        let response = handle_publish_error(PublishError::NullRequest);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_fields_maps_to_400() {
        let response = handle_publish_error(RequestValidationError::MissingTopic.into());
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn envelope_failure_maps_to_400() {
        let error = PublishError::envelope(1, None, EnvelopeError::MissingField("data"));
        let response = handle_publish_error(error);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn publisher_unavailable_maps_to_500() {
        let error: PublishError = DomainError::publisher_unavailable("orders", "down").into();
        let response = handle_publish_error(error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn submission_failure_maps_to_502() {
        let error = PublishError::submission(0, SubmitError::TooLarge { size: 12, limit: 8 });
        let response = handle_publish_error(error);
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn empty_and_null_bodies_parse_to_none() {
        assert!(parse_request(b"").unwrap().is_none());
        assert!(parse_request(b" \t\r\n").unwrap().is_none());
        assert!(parse_request(b"null").unwrap().is_none());
    }

    #[test]
    fn form_feed_is_not_json_whitespace() {
        assert!(parse_request(b"\x0C").is_err());
        assert!(parse_request(b" \x0B ").is_err());
    }

    #[test]
    fn malformed_body_is_reported() {
        let err = parse_request(b"{\"topic\":").unwrap_err();
        assert!(err.starts_with("Invalid request body"));
    }

    #[test]
    fn object_body_parses_to_request() {
        let request = parse_request(br#"{"topic":"orders"}"#).unwrap().unwrap();
        assert_eq!(request.topic.as_deref(), Some("orders"));
        assert!(request.messages.is_none());
    }
}
