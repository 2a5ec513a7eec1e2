//! Request handling helpers.
//!
//! # Responsibilities
//! - Generate a request ID (UUID v4) unless the client sent one
//! - Parse JSON bodies into typed payloads with classified errors
//! - Open the per-request tracing span, tagged with the request ID
//!
//! # Design Decisions
//! - Bodies are taken as raw bytes and parsed here, so malformed JSON goes
//!   through the error mapper instead of axum's default rejection
//! - Body size is enforced by `DefaultBodyLimit` alone; an oversized body is
//!   a `BytesRejection` and is mapped like any other bad input

use axum::body::Bytes;
use axum::extract::{rejection::BytesRejection, Request};
use axum::http::HeaderName;
use serde::de::DeserializeOwned;
use tracing::Span;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::error::{ServiceError, ServiceResult};

pub const X_REQUEST_ID: &str = "x-request-id";

/// Layer that stamps `x-request-id` on incoming requests.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID), MakeRequestUuid)
}

/// Layer that copies the request's `x-request-id` onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID))
}

/// Span for one request; `request_id` is `-` when the header is missing.
pub fn request_span(request: &Request) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// Turn a body extraction failure (including an exceeded size limit) into
/// `InvalidInput`.
pub fn read_body(body: Result<Bytes, BytesRejection>) -> ServiceResult<Bytes> {
    body.map_err(|rejection| {
        ServiceError::invalid_input(format!(
            "failed to read request body: {}",
            rejection.body_text()
        ))
    })
}

/// Deserialize a JSON body; any failure is `InvalidInput`.
pub fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> ServiceResult<T> {
    serde_json::from_slice(body)
        .map_err(|e| ServiceError::invalid_input_with("request body is not valid JSON", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::JsonImportPath;

    #[test]
    fn test_parse_json_body() {
        let parsed: JsonImportPath = parse_json_body(br#"{"path": "/tmp/a.json"}"#).unwrap();
        assert_eq!(parsed.path.to_str(), Some("/tmp/a.json"));

        let err = parse_json_body::<JsonImportPath>(b"{\"path\":").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_request_span_records_request_id() {
        let subscriber = tracing_subscriber::registry();
        tracing::subscriber::with_default(subscriber, || {
            let request = axum::http::Request::builder()
                .uri("/nvt/template")
                .header(X_REQUEST_ID, "abc-123")
                .body(axum::body::Body::empty())
                .unwrap();

            let span = request_span(&request);
            let metadata = span.metadata().expect("span should be enabled");
            assert_eq!(metadata.name(), "request");
            assert!(metadata.fields().field("request_id").is_some());
        });
    }
}
