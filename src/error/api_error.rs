//! Error descriptor returned to clients.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;

const XML_CONTENT_TYPE: &str = "application/xml";

/// Immutable `{status, errorCode, errorMessage, moreDetails}` record.
///
/// Field order is fixed for both the JSON and the XML rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    #[serde(serialize_with = "serialize_status")]
    status: StatusCode,
    error_code: u16,
    error_message: String,
    more_details: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            status,
            error_code: status.as_u16(),
            error_message: message.into(),
            more_details: details.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn error_code(&self) -> u16 {
        self.error_code
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn more_details(&self) -> &str {
        &self.more_details
    }

    /// Pretty-printed JSON rendering.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// XML rendering with an `Error` root element.
    pub fn to_xml(&self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
             <Error>\n    \
             <status>{}</status>\n    \
             <errorCode>{}</errorCode>\n    \
             <errorMessage>{}</errorMessage>\n    \
             <moreDetails>{}</moreDetails>\n\
             </Error>\n",
            escape_xml(&status_name(self.status)),
            self.error_code,
            escape_xml(&self.error_message),
            escape_xml(&self.more_details),
        )
    }

    /// Pair the descriptor with the body format the client asked for.
    pub fn into_reply(self, format: ErrorFormat) -> ErrorReply {
        ErrorReply {
            error: self,
            format,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ApiError [status={}, errorMessage={}, errorCode={}, moreDetails={}]",
            status_name(self.status),
            self.error_message,
            self.error_code,
            self.more_details.trim_end()
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Upper-snake name of a status, e.g. `BAD_REQUEST`.
pub fn status_name(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => reason
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == ' ' || *c == '-')
            .map(|c| match c {
                ' ' | '-' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect(),
        None => status.as_str().to_string(),
    }
}

fn serialize_status<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&status_name(*status))
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Body format for error responses, negotiated from the `Accept` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorFormat {
    #[default]
    Json,
    Xml,
}

impl ErrorFormat {
    fn from_accept(accept: Option<&HeaderValue>) -> Self {
        let Some(accept) = accept.and_then(|v| v.to_str().ok()) else {
            return Self::Json;
        };

        // First listed media type wins; anything but XML gets JSON.
        let preferred = accept
            .split(',')
            .next()
            .and_then(|media| media.split(';').next())
            .map(str::trim)
            .unwrap_or_default();

        if preferred.eq_ignore_ascii_case(XML_CONTENT_TYPE) || preferred.eq_ignore_ascii_case("text/xml") {
            Self::Xml
        } else {
            Self::Json
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ErrorFormat {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_accept(parts.headers.get(header::ACCEPT)))
    }
}

/// An [`ApiError`] ready to be written in a negotiated format.
#[derive(Debug)]
pub struct ErrorReply {
    error: ApiError,
    format: ErrorFormat,
}

impl ErrorReply {
    pub fn error(&self) -> &ApiError {
        &self.error
    }
}

impl IntoResponse for ErrorReply {
    fn into_response(self) -> Response {
        match self.format {
            ErrorFormat::Json => self.error.into_response(),
            ErrorFormat::Xml => (
                self.error.status,
                [(header::CONTENT_TYPE, HeaderValue::from_static(XML_CONTENT_TYPE))],
                self.error.to_xml(),
            )
                .into_response(),
        }
    }
}
