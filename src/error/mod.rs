//! Error handling subsystem.
//!
//! # Data Flow
//! ```text
//! service call fails
//!     → ServiceError (tagged by kind)
//!     → mapper.rs (kind → HTTP status via StatusTable, diagnostic excerpt)
//!     → api_error.rs (ApiError descriptor, JSON or XML body)
//!     → client
//! ```
//!
//! # Design Decisions
//! - Services classify their own failures; the HTTP layer never inspects
//!   concrete error types
//! - The status table is built once and carried in the application state
//! - Mapping is pure; callers decide what to log

pub mod api_error;
pub mod mapper;

pub use api_error::{ApiError, ErrorFormat, ErrorReply};
pub use mapper::{describe, ErrorMapper, StatusTable};

use std::error::Error as StdError;

/// Boxed underlying cause attached to a [`ServiceError`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Classification of a service failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    AuthorizationDenied,
    InvalidInput,
    NotFound,
    Internal,
}

/// Error raised by the validation services and the request parsing helpers.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Caller is not allowed to perform the operation.
    #[error("access denied: {message}")]
    AuthorizationDenied { message: String },

    /// Malformed payload or illegal argument.
    #[error("{message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// A referenced resource (file, product model) does not exist.
    #[error("{message}")]
    NotFound {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Anything else.
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl ServiceError {
    pub fn authorization_denied(message: impl Into<String>) -> Self {
        Self::AuthorizationDenied {
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            source: None,
        }
    }

    pub fn invalid_input_with(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            source: None,
        }
    }

    pub fn not_found_with(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::NotFound {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    pub fn internal_with(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The classification used for status lookup.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AuthorizationDenied { .. } => ErrorKind::AuthorizationDenied,
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }
}

/// Result alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
