//! Error classification and diagnostic rendering.
//!
//! # Responsibilities
//! - Map an [`ErrorKind`] to an HTTP status through a [`StatusTable`]
//! - Render a bounded diagnostic excerpt from an error and its causes
//! - Build [`ApiError`] descriptors for handlers

use axum::http::StatusCode;
use std::collections::HashMap;
use std::error::Error as StdError;

use crate::error::{ApiError, ErrorKind, ServiceError};

/// Lookup table from error kind to HTTP status.
///
/// Kinds without a registration map to `500 Internal Server Error`.
#[derive(Debug, Clone)]
pub struct StatusTable {
    statuses: HashMap<ErrorKind, StatusCode>,
}

impl StatusTable {
    /// A table with no registrations; every kind classifies as 500.
    pub fn empty() -> Self {
        Self {
            statuses: HashMap::new(),
        }
    }

    /// Register (or replace) the status for a kind.
    pub fn register(mut self, kind: ErrorKind, status: StatusCode) -> Self {
        self.statuses.insert(kind, status);
        self
    }

    pub fn status_for(&self, kind: ErrorKind) -> StatusCode {
        self.statuses
            .get(&kind)
            .copied()
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn classify(&self, err: &ServiceError) -> StatusCode {
        self.status_for(err.kind())
    }
}

impl Default for StatusTable {
    fn default() -> Self {
        Self::empty()
            .register(ErrorKind::AuthorizationDenied, StatusCode::FORBIDDEN)
            .register(ErrorKind::InvalidInput, StatusCode::BAD_REQUEST)
            // A missing source file is reported as a bad request, not 404.
            .register(ErrorKind::NotFound, StatusCode::BAD_REQUEST)
            .register(ErrorKind::Internal, StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Render up to `max_lines` lines describing `err` and its source chain.
///
/// The first line is the error itself; each cause follows as
/// `caused by: ...`. Every returned line ends with `\n`.
pub fn describe(err: &(dyn StdError + 'static), max_lines: usize) -> String {
    let mut lines = Vec::new();

    for (depth, cause) in std::iter::successors(Some(err), |e| (*e).source()).enumerate() {
        let text = cause.to_string();
        for (i, line) in text.lines().enumerate() {
            if depth > 0 && i == 0 {
                lines.push(format!("caused by: {line}"));
            } else {
                lines.push(line.to_string());
            }
        }
        if lines.len() >= max_lines {
            break;
        }
    }

    lines.into_iter().take(max_lines).fold(String::new(), |mut out, line| {
        out.push_str(&line);
        out.push('\n');
        out
    })
}

/// Constructed-once error mapping configuration shared by all handlers.
#[derive(Debug, Clone)]
pub struct ErrorMapper {
    table: StatusTable,
    detail_lines: usize,
}

impl ErrorMapper {
    pub fn new(table: StatusTable, detail_lines: usize) -> Self {
        Self {
            table,
            detail_lines,
        }
    }

    pub fn classify(&self, err: &ServiceError) -> StatusCode {
        self.table.classify(err)
    }

    pub fn table(&self) -> &StatusTable {
        &self.table
    }

    /// Descriptor whose message is the first line of the error itself.
    pub fn from_error(&self, err: &ServiceError) -> ApiError {
        let message = describe(err, 1);
        self.with_message(message.trim_end(), err)
    }

    /// Descriptor with a caller-chosen message and details taken from `err`.
    pub fn with_message(&self, message: &str, err: &ServiceError) -> ApiError {
        ApiError::new(
            self.classify(err),
            message,
            describe(err, self.detail_lines),
        )
    }
}

impl Default for ErrorMapper {
    fn default() -> Self {
        Self::new(StatusTable::default(), 3)
    }
}
