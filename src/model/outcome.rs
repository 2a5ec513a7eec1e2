//! Per-check validation results.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutcomeStatus {
    Pass,
    Fail,
    Warning,
}

/// Result of one validation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliOperationOutcome {
    /// Name of the check, e.g. `management gateway`.
    pub operation: String,
    pub status: OutcomeStatus,
    pub message: String,
}

impl CliOperationOutcome {
    pub fn new(operation: impl Into<String>, status: OutcomeStatus, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status,
            message: message.into(),
        }
    }

    pub fn pass(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(operation, OutcomeStatus::Pass, message)
    }

    pub fn fail(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(operation, OutcomeStatus::Fail, message)
    }

    pub fn warning(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(operation, OutcomeStatus::Warning, message)
    }

    pub fn is_failure(&self) -> bool {
        self.status == OutcomeStatus::Fail
    }
}
