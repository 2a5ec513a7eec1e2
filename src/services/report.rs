//! JSON report generation.

use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::model::{CliOperationOutcome, Location, NetworkConfiguration};
use crate::services::{NetworkValidator, ReportGenerator};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    generated_at: String,
    configuration: &'a NetworkConfiguration,
    outcomes: Vec<CliOperationOutcome>,
}

/// Writes `nvt-report-<uuid>.json` files into a directory.
#[derive(Clone)]
pub struct FileReportGenerator {
    report_dir: PathBuf,
    validator: Arc<dyn NetworkValidator>,
}

impl FileReportGenerator {
    pub fn new(report_dir: impl Into<PathBuf>, validator: Arc<dyn NetworkValidator>) -> Self {
        Self {
            report_dir: report_dir.into(),
            validator,
        }
    }
}

impl ReportGenerator for FileReportGenerator {
    fn generate_json_report(&self, config: &NetworkConfiguration) -> ServiceResult<Location> {
        let outcomes = self.validator.validate_network_configuration(config)?;

        let report = Report {
            generated_at: jiff::Timestamp::now().to_string(),
            configuration: config,
            outcomes,
        };
        let body = serde_json::to_vec_pretty(&report)
            .map_err(|e| ServiceError::internal_with("failed to serialize report", e))?;

        fs::create_dir_all(&self.report_dir).map_err(|e| {
            ServiceError::internal_with(
                format!("failed to create report directory {}", self.report_dir.display()),
                e,
            )
        })?;

        let path = self.report_dir.join(format!("nvt-report-{}.json", Uuid::new_v4()));
        fs::write(&path, body).map_err(|e| {
            ServiceError::internal_with(format!("failed to write report {}", path.display()), e)
        })?;

        tracing::info!(path = %path.display(), "Report generated");
        Ok(Location { path })
    }
}
