//! Services called by the HTTP handlers.
//!
//! # Data Flow
//! ```text
//! handler
//!     → NetworkValidator    (validator.rs)  config → outcomes
//!     → JsonImporter        (importer.rs)   file path → config → outcomes
//!     → HostnamePreviewer   (hostnames.rs)  naming template → hostnames
//!     → ReportGenerator     (report.rs)     config → report file location
//!     → TimeZoneLister      (timezone.rs)   → IANA identifiers
//! ```
//!
//! # Design Decisions
//! - One shared instance per service, held as `Arc<dyn Trait>` in the
//!   application state; implementations keep no request-scoped state
//! - Calls are synchronous; file-touching calls run on the blocking pool
//! - Failures are classified with [`ServiceError`] kinds

pub mod hostnames;
pub mod importer;
pub mod report;
pub mod timezone;
pub mod validator;

pub use hostnames::{IteratorKind, TemplateHostnamePreviewer};
pub use importer::FileJsonImporter;
pub use report::FileReportGenerator;
pub use timezone::TzdbTimeZoneLister;
pub use validator::DefaultNetworkValidator;

use crate::error::ServiceResult;
use crate::model::{
    CliOperationOutcome, HostnameRequest, HostnameResponse, JsonImportPath, Location,
    NetworkConfiguration,
};

/// Runs the validation rules over a configuration.
pub trait NetworkValidator: Send + Sync {
    /// One outcome per check, in a stable order.
    ///
    /// Fails with `NotFound` when the configuration names an unknown product.
    fn validate_network_configuration(
        &self,
        config: &NetworkConfiguration,
    ) -> ServiceResult<Vec<CliOperationOutcome>>;
}

/// Imports a configuration from a file on the server and validates it.
pub trait JsonImporter: Send + Sync {
    fn import_json_directly(&self, path: &JsonImportPath) -> ServiceResult<Vec<CliOperationOutcome>>;
}

/// Dry-run hostname generation.
pub trait HostnamePreviewer: Send + Sync {
    fn preview(&self, request: &HostnameRequest) -> ServiceResult<Vec<HostnameResponse>>;
}

/// Writes a validation report for a configuration.
pub trait ReportGenerator: Send + Sync {
    fn generate_json_report(&self, config: &NetworkConfiguration) -> ServiceResult<Location>;
}

pub trait TimeZoneLister: Send + Sync {
    fn list_time_zones(&self) -> Vec<String>;
}
