//! Import a configuration file from the server's filesystem.

use std::fs;
use std::io;
use std::sync::Arc;

use crate::error::{ServiceError, ServiceResult};
use crate::model::{CliOperationOutcome, JsonImportPath, NetworkConfiguration};
use crate::services::{JsonImporter, NetworkValidator};

/// Reads a JSON configuration file and runs it through the validator.
#[derive(Clone)]
pub struct FileJsonImporter {
    validator: Arc<dyn NetworkValidator>,
}

impl FileJsonImporter {
    pub fn new(validator: Arc<dyn NetworkValidator>) -> Self {
        Self { validator }
    }
}

impl JsonImporter for FileJsonImporter {
    fn import_json_directly(&self, import: &JsonImportPath) -> ServiceResult<Vec<CliOperationOutcome>> {
        if import.path.as_os_str().is_empty() {
            return Err(ServiceError::invalid_input("import path must not be empty"));
        }

        let path = import.path.display();
        let content = fs::read_to_string(&import.path)
            .map_err(|e| read_error(&path.to_string(), e))?;

        let config: NetworkConfiguration = serde_json::from_str(&content).map_err(|e| {
            ServiceError::invalid_input_with(format!("{path} is not a valid network configuration"), e)
        })?;

        tracing::info!(path = %path, product = %config.product, "Imported network configuration");

        self.validator.validate_network_configuration(&config)
    }
}

/// Classify a failed read of the import file.
fn read_error(path: &str, e: io::Error) -> ServiceError {
    match e.kind() {
        io::ErrorKind::NotFound => ServiceError::not_found_with(format!("{path} does not exist"), e),
        io::ErrorKind::PermissionDenied => ServiceError::authorization_denied(format!(
            "{path} is not readable: {e}"
        )),
        _ => ServiceError::internal_with(format!("failed to read {path}"), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::ProductConfiguration;
    use crate::services::DefaultNetworkValidator;
    use std::io::Write;

    fn importer() -> FileJsonImporter {
        let validator = DefaultNetworkValidator::new(Arc::new(ProductConfiguration::default()));
        FileJsonImporter::new(Arc::new(validator))
    }

    #[test]
    fn test_imports_and_validates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let body = serde_json::to_string(&NetworkConfiguration::template()).unwrap();
        file.write_all(body.as_bytes()).unwrap();

        let outcomes = importer()
            .import_json_directly(&JsonImportPath {
                path: file.path().to_path_buf(),
            })
            .unwrap();
        assert_eq!(outcomes[0].operation, "product");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = importer()
            .import_json_directly(&JsonImportPath {
                path: dir.path().join("absent.json"),
            })
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[test]
    fn test_read_errors_are_classified() {
        let denied = read_error("/etc/nvt.json", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(denied.kind(), ErrorKind::AuthorizationDenied);
        assert!(denied.to_string().contains("/etc/nvt.json"));

        let missing = read_error("/etc/nvt.json", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(missing.kind(), ErrorKind::NotFound);

        let other = read_error("/etc/nvt.json", io::Error::from(io::ErrorKind::InvalidData));
        assert_eq!(other.kind(), ErrorKind::Internal);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_is_denied() {
        use std::os::unix::fs::PermissionsExt;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{}").unwrap();
        fs::set_permissions(file.path(), fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users bypass mode bits.
        if fs::read(file.path()).is_ok() {
            return;
        }

        let err = importer()
            .import_json_directly(&JsonImportPath {
                path: file.path().to_path_buf(),
            })
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AuthorizationDenied);
    }

    #[test]
    fn test_malformed_file_is_invalid_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = importer()
            .import_json_directly(&JsonImportPath {
                path: file.path().to_path_buf(),
            })
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput { .. }));
    }
}
