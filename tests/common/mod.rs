//! Shared helpers for the router integration tests.

use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use nvt_api::error::{ServiceError, ServiceResult};
use nvt_api::http::build_router;
use nvt_api::model::{
    CliOperationOutcome, HostnameRequest, HostnameResponse, JsonImportPath, Location,
    NetworkConfiguration,
};
use nvt_api::services::{
    HostnamePreviewer, JsonImporter, NetworkValidator, ReportGenerator, TemplateHostnamePreviewer,
};
use nvt_api::{AppState, NvtConfig};

/// Captured response parts.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

#[allow(dead_code)]
impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("body should be JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// State built from the default configuration, reports in `report_dir`.
pub fn test_state(report_dir: &std::path::Path) -> AppState {
    let mut config = NvtConfig::default();
    config.services.report_dir = report_dir.to_path_buf();
    AppState::from_config(&config).expect("default state")
}

pub fn router(state: AppState) -> Router {
    build_router(&NvtConfig::default(), state)
}

/// Router with a request body limit of `max_body_size` bytes.
#[allow(dead_code)]
pub fn router_with_body_limit(state: AppState, max_body_size: usize) -> Router {
    let mut config = NvtConfig::default();
    config.security.max_body_size = max_body_size;
    build_router(&config, state)
}

/// Send one request through the router.
pub async fn send(
    router: Router,
    method: Method,
    uri: &str,
    headers: &[(&str, &str)],
    body: impl Into<Body>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = builder.body(body.into()).unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

/// Previewer that records the request it was called with.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingPreviewer {
    pub calls: Mutex<Vec<HostnameRequest>>,
}

impl HostnamePreviewer for RecordingPreviewer {
    fn preview(&self, request: &HostnameRequest) -> ServiceResult<Vec<HostnameResponse>> {
        self.calls.lock().unwrap().push(request.clone());
        TemplateHostnamePreviewer::new().preview(request)
    }
}

/// Report generator that always fails.
#[allow(dead_code)]
pub struct FailingReports;

impl ReportGenerator for FailingReports {
    fn generate_json_report(&self, _config: &NetworkConfiguration) -> ServiceResult<Location> {
        Err(ServiceError::internal("mapping failure"))
    }
}

#[allow(dead_code)]
pub fn with_previewer(mut state: AppState, previewer: Arc<RecordingPreviewer>) -> AppState {
    let previewer: Arc<dyn HostnamePreviewer> = previewer;
    state.previewer = previewer;
    state
}

/// Importer that fails every call with a fixed error.
#[allow(dead_code)]
pub struct FailingImporter(pub fn() -> ServiceError);

impl JsonImporter for FailingImporter {
    fn import_json_directly(&self, _import: &JsonImportPath) -> ServiceResult<Vec<CliOperationOutcome>> {
        Err((self.0)())
    }
}

/// Validator that fails every call with a fixed error.
#[allow(dead_code)]
pub struct FailingValidator(pub fn() -> ServiceError);

impl NetworkValidator for FailingValidator {
    fn validate_network_configuration(
        &self,
        _config: &NetworkConfiguration,
    ) -> ServiceResult<Vec<CliOperationOutcome>> {
        Err((self.0)())
    }
}
