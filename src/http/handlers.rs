//! Handlers for the `/nvt` routes.
//!
//! | Route | Method | Failure handling |
//! |---|---|---|
//! | `/jsonfile` | POST | mapped error, fixed "invalid JSON format" message |
//! | `/management/Hostnames` | GET | mapped error |
//! | `/management/validate` | POST | `[]` + 400 (parse failure or unknown product) |
//! | `/template` | GET | none |
//! | `/report` | POST | `null` body with 200 on generation failure |
//! | `/timezone` | GET | none |

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{ErrorFormat, ErrorKind, ErrorReply, ServiceError, ServiceResult};
use crate::http::request::{parse_json_body, read_body};
use crate::http::response::cors_allow_all;
use crate::http::server::AppState;
use crate::model::{
    CliOperationOutcome, HostnameRequest, HostnameResponse, JsonImportPath, Location,
    NetworkConfiguration,
};

pub const INVALID_JSON_FORMAT: &str = "Invalid JSON format in REST API call";

const VALIDATION_STARTED: &str = "Validating network configuration";
const VALIDATION_COMPLETED: &str = "Network configuration validation complete";

/// Run a service call on the blocking pool.
async fn run_blocking<T, F>(f: F) -> ServiceResult<T>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServiceError::internal_with("service task failed", e))?
}

/// POST /nvt/jsonfile
pub async fn import_json_file(
    State(state): State<AppState>,
    format: ErrorFormat,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Vec<CliOperationOutcome>>, ErrorReply> {
    let result = match read_body(body).and_then(|body| parse_json_body::<JsonImportPath>(&body)) {
        Ok(import) => {
            let importer = state.importer.clone();
            run_blocking(move || importer.import_json_directly(&import)).await
        }
        Err(err) => Err(err),
    };

    result.map(Json).map_err(|err| {
        tracing::error!(error = %err, "JSON import failed");
        state
            .errors
            .with_message(INVALID_JSON_FORMAT, &err)
            .into_reply(format)
    })
}

/// GET /nvt/management/Hostnames
pub async fn preview_hostnames(
    State(state): State<AppState>,
    format: ErrorFormat,
    query: Result<Query<HostnameRequest>, QueryRejection>,
) -> Result<Json<Vec<HostnameResponse>>, ErrorReply> {
    let result = match query {
        Ok(Query(request)) => state.previewer.preview(&request),
        Err(rejection) => Err(ServiceError::invalid_input(format!(
            "invalid hostname preview parameters: {}",
            rejection.body_text()
        ))),
    };

    result.map(Json).map_err(|err| {
        tracing::debug!(error = %err, "Hostname preview rejected");
        state.errors.from_error(&err).into_reply(format)
    })
}

/// POST /nvt/management/validate
pub async fn validate_network_configuration(
    State(state): State<AppState>,
    format: ErrorFormat,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    tracing::info!("{VALIDATION_STARTED}");

    let config: NetworkConfiguration = match read_body(body).and_then(|body| parse_json_body(&body)) {
        Ok(config) => config,
        Err(err) => {
            tracing::debug!(error = %err, "Rejected validation request body");
            let status = state.errors.classify(&err);
            return (status, Json(Vec::<CliOperationOutcome>::new())).into_response();
        }
    };

    match state.validator.validate_network_configuration(&config) {
        Ok(outcomes) => {
            tracing::info!(checks = outcomes.len(), "{VALIDATION_COMPLETED}");
            (StatusCode::OK, cors_allow_all(), Json(outcomes)).into_response()
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(error = %err, "Validation source not found");
            (
                StatusCode::BAD_REQUEST,
                cors_allow_all(),
                Json(Vec::<CliOperationOutcome>::new()),
            )
                .into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "Validation failed");
            state.errors.from_error(&err).into_reply(format).into_response()
        }
    }
}

/// GET /nvt/template
pub async fn network_configuration_template(
    State(state): State<AppState>,
) -> Json<NetworkConfiguration> {
    Json(NetworkConfiguration::clone(&state.template))
}

/// POST /nvt/report
///
/// Generation failures are logged and answered with a `null` body and 200,
/// unlike every other route.
pub async fn generate_report(
    State(state): State<AppState>,
    format: ErrorFormat,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Option<Location>>, ErrorReply> {
    let config: NetworkConfiguration = read_body(body)
        .and_then(|body| parse_json_body(&body))
        .map_err(|err| state.errors.from_error(&err).into_reply(format))?;

    let reports = state.reports.clone();
    let location = match run_blocking(move || reports.generate_json_report(&config)).await {
        Ok(location) => Some(location),
        Err(err) => {
            tracing::debug!(error = %err, "Report generation failed");
            None
        }
    };

    Ok(Json(location))
}

/// GET /nvt/timezone
pub async fn time_zones(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.time_zones.list_time_zones())
}
