//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the application state once from configuration
//! - Create Axum Router with the `/nvt` handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Serve on a listener until shutdown

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{load_products, load_template, ConfigError, NvtConfig};
use crate::error::{ErrorMapper, StatusTable};
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, request_span, set_request_id_layer};
use crate::lifecycle::ShutdownSignal;
use crate::model::NetworkConfiguration;
use crate::services::{
    DefaultNetworkValidator, FileJsonImporter, FileReportGenerator, HostnamePreviewer,
    JsonImporter, NetworkValidator, ReportGenerator, TemplateHostnamePreviewer, TimeZoneLister,
    TzdbTimeZoneLister,
};

/// Application state injected into handlers.
///
/// Everything here is shared and read-only; handlers never mutate it.
#[derive(Clone)]
pub struct AppState {
    pub validator: Arc<dyn NetworkValidator>,
    pub importer: Arc<dyn JsonImporter>,
    pub previewer: Arc<dyn HostnamePreviewer>,
    pub reports: Arc<dyn ReportGenerator>,
    pub time_zones: Arc<dyn TimeZoneLister>,
    pub template: Arc<NetworkConfiguration>,
    pub errors: Arc<ErrorMapper>,
}

impl AppState {
    /// Build the default services, loading template and catalogue files.
    pub fn from_config(config: &NvtConfig) -> Result<Self, ConfigError> {
        let services = &config.services;
        let products = Arc::new(load_products(services.products_path.as_deref())?);
        let template = Arc::new(load_template(services.template_path.as_deref())?);

        let validator: Arc<dyn NetworkValidator> = Arc::new(DefaultNetworkValidator::new(products));

        Ok(Self {
            importer: Arc::new(FileJsonImporter::new(validator.clone())),
            reports: Arc::new(FileReportGenerator::new(
                services.report_dir.clone(),
                validator.clone(),
            )),
            previewer: Arc::new(TemplateHostnamePreviewer::new()),
            time_zones: Arc::new(TzdbTimeZoneLister::new()),
            validator,
            template,
            errors: Arc::new(ErrorMapper::new(
                StatusTable::default(),
                config.errors.detail_lines,
            )),
        })
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &NvtConfig, state: AppState) -> Router {
    let nvt = Router::new()
        .route("/jsonfile", post(handlers::import_json_file))
        .route("/management/Hostnames", get(handlers::preview_hostnames))
        .route(
            "/management/validate",
            post(handlers::validate_network_configuration),
        )
        .route("/template", get(handlers::network_configuration_template))
        .route("/report", post(handlers::generate_report))
        .route("/timezone", get(handlers::time_zones));

    Router::new()
        .nest("/nvt", nvt)
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.security.max_body_size))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(set_request_id_layer())
}

/// HTTP server for the validation API.
pub struct HttpServer {
    router: Router,
    config: NvtConfig,
}

impl HttpServer {
    /// Create a server with the default services.
    pub fn new(config: NvtConfig) -> Result<Self, ConfigError> {
        let state = AppState::from_config(&config)?;
        Ok(Self::with_state(config, state))
    }

    /// Create a server around an existing state.
    pub fn with_state(config: NvtConfig, state: AppState) -> Self {
        let router = build_router(&config, state);
        Self { router, config }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener, shutdown: ShutdownSignal) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.recv())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &NvtConfig {
        &self.config
    }

    /// A clone of the router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}
