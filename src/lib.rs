//! Network Validation Tool REST API library.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod observability;
pub mod services;

pub use config::schema::NvtConfig;
pub use http::{AppState, HttpServer};
pub use lifecycle::Shutdown;
