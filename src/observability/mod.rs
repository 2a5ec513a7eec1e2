//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers and services
//!     → tracing events with structured fields
//!     → logging.rs (EnvFilter + fmt layer)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) attached by middleware and recorded on each
//!   request span (`http::request::request_span`)
//! - `RUST_LOG` overrides the configured level

pub mod logging;
