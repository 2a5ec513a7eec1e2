//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → NvtConfig (validated, immutable)
//!     → AppState built once at startup
//! ```
//!
//! # Design Decisions
//! - All fields have defaults; running without a file is supported
//! - Validation separates syntactic (serde) from semantic checks
//! - Template and product catalogue files are JSON, loaded once

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{
    load_config, load_products, load_template, override_bind_address, ConfigError,
};
pub use schema::{
    ErrorConfig, ListenerConfig, NvtConfig, ObservabilityConfig, SecurityConfig, ServicesConfig,
    TimeoutConfig,
};
