//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, /nvt routes)
//!     → request.rs (request ID, JSON body parsing)
//!     → handlers.rs (call services, map errors)
//!     → response.rs (CORS header)
//!     → client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{build_router, AppState, HttpServer};
