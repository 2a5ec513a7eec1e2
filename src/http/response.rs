//! Response helpers.

use axum::http::{header, HeaderName, HeaderValue};

/// Origin allowed on the validation endpoint.
pub const ALL_DOMAINS: &str = "*";

/// `Access-Control-Allow-Origin: *` as response parts.
pub fn cors_allow_all() -> [(HeaderName, HeaderValue); 1] {
    [(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALL_DOMAINS),
    )]
}
