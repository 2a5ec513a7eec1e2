//! Hostname preview request and response.

use serde::{Deserialize, Serialize};

/// Naming template for a hostname preview.
///
/// Deserialized from the query string of `/nvt/management/Hostnames`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostnameRequest {
    pub prefix: String,
    pub separator: String,
    /// Iterator kind: `numeric` or `alpha`.
    pub iterator: String,
    /// Starting value of the iterator; kept as text so bad values map to a 400.
    #[serde(default)]
    pub offset: Option<String>,
    #[serde(default)]
    pub postfix: Option<String>,
    pub tld: String,
    pub number_of_appliance: u32,
    pub number_of_nodes: u32,
}

/// One generated hostname and its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostnameResponse {
    pub hostname: String,
    pub position: u32,
}
