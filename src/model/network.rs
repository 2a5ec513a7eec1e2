//! Network configuration payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// A cluster's network configuration as submitted by the UI.
///
/// Fields the service does not know about are kept in `extra` so the payload
/// passes through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkConfiguration {
    /// Product model name, looked up in the product catalogue.
    pub product: String,
    pub number_of_appliance: u32,
    pub number_of_nodes: u32,
    pub hostnames: Vec<String>,
    pub management: Option<NetworkSegment>,
    pub vmotion: Option<NetworkSegment>,
    pub vsan: Option<NetworkSegment>,
    pub dns_servers: Vec<String>,
    pub ntp_servers: Vec<String>,
    /// IANA timezone identifier.
    pub timezone: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NetworkConfiguration {
    /// Built-in template served by `/nvt/template` when no file is configured.
    pub fn template() -> Self {
        Self {
            product: "E560".to_string(),
            number_of_appliance: 1,
            number_of_nodes: 4,
            hostnames: (1..=4).map(|i| format!("esx-{i:02}.local")).collect(),
            management: Some(NetworkSegment::new(
                0,
                "192.168.10.0",
                "255.255.255.0",
                "192.168.10.1",
                "192.168.10.100",
                "192.168.10.150",
            )),
            vmotion: Some(NetworkSegment::new(
                20,
                "192.168.20.0",
                "255.255.255.0",
                "192.168.20.1",
                "192.168.20.100",
                "192.168.20.150",
            )),
            vsan: Some(NetworkSegment::new(
                30,
                "192.168.30.0",
                "255.255.255.0",
                "192.168.30.1",
                "192.168.30.100",
                "192.168.30.150",
            )),
            dns_servers: vec!["192.168.10.2".to_string()],
            ntp_servers: vec!["pool.ntp.org".to_string()],
            timezone: Some("UTC".to_string()),
            extra: Map::new(),
        }
    }

    /// Total host count implied by the appliance and node counts.
    pub fn host_count(&self) -> u64 {
        u64::from(self.number_of_appliance) * u64::from(self.number_of_nodes)
    }

    /// Named segments that are present, in declaration order.
    pub fn segments(&self) -> impl Iterator<Item = (&'static str, &NetworkSegment)> {
        [
            ("management", self.management.as_ref()),
            ("vmotion", self.vmotion.as_ref()),
            ("vsan", self.vsan.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, segment)| segment.map(|s| (name, s)))
    }
}

/// One IPv4 network (management, vMotion, vSAN).
///
/// Addresses stay strings so bad values surface as validation outcomes
/// instead of parse failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkSegment {
    pub vlan_id: u16,
    pub subnet: String,
    pub netmask: String,
    pub gateway: String,
    pub start_ip: String,
    pub end_ip: String,
}

impl NetworkSegment {
    pub fn new(
        vlan_id: u16,
        subnet: &str,
        netmask: &str,
        gateway: &str,
        start_ip: &str,
        end_ip: &str,
    ) -> Self {
        Self {
            vlan_id,
            subnet: subnet.to_string(),
            netmask: netmask.to_string(),
            gateway: gateway.to_string(),
            start_ip: start_ip.to_string(),
            end_ip: end_ip.to_string(),
        }
    }
}

/// Reference to a JSON file on the server to import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonImportPath {
    pub path: PathBuf,
}

/// Where a generated report was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_fields_pass_through() {
        let raw = r#"{
            "product": "E560",
            "numberOfNodes": 3,
            "witness": {"ip": "10.0.0.9"}
        }"#;
        let config: NetworkConfiguration = serde_json::from_str(raw).unwrap();

        assert_eq!(config.product, "E560");
        assert_eq!(config.number_of_nodes, 3);
        assert_eq!(config.number_of_appliance, 0);
        assert_eq!(config.extra["witness"]["ip"], "10.0.0.9");

        let back = serde_json::to_value(&config).unwrap();
        assert_eq!(back["witness"]["ip"], "10.0.0.9");
        assert_eq!(back["numberOfNodes"], 3);
    }

    #[test]
    fn test_segments_skip_missing() {
        let mut config = NetworkConfiguration::template();
        config.vmotion = None;

        let names: Vec<_> = config.segments().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["management", "vsan"]);
    }

    #[test]
    fn test_template_host_count() {
        let template = NetworkConfiguration::template();
        assert_eq!(template.host_count(), 4);
        assert_eq!(template.hostnames.len(), 4);
    }
}
