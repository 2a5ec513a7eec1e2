//! Structural validation rules for a network configuration.
//!
//! # Checks (in output order)
//! - product model exists in the catalogue (hard failure: `NotFound`)
//! - node and appliance counts within the model's limits
//! - hostnames are valid RFC 1123 names and unique
//! - per segment: VLAN id, netmask, gateway, IP range capacity
//! - VLAN ids distinct across segments
//! - DNS and NTP servers are addresses or hostnames
//! - timezone is a known IANA identifier

use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::Arc;

use crate::error::{ServiceError, ServiceResult};
use crate::model::{
    CliOperationOutcome, NetworkConfiguration, NetworkSegment, ProductConfiguration,
    ProductModel,
};
use crate::services::timezone::is_known_time_zone;
use crate::services::NetworkValidator;

const MAX_VLAN_ID: u16 = 4094;
const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Validator backed by the product catalogue.
#[derive(Debug, Clone)]
pub struct DefaultNetworkValidator {
    products: Arc<ProductConfiguration>,
}

impl DefaultNetworkValidator {
    pub fn new(products: Arc<ProductConfiguration>) -> Self {
        Self { products }
    }

    fn check_counts(model: &ProductModel, config: &NetworkConfiguration) -> Vec<CliOperationOutcome> {
        let nodes = config.number_of_nodes;
        let node_outcome = if (model.min_nodes..=model.max_nodes).contains(&nodes) {
            CliOperationOutcome::pass("node count", format!("{nodes} nodes supported by {}", model.name))
        } else {
            CliOperationOutcome::fail(
                "node count",
                format!(
                    "{} supports {} to {} nodes, got {nodes}",
                    model.name, model.min_nodes, model.max_nodes
                ),
            )
        };

        let appliances = config.number_of_appliance;
        let appliance_outcome = if (1..=model.max_appliances).contains(&appliances) {
            CliOperationOutcome::pass("appliance count", format!("{appliances} appliances"))
        } else {
            CliOperationOutcome::fail(
                "appliance count",
                format!(
                    "{} supports 1 to {} appliances, got {appliances}",
                    model.name, model.max_appliances
                ),
            )
        };

        vec![node_outcome, appliance_outcome]
    }

    fn check_hostnames(config: &NetworkConfiguration) -> CliOperationOutcome {
        const OPERATION: &str = "hostnames";

        if config.hostnames.is_empty() {
            return CliOperationOutcome::warning(OPERATION, "no hostnames supplied");
        }

        let invalid: Vec<&str> = config
            .hostnames
            .iter()
            .map(String::as_str)
            .filter(|h| !is_valid_hostname(h))
            .collect();
        if !invalid.is_empty() {
            return CliOperationOutcome::fail(
                OPERATION,
                format!("invalid hostnames: {}", invalid.join(", ")),
            );
        }

        let mut seen = HashSet::new();
        let duplicates: Vec<&str> = config
            .hostnames
            .iter()
            .filter(|h| !seen.insert(h.to_ascii_lowercase()))
            .map(String::as_str)
            .collect();
        if !duplicates.is_empty() {
            return CliOperationOutcome::fail(
                OPERATION,
                format!("duplicate hostnames: {}", duplicates.join(", ")),
            );
        }

        let expected = config.host_count();
        if config.hostnames.len() as u64 != expected {
            return CliOperationOutcome::warning(
                OPERATION,
                format!(
                    "{} hostnames supplied for {expected} hosts",
                    config.hostnames.len()
                ),
            );
        }

        CliOperationOutcome::pass(OPERATION, format!("{} hostnames valid", config.hostnames.len()))
    }

    fn check_segment(name: &str, segment: &NetworkSegment, hosts: u64) -> Vec<CliOperationOutcome> {
        let mut outcomes = Vec::with_capacity(4);

        let vlan = format!("{name} vlan");
        outcomes.push(if segment.vlan_id <= MAX_VLAN_ID {
            CliOperationOutcome::pass(vlan, format!("VLAN {} is valid", segment.vlan_id))
        } else {
            CliOperationOutcome::fail(
                vlan,
                format!("VLAN {} outside 0-{MAX_VLAN_ID}", segment.vlan_id),
            )
        });

        let netmask_op = format!("{name} netmask");
        let (subnet, mask) = match (
            parse_addr(&segment.subnet),
            parse_addr(&segment.netmask),
        ) {
            (Some(subnet), Some(mask)) if is_contiguous_mask(mask) => {
                outcomes.push(CliOperationOutcome::pass(
                    netmask_op,
                    format!("{}/{}", segment.subnet, u32::from(mask).leading_ones()),
                ));
                (subnet, mask)
            }
            (Some(_), Some(_)) => {
                outcomes.push(CliOperationOutcome::fail(
                    netmask_op,
                    format!("netmask {} is not contiguous", segment.netmask),
                ));
                return outcomes;
            }
            _ => {
                outcomes.push(CliOperationOutcome::fail(
                    netmask_op,
                    format!(
                        "subnet '{}' or netmask '{}' is not an IPv4 address",
                        segment.subnet, segment.netmask
                    ),
                ));
                return outcomes;
            }
        };

        let gateway_op = format!("{name} gateway");
        outcomes.push(match parse_addr(&segment.gateway) {
            Some(gw) if in_subnet(gw, subnet, mask) => {
                CliOperationOutcome::pass(gateway_op, format!("gateway {gw} inside subnet"))
            }
            Some(gw) => CliOperationOutcome::fail(
                gateway_op,
                format!("gateway {gw} outside subnet {}", segment.subnet),
            ),
            None => CliOperationOutcome::fail(
                gateway_op,
                format!("gateway '{}' is not an IPv4 address", segment.gateway),
            ),
        });

        let range_op = format!("{name} ip range");
        outcomes.push(match (parse_addr(&segment.start_ip), parse_addr(&segment.end_ip)) {
            (Some(start), Some(end)) => {
                let (start_n, end_n) = (u32::from(start), u32::from(end));
                if !in_subnet(start, subnet, mask) || !in_subnet(end, subnet, mask) {
                    CliOperationOutcome::fail(
                        range_op,
                        format!("range {start}-{end} not inside subnet {}", segment.subnet),
                    )
                } else if start_n > end_n {
                    CliOperationOutcome::fail(range_op, format!("range start {start} is after end {end}"))
                } else {
                    let available = u64::from(end_n - start_n) + 1;
                    if available < hosts {
                        CliOperationOutcome::fail(
                            range_op,
                            format!("range holds {available} addresses, {hosts} hosts required"),
                        )
                    } else {
                        CliOperationOutcome::pass(
                            range_op,
                            format!("range {start}-{end} holds {available} addresses"),
                        )
                    }
                }
            }
            _ => CliOperationOutcome::fail(
                range_op,
                format!(
                    "range '{}'-'{}' is not a pair of IPv4 addresses",
                    segment.start_ip, segment.end_ip
                ),
            ),
        });

        outcomes
    }

    fn check_vlan_overlap(config: &NetworkConfiguration) -> Option<CliOperationOutcome> {
        let segments: Vec<_> = config.segments().collect();
        if segments.len() < 2 {
            return None;
        }

        let mut seen: Vec<(&str, u16)> = Vec::new();
        let mut shared = Vec::new();
        for (name, segment) in segments {
            if let Some((other, _)) = seen.iter().find(|(_, vlan)| *vlan == segment.vlan_id) {
                shared.push(format!("{other}/{name} share VLAN {}", segment.vlan_id));
            }
            seen.push((name, segment.vlan_id));
        }

        Some(if shared.is_empty() {
            CliOperationOutcome::pass("vlan overlap", "all segments use distinct VLANs")
        } else {
            CliOperationOutcome::warning("vlan overlap", shared.join(", "))
        })
    }

    fn check_servers(operation: &str, servers: &[String]) -> CliOperationOutcome {
        if servers.is_empty() {
            return CliOperationOutcome::warning(operation, "no servers supplied");
        }

        let invalid: Vec<&str> = servers
            .iter()
            .map(|s| s.trim())
            .filter(|s| parse_addr(s).is_none() && !is_valid_hostname(s))
            .collect();
        if invalid.is_empty() {
            CliOperationOutcome::pass(operation, format!("{} servers valid", servers.len()))
        } else {
            CliOperationOutcome::fail(operation, format!("invalid servers: {}", invalid.join(", ")))
        }
    }

    fn check_timezone(config: &NetworkConfiguration) -> CliOperationOutcome {
        match config.timezone.as_deref().map(str::trim) {
            None | Some("") => CliOperationOutcome::warning("timezone", "no timezone supplied"),
            Some(tz) if is_known_time_zone(tz) => {
                CliOperationOutcome::pass("timezone", format!("{tz} is a known timezone"))
            }
            Some(tz) => CliOperationOutcome::fail("timezone", format!("unknown timezone '{tz}'")),
        }
    }
}

impl NetworkValidator for DefaultNetworkValidator {
    fn validate_network_configuration(
        &self,
        config: &NetworkConfiguration,
    ) -> ServiceResult<Vec<CliOperationOutcome>> {
        let model = self.products.find(&config.product).ok_or_else(|| {
            ServiceError::not_found(format!("unknown product model '{}'", config.product))
        })?;

        let mut outcomes = vec![CliOperationOutcome::pass(
            "product",
            format!("product model {}", model.name),
        )];
        outcomes.extend(Self::check_counts(model, config));
        outcomes.push(Self::check_hostnames(config));

        let hosts = config.host_count();
        for (name, segment) in config.segments() {
            outcomes.extend(Self::check_segment(name, segment, hosts));
        }
        outcomes.extend(Self::check_vlan_overlap(config));

        outcomes.push(Self::check_servers("dns servers", &config.dns_servers));
        outcomes.push(Self::check_servers("ntp servers", &config.ntp_servers));
        outcomes.push(Self::check_timezone(config));

        tracing::debug!(
            product = %model.name,
            checks = outcomes.len(),
            failures = outcomes.iter().filter(|o| o.is_failure()).count(),
            "Network configuration validated"
        );

        Ok(outcomes)
    }
}

fn parse_addr(raw: &str) -> Option<Ipv4Addr> {
    raw.trim().parse().ok()
}

fn is_contiguous_mask(mask: Ipv4Addr) -> bool {
    let bits = u32::from(mask);
    bits.leading_ones() + bits.trailing_zeros() == 32
}

fn in_subnet(addr: Ipv4Addr, subnet: Ipv4Addr, mask: Ipv4Addr) -> bool {
    let mask = u32::from(mask);
    u32::from(addr) & mask == u32::from(subnet) & mask
}

/// RFC 1123 hostname check.
pub fn is_valid_hostname(name: &str) -> bool {
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.is_empty() || name.len() > MAX_HOSTNAME_LEN {
        return false;
    }
    name.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    })
}
