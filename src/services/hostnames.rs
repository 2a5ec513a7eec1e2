//! Hostname preview from a naming template.
//!
//! Names are built as `{prefix}{sep}{iter}[{sep}{postfix}].{tld}`, one per
//! host, for `numberOfAppliance × numberOfNodes` hosts.

use std::str::FromStr;

use crate::error::{ServiceError, ServiceResult};
use crate::model::{HostnameRequest, HostnameResponse};
use crate::services::HostnamePreviewer;

/// Upper bound on generated names per preview.
pub const MAX_PREVIEW_HOSTS: u64 = 4096;

const DEFAULT_OFFSET: u64 = 1;

/// How the per-host counter is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IteratorKind {
    /// Decimal, zero-padded to two digits; starts at 1 unless offset given.
    Numeric,
    /// `a..z, aa, ab, ...`; offset is a 1-based index into that sequence.
    Alpha,
}

impl FromStr for IteratorKind {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "numeric" | "num" | "number" => Ok(Self::Numeric),
            "alpha" | "alphabetic" => Ok(Self::Alpha),
            other => Err(ServiceError::invalid_input(format!(
                "unknown iterator kind '{other}', expected 'numeric' or 'alpha'"
            ))),
        }
    }
}

impl IteratorKind {
    fn render(self, value: u64) -> String {
        match self {
            Self::Numeric => format!("{value:02}"),
            Self::Alpha => alpha_label(value),
        }
    }
}

/// Bijective base-26 label for a 1-based index: 1 → `a`, 27 → `aa`.
fn alpha_label(mut index: u64) -> String {
    let mut label = Vec::new();
    while index > 0 {
        index -= 1;
        label.push(b'a' + (index % 26) as u8);
        index /= 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

/// Default previewer; stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateHostnamePreviewer;

impl TemplateHostnamePreviewer {
    pub fn new() -> Self {
        Self
    }
}

impl HostnamePreviewer for TemplateHostnamePreviewer {
    fn preview(&self, request: &HostnameRequest) -> ServiceResult<Vec<HostnameResponse>> {
        let prefix = request.prefix.trim();
        if prefix.is_empty() {
            return Err(ServiceError::invalid_input("prefix must not be empty"));
        }
        let tld = request.tld.trim().trim_start_matches('.');
        if tld.is_empty() {
            return Err(ServiceError::invalid_input("tld must not be empty"));
        }
        let kind: IteratorKind = request.iterator.parse()?;

        let offset = match request.offset.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_OFFSET,
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                ServiceError::invalid_input_with(format!("offset '{raw}' is not a number"), e)
            })?,
        };
        if kind == IteratorKind::Alpha && offset == 0 {
            return Err(ServiceError::invalid_input("alpha offset starts at 1"));
        }

        let count = u64::from(request.number_of_appliance) * u64::from(request.number_of_nodes);
        if count == 0 {
            return Err(ServiceError::invalid_input(
                "numberOfAppliance and numberOfNodes must be at least 1",
            ));
        }
        if count > MAX_PREVIEW_HOSTS {
            return Err(ServiceError::invalid_input(format!(
                "preview limited to {MAX_PREVIEW_HOSTS} hosts, requested {count}"
            )));
        }
        if offset.checked_add(count).is_none() {
            return Err(ServiceError::invalid_input(format!("offset {offset} is too large")));
        }

        let postfix = request
            .postfix
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty());
        let sep = request.separator.as_str();

        let hostnames = (0..count)
            .map(|i| {
                let mut hostname = format!("{prefix}{sep}{}", kind.render(offset + i));
                if let Some(postfix) = postfix {
                    hostname.push_str(sep);
                    hostname.push_str(postfix);
                }
                hostname.push('.');
                hostname.push_str(tld);
                HostnameResponse {
                    hostname,
                    position: (i + 1) as u32,
                }
            })
            .collect();

        Ok(hostnames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(iterator: &str) -> HostnameRequest {
        HostnameRequest {
            prefix: "esx".into(),
            separator: "-".into(),
            iterator: iterator.into(),
            offset: None,
            postfix: None,
            tld: "local".into(),
            number_of_appliance: 2,
            number_of_nodes: 4,
        }
    }

    fn names(result: Vec<HostnameResponse>) -> Vec<String> {
        result.into_iter().map(|h| h.hostname).collect()
    }

    #[test]
    fn test_numeric_preview() {
        let result = TemplateHostnamePreviewer.preview(&request("numeric")).unwrap();
        assert_eq!(result.len(), 8);
        assert_eq!(result[0].hostname, "esx-01.local");
        assert_eq!(result[0].position, 1);
        assert_eq!(result[7].hostname, "esx-08.local");
        assert_eq!(result[7].position, 8);
    }

    #[test]
    fn test_offset_and_postfix() {
        let mut req = request("numeric");
        req.offset = Some("10".into());
        req.postfix = Some("rack1".into());
        req.number_of_appliance = 1;
        req.number_of_nodes = 2;

        let result = names(TemplateHostnamePreviewer.preview(&req).unwrap());
        assert_eq!(result, vec!["esx-10-rack1.local", "esx-11-rack1.local"]);
    }

    #[test]
    fn test_alpha_preview() {
        let mut req = request("alpha");
        req.offset = Some("26".into());
        req.number_of_appliance = 1;
        req.number_of_nodes = 3;
        req.tld = ".lab".into();

        let result = names(TemplateHostnamePreviewer.preview(&req).unwrap());
        assert_eq!(result, vec!["esx-z.lab", "esx-aa.lab", "esx-ab.lab"]);
    }

    #[test]
    fn test_alpha_labels() {
        assert_eq!(alpha_label(1), "a");
        assert_eq!(alpha_label(26), "z");
        assert_eq!(alpha_label(27), "aa");
        assert_eq!(alpha_label(702), "zz");
        assert_eq!(alpha_label(703), "aaa");
    }

    #[test]
    fn test_rejects_bad_templates() {
        let service = TemplateHostnamePreviewer::new();

        let mut req = request("roman");
        assert!(matches!(
            service.preview(&req),
            Err(ServiceError::InvalidInput { .. })
        ));

        req = request("numeric");
        req.number_of_nodes = 0;
        assert!(service.preview(&req).is_err());

        req = request("numeric");
        req.offset = Some("ten".into());
        assert!(service.preview(&req).is_err());

        req = request("alpha");
        req.offset = Some("0".into());
        assert!(service.preview(&req).is_err());

        req = request("numeric");
        req.prefix = "  ".into();
        assert!(service.preview(&req).is_err());
    }

    #[test]
    fn test_empty_offset_uses_default() {
        let mut req = request("numeric");
        req.offset = Some(String::new());
        req.number_of_appliance = 1;
        req.number_of_nodes = 1;
        assert_eq!(names(TemplateHostnamePreviewer.preview(&req).unwrap()), vec!["esx-01.local"]);
    }
}
