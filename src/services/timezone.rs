//! Timezone listing from the bundled IANA database.

use crate::services::TimeZoneLister;

/// True if `name` resolves in the timezone database.
pub fn is_known_time_zone(name: &str) -> bool {
    jiff::tz::TimeZone::get(name).is_ok()
}

/// Lists identifiers from jiff's tz database, sorted.
#[derive(Debug, Clone, Copy, Default)]
pub struct TzdbTimeZoneLister;

impl TzdbTimeZoneLister {
    pub fn new() -> Self {
        Self
    }
}

impl TimeZoneLister for TzdbTimeZoneLister {
    fn list_time_zones(&self) -> Vec<String> {
        let mut zones: Vec<String> = jiff::tz::db()
            .available()
            .map(|name| name.as_str().to_string())
            .collect();
        zones.sort();
        zones.dedup();
        zones
    }
}
