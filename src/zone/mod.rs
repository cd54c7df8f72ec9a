use tracing::debug;

use crate::dns::enums::RecordClass;
use crate::dns::name::match_zone;

/// An authoritative zone as configured on the server. The update engine only
/// needs the apex name and the class; record contents live in the directory
/// store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Zone {
    /// Zone apex, e.g. "example.com"
    pub name: String,
    /// Zone class, IN for every zone this server hosts
    pub class: RecordClass,
}

impl Zone {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim_end_matches('.').to_lowercase(),
            class: RecordClass::IN,
        }
    }
}

/// Find the configured zone a name belongs to.
///
/// Zones are scanned in configuration order and the first suffix match wins,
/// even if a later zone is more specific. With overlapping zones (say
/// "example.com" configured before "sub.example.com") the earlier entry
/// therefore captures names of the later one; order the configuration from
/// most to least specific if that matters. Returns the zone and the byte
/// length of the host part, 0 when `name` is the apex.
pub fn find_zone<'a>(zones: &'a [Zone], name: &str) -> Option<(&'a Zone, usize)> {
    for zone in zones {
        if let Some(host_part_len) = match_zone(&zone.name, name) {
            debug!(zone = %zone.name, name, host_part_len, "matched zone");
            return Some((zone, host_part_len));
        }
    }
    None
}
