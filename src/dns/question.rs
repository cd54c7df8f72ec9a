use super::enums::{RecordClass, RecordType};

/// The zone-section entry of an UPDATE request. RFC 2136 reuses the question
/// wire layout: the name designates the zone to be updated, the type must be
/// SOA and the class is the zone class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub qtype: RecordType,
    pub qclass: RecordClass,
}

impl Question {
    pub fn new(name: &str, qtype: RecordType, qclass: RecordClass) -> Self {
        Self {
            name: name.to_string(),
            qtype,
            qclass,
        }
    }
}
