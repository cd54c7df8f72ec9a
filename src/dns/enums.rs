#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// Type 0, reserved on the wire; used internally as the tombstone marker.
    ZERO,
    #[default]
    A,
    NS,
    CNAME,
    SOA,
    PTR,
    MX,
    TXT,
    AAAA,
    SRV,
    // Query metatypes
    AXFR,
    MAILB,
    MAILA,
    ANY,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RecordClass {
    #[default]
    IN,
    CH,
    HS,
    /// QCLASS NONE, only meaningful in update/prerequisite sections
    NONE,
    /// QCLASS *, only meaningful in update/prerequisite sections
    ANY,
}

/// Response codes from the RFC 1035 + RFC 2136 (extended) RCODE space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    #[default]
    NoError,
    FormErr,
    ServFail,
    NXDomain,
    NotImp,
    Refused,
    YXDomain,
    YXRRSet,
    NXRRSet,
    NotAuth,
    NotZone,
}

impl From<u16> for RecordType {
    fn from(value: u16) -> Self {
        match value {
            0 => RecordType::ZERO,
            1 => RecordType::A,
            2 => RecordType::NS,
            5 => RecordType::CNAME,
            6 => RecordType::SOA,
            12 => RecordType::PTR,
            15 => RecordType::MX,
            16 => RecordType::TXT,
            28 => RecordType::AAAA,
            33 => RecordType::SRV,
            252 => RecordType::AXFR,
            253 => RecordType::MAILB,
            254 => RecordType::MAILA,
            _ => RecordType::ANY,
        }
    }
}

impl From<RecordType> for u16 {
    fn from(value: RecordType) -> u16 {
        match value {
            RecordType::ZERO => 0,
            RecordType::A => 1,
            RecordType::NS => 2,
            RecordType::CNAME => 5,
            RecordType::SOA => 6,
            RecordType::PTR => 12,
            RecordType::MX => 15,
            RecordType::TXT => 16,
            RecordType::AAAA => 28,
            RecordType::SRV => 33,
            RecordType::AXFR => 252,
            RecordType::MAILB => 253,
            RecordType::MAILA => 254,
            RecordType::ANY => 255,
        }
    }
}

impl From<u16> for RecordClass {
    fn from(value: u16) -> Self {
        match value {
            3 => RecordClass::CH,
            4 => RecordClass::HS,
            254 => RecordClass::NONE,
            255 => RecordClass::ANY,
            _ => RecordClass::IN,
        }
    }
}

impl From<RecordClass> for u16 {
    fn from(value: RecordClass) -> u16 {
        match value {
            RecordClass::IN => 1,
            RecordClass::CH => 3,
            RecordClass::HS => 4,
            RecordClass::NONE => 254,
            RecordClass::ANY => 255,
        }
    }
}

impl From<ResponseCode> for u16 {
    fn from(value: ResponseCode) -> u16 {
        match value {
            ResponseCode::NoError => 0,
            ResponseCode::FormErr => 1,
            ResponseCode::ServFail => 2,
            ResponseCode::NXDomain => 3,
            ResponseCode::NotImp => 4,
            ResponseCode::Refused => 5,
            ResponseCode::YXDomain => 6,
            ResponseCode::YXRRSet => 7,
            ResponseCode::NXRRSet => 8,
            ResponseCode::NotAuth => 9,
            ResponseCode::NotZone => 10,
        }
    }
}

impl RecordType {
    /// Query metatypes never name a concrete RRset and are rejected by the
    /// update prescan.
    pub fn is_query_metatype(&self) -> bool {
        matches!(
            self,
            RecordType::AXFR | RecordType::MAILB | RecordType::MAILA | RecordType::ANY
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_roundtrip() {
        for rtype in [
            RecordType::ZERO,
            RecordType::A,
            RecordType::NS,
            RecordType::CNAME,
            RecordType::SOA,
            RecordType::PTR,
            RecordType::MX,
            RecordType::TXT,
            RecordType::AAAA,
            RecordType::SRV,
            RecordType::AXFR,
            RecordType::MAILB,
            RecordType::MAILA,
            RecordType::ANY,
        ] {
            let wire: u16 = rtype.into();
            assert_eq!(RecordType::from(wire), rtype);
        }
    }

    #[test]
    fn test_metatypes() {
        assert!(RecordType::ANY.is_query_metatype());
        assert!(RecordType::AXFR.is_query_metatype());
        assert!(RecordType::MAILB.is_query_metatype());
        assert!(RecordType::MAILA.is_query_metatype());
        assert!(!RecordType::A.is_query_metatype());
        assert!(!RecordType::SOA.is_query_metatype());
    }

    #[test]
    fn test_rcode_values() {
        assert_eq!(u16::from(ResponseCode::NoError), 0);
        assert_eq!(u16::from(ResponseCode::YXDomain), 6);
        assert_eq!(u16::from(ResponseCode::NXRRSet), 8);
        assert_eq!(u16::from(ResponseCode::NotZone), 10);
    }
}
