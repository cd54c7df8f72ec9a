use std::net::{Ipv4Addr, Ipv6Addr};

use super::enums::{RecordClass, RecordType};

/// A resource record as it arrives in the prerequisite or update section of
/// an UPDATE message, with the rdata already decoded into its typed form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WireRecord {
    pub name: String,
    pub class: RecordClass,
    pub rtype: RecordType,
    pub ttl: u32,
    /// RDLENGTH from the wire; zero for the empty-rdata meta forms
    pub rdlength: u16,
    pub rdata: WireRdata,
}

/// Typed rdata payload for the record types the update engine handles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WireRdata {
    /// Empty rdata (class ANY/NONE meta records)
    None,
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Ns(String),
    Cname(String),
    Soa(SoaData),
    Ptr(String),
    Mx { preference: u16, exchange: String },
    Srv { priority: u16, weight: u16, port: u16, target: String },
    Txt(String),
}

/// SOA rdata fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SoaData {
    pub mname: String,
    pub rname: String,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

impl WireRecord {
    /// Build a record with empty rdata, as used by the class ANY/NONE meta
    /// forms in prerequisite and update sections.
    pub fn empty(name: &str, class: RecordClass, rtype: RecordType) -> Self {
        Self {
            name: name.to_string(),
            class,
            rtype,
            ttl: 0,
            rdlength: 0,
            rdata: WireRdata::None,
        }
    }

    /// Build a concrete record carrying rdata in the given class.
    pub fn with_rdata(
        name: &str,
        class: RecordClass,
        rtype: RecordType,
        ttl: u32,
        rdata: WireRdata,
    ) -> Self {
        let rdlength = match &rdata {
            WireRdata::None => 0,
            // The engine never re-encodes rdata, so a nominal non-zero
            // length is enough for the prescan's RDLENGTH checks.
            _ => 1,
        };
        Self {
            name: name.to_string(),
            class,
            rtype,
            ttl,
            rdlength,
            rdata,
        }
    }
}
