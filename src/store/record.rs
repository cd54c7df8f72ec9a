use std::net::{Ipv4Addr, Ipv6Addr};

use crate::dns::enums::{RecordClass, RecordType};
use crate::dns::name::name_equal;
use crate::dns::resource::{SoaData, WireRdata, WireRecord};
use crate::error::{UpdateError, UpdateResult};

/// Rank of authoritative zone data in the directory schema.
pub const RANK_ZONE: u8 = 0xf0;

/// Serial stamped on newly normalized records. Serial allocation is the
/// directory layer's job; the engine stores a fixed placeholder.
const PLACEHOLDER_SERIAL: u32 = 110;

/// A resource record in its stored (directory) form.
///
/// A record with type `ZERO` and empty data is a tombstone: logically deleted,
/// kept in place until the store compacts the set at `replace` time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredRecord {
    pub rtype: RecordType,
    pub ttl: u32,
    pub rank: u8,
    pub serial: u32,
    pub data: StoredRdata,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoredRdata {
    /// No payload: tombstones and the type/ttl-only form normalized from
    /// class ANY prerequisites.
    Empty,
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

impl StoredRecord {
    /// Normalize a wire record into its stored form.
    ///
    /// Class ANY records normalize to a type/ttl-only form with empty data;
    /// they exist for prerequisite and delete checks and must never be
    /// persisted as zone data. For IN/NONE classes the typed rdata is copied
    /// into the stored variant. The wildcard type has no stored form.
    pub fn from_wire(rec: &WireRecord) -> UpdateResult<Self> {
        if rec.rtype == RecordType::ANY {
            return Err(UpdateError::FormErr);
        }

        let mut stored = Self {
            rtype: rec.rtype,
            ttl: rec.ttl,
            rank: RANK_ZONE,
            serial: PLACEHOLDER_SERIAL,
            data: StoredRdata::Empty,
        };

        if rec.class == RecordClass::ANY {
            return Ok(stored);
        }

        stored.data = match (rec.rtype, &rec.rdata) {
            (RecordType::A, WireRdata::A(addr)) => StoredRdata::A(*addr),
            (RecordType::AAAA, WireRdata::Aaaa(addr)) => StoredRdata::Aaaa(*addr),
            (RecordType::NS, WireRdata::Ns(target)) => StoredRdata::Ns(target.clone()),
            (RecordType::CNAME, WireRdata::Cname(target)) => StoredRdata::Cname(target.clone()),
            (RecordType::SOA, WireRdata::Soa(soa)) => StoredRdata::Soa(soa.clone()),
            (RecordType::PTR, WireRdata::Ptr(target)) => StoredRdata::Ptr(target.clone()),
            (RecordType::MX, WireRdata::Mx { preference, exchange }) => StoredRdata::Mx {
                preference: *preference,
                exchange: exchange.clone(),
            },
            (
                RecordType::SRV,
                WireRdata::Srv {
                    priority,
                    weight,
                    port,
                    target,
                },
            ) => StoredRdata::Srv {
                priority: *priority,
                weight: *weight,
                port: *port,
                target: target.clone(),
            },
            (RecordType::TXT, WireRdata::Txt(text)) => StoredRdata::Txt(text.clone()),
            (
                RecordType::A
                | RecordType::AAAA
                | RecordType::NS
                | RecordType::CNAME
                | RecordType::SOA
                | RecordType::PTR
                | RecordType::MX
                | RecordType::SRV
                | RecordType::TXT,
                _,
            ) => return Err(UpdateError::FormErr),
            _ => return Err(UpdateError::NotImp),
        };

        Ok(stored)
    }

    /// The empty sentinel marking an entry as logically deleted. The store
    /// drops tombstones when the set is persisted.
    pub fn tombstone() -> Self {
        Self {
            rtype: RecordType::ZERO,
            ttl: 0,
            rank: 0,
            serial: 0,
            data: StoredRdata::Empty,
        }
    }

    pub fn is_tombstone(&self) -> bool {
        self.rtype == RecordType::ZERO
    }
}

/// Semantic record equality: same type, and rdata equal under per-type rules.
///
/// Addresses, text and the numeric MX/SRV fields compare exactly; name-valued
/// fields (NS/CNAME/PTR targets, MX exchange, SRV target, SOA names) compare
/// as DNS names, case-insensitively. Records with empty data never match
/// anything.
pub fn records_match(a: &StoredRecord, b: &StoredRecord) -> bool {
    if a.rtype != b.rtype {
        return false;
    }

    match (&a.data, &b.data) {
        (StoredRdata::A(x), StoredRdata::A(y)) => x == y,
        (StoredRdata::Aaaa(x), StoredRdata::Aaaa(y)) => x == y,
        (StoredRdata::Ns(x), StoredRdata::Ns(y))
        | (StoredRdata::Cname(x), StoredRdata::Cname(y))
        | (StoredRdata::Ptr(x), StoredRdata::Ptr(y)) => name_equal(x, y),
        (StoredRdata::Soa(x), StoredRdata::Soa(y)) => {
            x.serial == y.serial
                && x.refresh == y.refresh
                && x.retry == y.retry
                && x.expire == y.expire
                && x.minimum == y.minimum
                && name_equal(&x.mname, &y.mname)
                && name_equal(&x.rname, &y.rname)
        }
        (
            StoredRdata::Mx {
                preference: xp,
                exchange: xe,
            },
            StoredRdata::Mx {
                preference: yp,
                exchange: ye,
            },
        ) => xp == yp && name_equal(xe, ye),
        (
            StoredRdata::Srv {
                priority: xp,
                weight: xw,
                port: xport,
                target: xt,
            },
            StoredRdata::Srv {
                priority: yp,
                weight: yw,
                port: yport,
                target: yt,
            },
        ) => xp == yp && xw == yw && xport == yport && name_equal(xt, yt),
        (StoredRdata::Txt(x), StoredRdata::Txt(y)) => x == y,
        _ => false,
    }
}
