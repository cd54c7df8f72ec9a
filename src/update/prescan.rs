//! RFC 2136 §3.4.1 update-section prescan.
//!
//! Purely structural validation of the whole update batch before any record
//! is touched; every failure here rejects the request outright.

use crate::dns::enums::{RecordClass, RecordType};
use crate::dns::name::match_zone;
use crate::dns::question::Question;
use crate::dns::resource::WireRecord;
use crate::error::{UpdateError, UpdateResult};

pub fn update_prescan(zone: &Question, updates: &[WireRecord]) -> UpdateResult<()> {
    for r in updates {
        if match_zone(&zone.name, &r.name).is_none() {
            return Err(UpdateError::NotZone);
        }

        if r.class == zone.qclass {
            // add/replace: a concrete type is required
            if r.rtype.is_query_metatype() {
                return Err(UpdateError::FormErr);
            }
        } else if r.class == RecordClass::ANY {
            // delete RRset / delete all: no ttl, no rdata; ANY as the type
            // means delete-everything and is the one permitted metatype
            if r.ttl != 0 || r.rdlength != 0 {
                return Err(UpdateError::FormErr);
            }
            if matches!(
                r.rtype,
                RecordType::AXFR | RecordType::MAILB | RecordType::MAILA
            ) {
                return Err(UpdateError::FormErr);
            }
        } else if r.class == RecordClass::NONE {
            // delete specific record: rdata names the record, ttl must be 0
            if r.ttl != 0 {
                return Err(UpdateError::FormErr);
            }
            if r.rtype.is_query_metatype() {
                return Err(UpdateError::FormErr);
            }
        } else {
            return Err(UpdateError::FormErr);
        }
    }

    Ok(())
}
