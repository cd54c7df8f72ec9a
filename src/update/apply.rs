//! Per-record update application: the RFC 2136 §3.4.2 decision table.
//!
//! One call mutates the record set of one owner name. Deletions tombstone
//! entries in place; the store compacts tombstones when the set is persisted.
//! Several branches are deliberate no-ops that succeed without touching the
//! set (CNAME exclusivity, stale SOA serials, apex protection, NS delete
//! protection) — callers must not read an `Ok` as "something changed".

use tracing::debug;

use crate::dns::enums::{RecordClass, RecordType};
use crate::dns::name::name_equal;
use crate::dns::question::Question;
use crate::dns::resource::{WireRdata, WireRecord};
use crate::error::{UpdateError, UpdateResult};
use crate::store::{DirectoryStore, StoredRecord, StoredRdata, records_match};

pub fn apply_one<S: DirectoryStore + ?Sized>(
    store: &S,
    zone: &Question,
    update: &WireRecord,
) -> UpdateResult<()> {
    match update.rtype {
        RecordType::A
        | RecordType::NS
        | RecordType::CNAME
        | RecordType::SOA
        | RecordType::PTR
        | RecordType::MX
        | RecordType::AAAA
        | RecordType::SRV
        | RecordType::TXT => {}
        // The wildcard type only reaches this point as a class-ANY
        // delete-everything; the prescan has already rejected it elsewhere.
        RecordType::ANY if update.class == RecordClass::ANY => {}
        _ => return Err(UpdateError::NotImp),
    }

    let (mut recs, needs_add) = match store.lookup(&update.name) {
        Ok(recs) => (recs, false),
        Err(UpdateError::NXDomain) => (Vec::new(), true),
        Err(e) => return Err(e),
    };

    if update.class == zone.qclass {
        apply_add(store, update, recs, needs_add)
    } else if update.class == RecordClass::ANY {
        apply_delete_rrset(store, zone, update, recs, needs_add)
    } else if update.class == RecordClass::NONE {
        apply_delete_record(store, update, recs, needs_add)
    } else {
        // unreachable after the prescan
        Err(UpdateError::FormErr)
    }
}

/// Class equal to the zone class: add, replace, or conditionally replace.
fn apply_add<S: DirectoryStore + ?Sized>(
    store: &S,
    update: &WireRecord,
    mut recs: Vec<StoredRecord>,
    needs_add: bool,
) -> UpdateResult<()> {
    if update.rtype == RecordType::CNAME {
        // A CNAME must be the only record at its owner. If anything else is
        // there, leave the set alone; otherwise the new CNAME becomes the
        // whole set.
        if recs.iter().any(|r| r.rtype != RecordType::CNAME) {
            debug!(name = %update.name, "skipping CNAME update, owner has other records");
            return Ok(());
        }
        let cname = StoredRecord::from_wire(update)?;
        return store.replace(&update.name, needs_add, vec![cname]);
    }

    // Conversely, nothing may be added next to an existing CNAME.
    if recs.iter().any(|r| r.rtype == RecordType::CNAME) {
        debug!(name = %update.name, "skipping update, owner is a CNAME");
        return Ok(());
    }

    if update.rtype == RecordType::SOA {
        return apply_replace_soa(store, update, recs, needs_add);
    }

    let new = StoredRecord::from_wire(update)?;
    if let Some(pos) = recs.iter().position(|r| records_match(r, &new)) {
        // Same record already present: overwrite in place so a repeated add
        // refreshes ttl/serial instead of duplicating.
        recs[pos] = new;
    } else {
        recs.push(new);
    }

    store.replace(&update.name, needs_add, recs)
}

/// SOA may only move forward: a serial at or below the stored one is a no-op,
/// and an owner without an SOA never gains one through an update.
fn apply_replace_soa<S: DirectoryStore + ?Sized>(
    store: &S,
    update: &WireRecord,
    mut recs: Vec<StoredRecord>,
    needs_add: bool,
) -> UpdateResult<()> {
    let WireRdata::Soa(new_soa) = &update.rdata else {
        return Err(UpdateError::FormErr);
    };

    let Some(pos) = recs
        .iter()
        .position(|r| r.rtype == RecordType::SOA)
    else {
        debug!(name = %update.name, "skipping SOA update, owner has no SOA");
        return Ok(());
    };

    let old_serial = match &recs[pos].data {
        StoredRdata::Soa(soa) => soa.serial,
        _ => {
            return Err(UpdateError::ServFail(
                "stored SOA record carries no SOA data".to_string(),
            ));
        }
    };

    // Plain integer comparison, not RFC 1982 serial arithmetic.
    if new_soa.serial <= old_serial {
        debug!(
            name = %update.name,
            new = new_soa.serial,
            old = old_serial,
            "skipping SOA update, serial not newer"
        );
        return Ok(());
    }

    recs[pos] = StoredRecord::from_wire(update)?;

    // A well-formed set has one SOA; drop any strays after the replaced one.
    for rec in recs[pos + 1..].iter_mut() {
        if rec.rtype == RecordType::SOA {
            *rec = StoredRecord::tombstone();
        }
    }

    store.replace(&update.name, needs_add, recs)
}

/// Class ANY: delete a whole RRset, or everything at the owner. Apex SOA and
/// NS records are exempt either way.
fn apply_delete_rrset<S: DirectoryStore + ?Sized>(
    store: &S,
    zone: &Question,
    update: &WireRecord,
    mut recs: Vec<StoredRecord>,
    needs_add: bool,
) -> UpdateResult<()> {
    let at_apex = name_equal(&update.name, &zone.name);

    if update.rtype == RecordType::ANY {
        for rec in recs.iter_mut() {
            if at_apex && matches!(rec.rtype, RecordType::SOA | RecordType::NS) {
                continue;
            }
            *rec = StoredRecord::tombstone();
        }
    } else {
        if at_apex && matches!(update.rtype, RecordType::SOA | RecordType::NS) {
            debug!(name = %update.name, rtype = ?update.rtype, "skipping delete of apex infrastructure");
            return Ok(());
        }
        for rec in recs.iter_mut() {
            if rec.rtype == update.rtype {
                *rec = StoredRecord::tombstone();
            }
        }
    }

    store.replace(&update.name, needs_add, recs)
}

/// Class NONE: delete the one record matching the update's rdata. SOA is
/// never deleted this way, and an NS record whose rdata matches is kept so a
/// zone cannot shed its listed name servers through updates.
fn apply_delete_record<S: DirectoryStore + ?Sized>(
    store: &S,
    update: &WireRecord,
    mut recs: Vec<StoredRecord>,
    needs_add: bool,
) -> UpdateResult<()> {
    if update.rtype == RecordType::SOA {
        debug!(name = %update.name, "skipping SOA delete");
        return Ok(());
    }

    let target = StoredRecord::from_wire(update)?;

    let mut protected = None;
    if update.rtype == RecordType::NS {
        protected = recs.iter().position(|r| records_match(r, &target));
        if protected.is_some() {
            debug!(name = %update.name, "matching NS record is protected from deletion");
        }
    }

    for (i, rec) in recs.iter_mut().enumerate() {
        if Some(i) == protected {
            continue;
        }
        if records_match(rec, &target) {
            *rec = StoredRecord::tombstone();
        }
    }

    store.replace(&update.name, needs_add, recs)
}
