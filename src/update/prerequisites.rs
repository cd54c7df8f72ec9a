//! RFC 2136 §3.2 prerequisite evaluation.
//!
//! Each prerequisite asserts something about current zone state: a name is in
//! use (or not), an RRset of some type exists (or not), or an RRset contains
//! an exact record. The metavalue encoding follows the RFC table:
//!
//! ```text
//! CLASS    TYPE     RDATA    Meaning
//! ------------------------------------------------------------
//! ANY      ANY      empty    Name is in use
//! ANY      rrset    empty    RRset exists (value independent)
//! NONE     ANY      empty    Name is not in use
//! NONE     rrset    empty    RRset does not exist
//! zone     rrset    rr       RRset exists (value dependent)
//! ```

use tracing::debug;

use crate::dns::enums::{RecordClass, RecordType};
use crate::dns::name::match_zone;
use crate::dns::question::Question;
use crate::dns::resource::WireRecord;
use crate::error::{UpdateError, UpdateResult};
use crate::store::{DirectoryStore, StoredRecord, records_match};

/// A failed prerequisite, tagged with whether it aborts evaluation
/// immediately or lets the remaining prerequisites run first.
struct PrereqFailure {
    error: UpdateError,
    is_final: bool,
}

impl PrereqFailure {
    fn fatal(error: UpdateError) -> Self {
        Self {
            error,
            is_final: true,
        }
    }

    fn deferred(error: UpdateError) -> Self {
        Self {
            error,
            is_final: false,
        }
    }
}

fn check_one<S: DirectoryStore + ?Sized>(
    store: &S,
    zone: &Question,
    pr: &WireRecord,
) -> Result<(), PrereqFailure> {
    if pr.ttl != 0 {
        return Err(PrereqFailure::fatal(UpdateError::FormErr));
    }

    if match_zone(&zone.name, &pr.name).is_none() {
        return Err(PrereqFailure::fatal(UpdateError::NotZone));
    }

    if pr.class == RecordClass::ANY {
        if pr.rdlength != 0 {
            return Err(PrereqFailure::fatal(UpdateError::FormErr));
        }

        if pr.rtype == RecordType::ANY {
            // Name is in use
            let records = store.lookup(&pr.name).map_err(PrereqFailure::fatal)?;
            if records.is_empty() {
                return Err(PrereqFailure::fatal(UpdateError::NXDomain));
            }
        } else {
            // RRset exists (value independent)
            let records = match store.lookup(&pr.name) {
                Ok(records) => records,
                Err(UpdateError::NXDomain) => {
                    return Err(PrereqFailure::fatal(UpdateError::NXRRSet));
                }
                Err(e) => return Err(PrereqFailure::fatal(e)),
            };
            if !records.iter().any(|r| r.rtype == pr.rtype) {
                return Err(PrereqFailure::fatal(UpdateError::NXRRSet));
            }
        }

        // An explicit success: without it every satisfied ANY-class
        // prerequisite would fall through to the class check below and
        // report a spurious format error.
        return Ok(());
    }

    if pr.class == RecordClass::NONE {
        if pr.rdlength != 0 {
            return Err(PrereqFailure::fatal(UpdateError::FormErr));
        }

        if pr.rtype == RecordType::ANY {
            // Name is not in use; an owner node that exists counts even if
            // its record set is empty.
            match store.lookup(&pr.name) {
                Ok(_) => return Err(PrereqFailure::fatal(UpdateError::YXDomain)),
                Err(UpdateError::NXDomain) => {}
                Err(e) => return Err(PrereqFailure::fatal(e)),
            }
        } else {
            // RRset does not exist
            let records = match store.lookup(&pr.name) {
                Ok(records) => records,
                Err(UpdateError::NXDomain) => Vec::new(),
                Err(e) => return Err(PrereqFailure::fatal(e)),
            };
            if records.iter().any(|r| r.rtype == pr.rtype) {
                return Err(PrereqFailure::fatal(UpdateError::YXRRSet));
            }
        }

        return Ok(());
    }

    if pr.class != zone.qclass {
        return Err(PrereqFailure::fatal(UpdateError::FormErr));
    }

    // RRset exists (value dependent). Failures from here on are deferred:
    // the remaining prerequisites still run and the earliest such failure
    // becomes the overall result.
    let records = match store.lookup(&pr.name) {
        Ok(records) => records,
        Err(UpdateError::NXDomain) => {
            return Err(PrereqFailure::deferred(UpdateError::NXRRSet));
        }
        Err(e) => return Err(PrereqFailure::deferred(e)),
    };

    let wanted = StoredRecord::from_wire(pr).map_err(PrereqFailure::deferred)?;

    if !records.iter().any(|r| records_match(r, &wanted)) {
        return Err(PrereqFailure::deferred(UpdateError::NXRRSet));
    }

    Ok(())
}

/// Check every prerequisite in request order.
///
/// A final failure aborts immediately. Deferred failures let evaluation
/// continue; if nothing final occurs, the earliest deferred failure is the
/// result.
pub fn check_prerequisites<S: DirectoryStore + ?Sized>(
    store: &S,
    zone: &Question,
    prereqs: &[WireRecord],
) -> UpdateResult<()> {
    let mut deferred: Option<UpdateError> = None;

    for pr in prereqs {
        if let Err(failure) = check_one(store, zone, pr) {
            debug!(
                name = %pr.name,
                error = %failure.error,
                is_final = failure.is_final,
                "prerequisite not satisfied"
            );
            if failure.is_final {
                return Err(failure.error);
            }
            if deferred.is_none() {
                deferred = Some(failure.error);
            }
        }
    }

    match deferred {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::resource::WireRdata;
    use crate::store::MemoryStore;
    use std::net::Ipv4Addr;

    fn zone_question() -> Question {
        Question::new("example.com", RecordType::SOA, RecordClass::IN)
    }

    fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        let a = StoredRecord::from_wire(&WireRecord::with_rdata(
            "host.example.com",
            RecordClass::IN,
            RecordType::A,
            300,
            WireRdata::A(Ipv4Addr::new(192, 0, 2, 1)),
        ))
        .unwrap();
        store.replace("host.example.com", true, vec![a]).unwrap();
        store.replace("bare.example.com", true, vec![]).unwrap();
        store
    }

    #[test]
    fn test_nonzero_ttl_is_format_error() {
        let store = seeded_store();
        let mut pr = WireRecord::empty("host.example.com", RecordClass::ANY, RecordType::ANY);
        pr.ttl = 300;
        assert_eq!(
            check_prerequisites(&store, &zone_question(), &[pr]),
            Err(UpdateError::FormErr)
        );
    }

    #[test]
    fn test_name_outside_zone() {
        let store = seeded_store();
        let pr = WireRecord::empty("host.example.org", RecordClass::ANY, RecordType::ANY);
        assert_eq!(
            check_prerequisites(&store, &zone_question(), &[pr]),
            Err(UpdateError::NotZone)
        );
    }

    #[test]
    fn test_any_class_requires_empty_rdata() {
        let store = seeded_store();
        let mut pr = WireRecord::empty("host.example.com", RecordClass::ANY, RecordType::A);
        pr.rdlength = 4;
        assert_eq!(
            check_prerequisites(&store, &zone_question(), &[pr]),
            Err(UpdateError::FormErr)
        );
    }

    #[test]
    fn test_name_in_use() {
        let store = seeded_store();
        let pr = WireRecord::empty("host.example.com", RecordClass::ANY, RecordType::ANY);
        assert!(check_prerequisites(&store, &zone_question(), &[pr]).is_ok());
    }

    #[test]
    fn test_name_in_use_fails_on_missing_and_empty() {
        let store = seeded_store();
        let missing = WireRecord::empty("other.example.com", RecordClass::ANY, RecordType::ANY);
        assert_eq!(
            check_prerequisites(&store, &zone_question(), &[missing]),
            Err(UpdateError::NXDomain)
        );
        // An owner node with no records does not count as "in use".
        let empty = WireRecord::empty("bare.example.com", RecordClass::ANY, RecordType::ANY);
        assert_eq!(
            check_prerequisites(&store, &zone_question(), &[empty]),
            Err(UpdateError::NXDomain)
        );
    }

    #[test]
    fn test_rrset_exists_value_independent() {
        let store = seeded_store();
        let hit = WireRecord::empty("host.example.com", RecordClass::ANY, RecordType::A);
        assert!(check_prerequisites(&store, &zone_question(), &[hit]).is_ok());

        let wrong_type = WireRecord::empty("host.example.com", RecordClass::ANY, RecordType::TXT);
        assert_eq!(
            check_prerequisites(&store, &zone_question(), &[wrong_type]),
            Err(UpdateError::NXRRSet)
        );

        let missing_name = WireRecord::empty("other.example.com", RecordClass::ANY, RecordType::A);
        assert_eq!(
            check_prerequisites(&store, &zone_question(), &[missing_name]),
            Err(UpdateError::NXRRSet)
        );
    }

    #[test]
    fn test_name_not_in_use() {
        let store = seeded_store();
        let ok = WireRecord::empty("other.example.com", RecordClass::NONE, RecordType::ANY);
        assert!(check_prerequisites(&store, &zone_question(), &[ok]).is_ok());

        let hit = WireRecord::empty("host.example.com", RecordClass::NONE, RecordType::ANY);
        assert_eq!(
            check_prerequisites(&store, &zone_question(), &[hit]),
            Err(UpdateError::YXDomain)
        );
        // The owner node exists, so the name counts as in use even with an
        // empty record set.
        let bare = WireRecord::empty("bare.example.com", RecordClass::NONE, RecordType::ANY);
        assert_eq!(
            check_prerequisites(&store, &zone_question(), &[bare]),
            Err(UpdateError::YXDomain)
        );
    }

    #[test]
    fn test_rrset_does_not_exist() {
        let store = seeded_store();
        let ok = WireRecord::empty("host.example.com", RecordClass::NONE, RecordType::TXT);
        assert!(check_prerequisites(&store, &zone_question(), &[ok]).is_ok());

        let hit = WireRecord::empty("host.example.com", RecordClass::NONE, RecordType::A);
        assert_eq!(
            check_prerequisites(&store, &zone_question(), &[hit]),
            Err(UpdateError::YXRRSet)
        );
    }

    #[test]
    fn test_unknown_class_is_format_error() {
        let store = seeded_store();
        let pr = WireRecord::empty("host.example.com", RecordClass::CH, RecordType::A);
        assert_eq!(
            check_prerequisites(&store, &zone_question(), &[pr]),
            Err(UpdateError::FormErr)
        );
    }

    #[test]
    fn test_exact_rrset_match() {
        let store = seeded_store();
        let pr = WireRecord::with_rdata(
            "host.example.com",
            RecordClass::IN,
            RecordType::A,
            0,
            WireRdata::A(Ipv4Addr::new(192, 0, 2, 1)),
        );
        assert!(check_prerequisites(&store, &zone_question(), &[pr]).is_ok());
    }

    #[test]
    fn test_exact_rrset_mismatch_is_nxrrset() {
        let store = seeded_store();
        let pr = WireRecord::with_rdata(
            "host.example.com",
            RecordClass::IN,
            RecordType::A,
            0,
            WireRdata::A(Ipv4Addr::new(192, 0, 2, 99)),
        );
        assert_eq!(
            check_prerequisites(&store, &zone_question(), &[pr]),
            Err(UpdateError::NXRRSet)
        );
    }

    #[test]
    fn test_deferred_failure_does_not_stop_evaluation() {
        let store = seeded_store();
        // First prerequisite fails non-finally; the second would fail
        // finally and must still be reached.
        let miss = WireRecord::with_rdata(
            "host.example.com",
            RecordClass::IN,
            RecordType::A,
            0,
            WireRdata::A(Ipv4Addr::new(192, 0, 2, 99)),
        );
        let bad = WireRecord::empty("host.example.org", RecordClass::ANY, RecordType::ANY);
        assert_eq!(
            check_prerequisites(&store, &zone_question(), &[miss, bad]),
            Err(UpdateError::NotZone)
        );
    }

    #[test]
    fn test_earliest_deferred_failure_wins() {
        let store = seeded_store();
        let miss_a = WireRecord::with_rdata(
            "host.example.com",
            RecordClass::IN,
            RecordType::A,
            0,
            WireRdata::A(Ipv4Addr::new(192, 0, 2, 99)),
        );
        // A missing owner in the value-dependent form is also deferred.
        let miss_b = WireRecord::with_rdata(
            "other.example.com",
            RecordClass::IN,
            RecordType::A,
            0,
            WireRdata::A(Ipv4Addr::new(192, 0, 2, 1)),
        );
        // Both defer with NXRRSet; a satisfied prerequisite in between must
        // not clear the earlier failure.
        let ok = WireRecord::empty("host.example.com", RecordClass::ANY, RecordType::A);
        assert_eq!(
            check_prerequisites(&store, &zone_question(), &[miss_a, ok, miss_b]),
            Err(UpdateError::NXRRSet)
        );
    }

    #[test]
    fn test_empty_prerequisites_succeed() {
        let store = seeded_store();
        assert!(check_prerequisites(&store, &zone_question(), &[]).is_ok());
    }
}
