//! RFC 2136 Dynamic DNS Update processing
//!
//! This module implements the server side of dynamic updates:
//! - Prerequisite checking for conditional updates
//! - Structural prescan of the update section
//! - Add, replace and delete operations on stored record sets
//! - Policy-based gating of who may update at all
//!
//! All mutations of one request happen inside a single directory-store
//! transaction; a failure at any point cancels it and leaves the zone
//! untouched.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::dns::enums::{RecordClass, RecordType};
use crate::dns::question::Question;
use crate::dns::resource::WireRecord;
use crate::error::{UpdateError, UpdateResult};
use crate::store::{DirectoryStore, Transaction};
use crate::zone::{Zone, find_zone};

pub mod apply;
pub mod policy;
pub mod prerequisites;
pub mod prescan;

pub use apply::apply_one;
pub use policy::{UpdateMode, UpdatePolicy};
pub use prerequisites::check_prerequisites;
pub use prescan::update_prescan;

/// A decoded UPDATE request: the zone section plus the prerequisite and
/// update record lists, in wire order.
#[derive(Clone, Debug, Default)]
pub struct UpdateRequest {
    pub questions: Vec<Question>,
    pub prerequisites: Vec<WireRecord>,
    pub updates: Vec<WireRecord>,
}

/// Dynamic update processor for the zones this server is authoritative for.
pub struct UpdateProcessor<S: DirectoryStore> {
    store: Arc<S>,
    zones: Vec<Zone>,
    policy: UpdatePolicy,
}

impl<S: DirectoryStore> UpdateProcessor<S> {
    pub fn new(store: Arc<S>, zones: Vec<Zone>, policy: UpdatePolicy) -> Self {
        Self {
            store,
            zones,
            policy,
        }
    }

    /// Process one UPDATE request against the store.
    ///
    /// `authenticated` is the transport layer's verdict on the request's
    /// signature; it only matters under the `authenticated` policy mode.
    ///
    /// On success all updates are committed. On failure the returned error
    /// carries the response code to send, and the store is exactly as it was
    /// before the request.
    pub fn process_update(
        &self,
        request: &UpdateRequest,
        authenticated: bool,
    ) -> UpdateResult<()> {
        let [zone_section] = request.questions.as_slice() else {
            return Err(UpdateError::FormErr);
        };

        if zone_section.qclass != RecordClass::IN && zone_section.qclass != RecordClass::ANY {
            return Err(UpdateError::NotImp);
        }

        if zone_section.qtype != RecordType::SOA {
            return Err(UpdateError::FormErr);
        }

        info!(zone = %zone_section.name, "processing dynamic update request");

        let Some((_zone, host_part_len)) = find_zone(&self.zones, &zone_section.name) else {
            warn!(zone = %zone_section.name, "update for non-authoritative zone");
            return Err(UpdateError::NotAuth);
        };

        if host_part_len != 0 {
            // The zone section names something below one of our apexes; that
            // update belongs to a delegated server.
            debug!(zone = %zone_section.name, "update target is below the zone apex");
            return Err(UpdateError::NotImp);
        }

        check_prerequisites(self.store.as_ref(), zone_section, &request.prerequisites)?;

        if !self.policy.is_update_allowed(authenticated) {
            warn!(zone = %zone_section.name, "update not allowed by policy");
            return Err(UpdateError::Refused);
        }

        update_prescan(zone_section, &request.updates)?;

        self.handle_updates(zone_section, &request.prerequisites, &request.updates)
    }

    /// Run the prerequisite checks and all updates inside one transaction.
    ///
    /// Prerequisites are re-checked here so their verdict and the mutations
    /// belong to the same atomic view of the store. Each update record sees
    /// the effects of the ones before it. Any failure cancels the
    /// transaction on the way out; only full success commits.
    fn handle_updates(
        &self,
        zone: &Question,
        prereqs: &[WireRecord],
        updates: &[WireRecord],
    ) -> UpdateResult<()> {
        let txn = Transaction::begin(self.store.as_ref())?;

        check_prerequisites(self.store.as_ref(), zone, prereqs)?;

        debug!(count = updates.len(), "applying update records");
        for update in updates {
            apply_one(self.store.as_ref(), zone, update)?;
        }

        txn.commit()
    }
}
