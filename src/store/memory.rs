use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::debug;

use super::record::StoredRecord;
use super::DirectoryStore;
use crate::error::{UpdateError, UpdateResult};

/// In-memory [`DirectoryStore`] with snapshot-based transactions.
///
/// Owner names are keyed case-insensitively. One transaction can be open at a
/// time; `begin_transaction` snapshots the full node map, `cancel_transaction`
/// restores it, `commit_transaction` discards the snapshot. The mutex
/// serializes all access, so concurrent update requests are applied one at a
/// time, as the transaction contract requires.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    nodes: HashMap<String, Vec<StoredRecord>>,
    snapshot: Option<HashMap<String, Vec<StoredRecord>>>,
}

fn owner_key(owner: &str) -> String {
    owner.trim_end_matches('.').to_lowercase()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DirectoryStore for MemoryStore {
    fn lookup(&self, owner: &str) -> UpdateResult<Vec<StoredRecord>> {
        let inner = self.inner.lock();
        inner
            .nodes
            .get(&owner_key(owner))
            .cloned()
            .ok_or(UpdateError::NXDomain)
    }

    fn replace(
        &self,
        owner: &str,
        create: bool,
        mut records: Vec<StoredRecord>,
    ) -> UpdateResult<()> {
        let key = owner_key(owner);
        let mut inner = self.inner.lock();

        if !create && !inner.nodes.contains_key(&key) {
            return Err(UpdateError::ServFail(format!(
                "no node to replace at {owner}"
            )));
        }

        records.retain(|r| !r.is_tombstone());
        debug!(owner = %key, count = records.len(), "replacing record set");
        inner.nodes.insert(key, records);
        Ok(())
    }

    fn begin_transaction(&self) -> UpdateResult<()> {
        let mut inner = self.inner.lock();
        if inner.snapshot.is_some() {
            return Err(UpdateError::ServFail(
                "transaction already open".to_string(),
            ));
        }
        inner.snapshot = Some(inner.nodes.clone());
        Ok(())
    }

    fn commit_transaction(&self) -> UpdateResult<()> {
        let mut inner = self.inner.lock();
        if inner.snapshot.take().is_none() {
            return Err(UpdateError::ServFail("no open transaction".to_string()));
        }
        Ok(())
    }

    fn cancel_transaction(&self) {
        let mut inner = self.inner.lock();
        if let Some(snapshot) = inner.snapshot.take() {
            inner.nodes = snapshot;
        }
    }
}
