//! The directory store boundary.
//!
//! The update engine reads and writes record sets through [`DirectoryStore`]
//! and never touches persistence directly. A production deployment backs this
//! with its directory service; [`MemoryStore`] is the bundled transactional
//! implementation used in tests and by embedders without their own backend.

pub mod memory;
pub mod record;

pub use memory::MemoryStore;
pub use record::{RANK_ZONE, StoredRecord, StoredRdata, records_match};

use crate::error::UpdateResult;

/// Record-set storage with whole-request transactions.
///
/// An owner node is distinct from its record set: a node that exists with no
/// records is found by `lookup` (returning an empty set), while a node that
/// was never created reports [`crate::error::UpdateError::NXDomain`]. The
/// engine relies on that distinction for "name is in use" prerequisite
/// checks.
pub trait DirectoryStore {
    /// Fetch the record set stored at `owner`.
    ///
    /// Returns [`crate::error::UpdateError::NXDomain`] when the owner node
    /// does not exist and [`crate::error::UpdateError::ServFail`] on backend
    /// failure.
    fn lookup(&self, owner: &str) -> UpdateResult<Vec<StoredRecord>>;

    /// Replace the record set stored at `owner`, creating the node when
    /// `create` is set. Tombstoned entries are dropped before the set is
    /// persisted.
    fn replace(&self, owner: &str, create: bool, records: Vec<StoredRecord>)
    -> UpdateResult<()>;

    /// Open the store-wide transaction. Everything between this call and
    /// `commit_transaction`/`cancel_transaction` is atomic.
    fn begin_transaction(&self) -> UpdateResult<()>;

    /// Make all changes since `begin_transaction` durable.
    fn commit_transaction(&self) -> UpdateResult<()>;

    /// Discard all changes since `begin_transaction`, restoring the state
    /// exactly as it was before.
    fn cancel_transaction(&self);
}

/// Scoped transaction handle.
///
/// Acquired once per request; either committed explicitly or cancelled on
/// drop, so every early-error path releases the transaction exactly once.
pub struct Transaction<'a, S: DirectoryStore + ?Sized> {
    store: &'a S,
    active: bool,
}

impl<'a, S: DirectoryStore + ?Sized> Transaction<'a, S> {
    pub fn begin(store: &'a S) -> UpdateResult<Self> {
        store.begin_transaction()?;
        Ok(Self {
            store,
            active: true,
        })
    }

    pub fn commit(mut self) -> UpdateResult<()> {
        self.active = false;
        self.store.commit_transaction()
    }
}

impl<S: DirectoryStore + ?Sized> Drop for Transaction<'_, S> {
    fn drop(&mut self) {
        if self.active {
            self.store.cancel_transaction();
        }
    }
}
