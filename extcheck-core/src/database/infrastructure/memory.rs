use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use extcheck_model::{
    ExtensionId, ExtensionRecord, ExtensionType, NewExtension,
};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::database::ports::extensions::{ExtensionStore, ExtensionTx};
use crate::error::{Result, StoreError};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    last_id: i64,
    // keyed by id, so iteration is insertion order
    records: BTreeMap<i64, ExtensionRecord>,
}

/// Process-local store used in tests and when no database is configured.
///
/// A transaction holds the store lock for its whole lifetime and works on a
/// copy of the state; commit swaps the copy in, dropping discards it.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExtensionStore {
    state: Arc<Mutex<MemoryState>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryExtensionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `begin`/`ping` fail, emulating a lost database.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Every record ever written, active or not, in insertion order.
    pub async fn all_records(&self) -> Vec<ExtensionRecord> {
        self.state.lock().await.records.values().cloned().collect()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Internal("store unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ExtensionStore for InMemoryExtensionStore {
    async fn begin(&self) -> Result<Box<dyn ExtensionTx>> {
        self.check_available()?;
        let guard = self.state.clone().lock_owned().await;
        let working = (*guard).clone();
        Ok(Box::new(InMemoryTx { guard, working }))
    }

    async fn ping(&self) -> Result<()> {
        self.check_available()
    }
}

struct InMemoryTx {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

impl InMemoryTx {
    fn active_of(
        &self,
        kind: ExtensionType,
    ) -> impl Iterator<Item = &ExtensionRecord> {
        self.working
            .records
            .values()
            .filter(move |record| record.kind == kind && record.active)
    }
}

#[async_trait]
impl ExtensionTx for InMemoryTx {
    async fn find_by_name(
        &mut self,
        name: &str,
    ) -> Result<Option<ExtensionRecord>> {
        Ok(self
            .working
            .records
            .values()
            .find(|record| record.name == name)
            .cloned())
    }

    async fn find_by_name_and_type(
        &mut self,
        name: &str,
        kind: ExtensionType,
    ) -> Result<Option<ExtensionRecord>> {
        Ok(self
            .working
            .records
            .values()
            .find(|record| record.name == name && record.kind == kind)
            .cloned())
    }

    async fn list_active(
        &mut self,
        kind: ExtensionType,
    ) -> Result<Vec<ExtensionRecord>> {
        Ok(self.active_of(kind).cloned().collect())
    }

    async fn count_active(&mut self, kind: ExtensionType) -> Result<u64> {
        Ok(self.active_of(kind).count() as u64)
    }

    async fn lock_partition(&mut self, _kind: ExtensionType) -> Result<()> {
        // the transaction already holds the store lock
        Ok(())
    }

    async fn insert(&mut self, new: NewExtension) -> Result<ExtensionRecord> {
        if self
            .working
            .records
            .values()
            .any(|record| record.name == new.name)
        {
            return Err(StoreError::Duplicate(new.name));
        }

        self.working.last_id += 1;
        let id = self.working.last_id;
        let record = new.into_record(ExtensionId(id));
        self.working.records.insert(id, record.clone());
        Ok(record)
    }

    async fn update(
        &mut self,
        record: &ExtensionRecord,
    ) -> Result<ExtensionRecord> {
        let stored =
            self.working.records.get_mut(&record.id.get()).ok_or_else(|| {
                StoreError::Internal(format!(
                    "extension {} vanished during update",
                    record.id
                ))
            })?;
        stored.active = record.active;
        Ok(stored.clone())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let InMemoryTx { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}
