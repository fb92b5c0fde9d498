use async_trait::async_trait;
use extcheck_model::{ExtensionRecord, ExtensionType, NewExtension};

use crate::error::Result;

/// Durable record storage keyed by extension name.
///
/// All reads and writes go through a transaction so that one manager call
/// is applied atomically. A transaction dropped without
/// [`ExtensionTx::commit`] is rolled back.
#[async_trait]
pub trait ExtensionStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn ExtensionTx>>;

    /// Cheap connectivity probe used by the health endpoint.
    async fn ping(&self) -> Result<()>;
}

#[async_trait]
pub trait ExtensionTx: Send {
    /// Lookup by exact name, any type, active or not.
    async fn find_by_name(
        &mut self,
        name: &str,
    ) -> Result<Option<ExtensionRecord>>;

    async fn find_by_name_and_type(
        &mut self,
        name: &str,
        kind: ExtensionType,
    ) -> Result<Option<ExtensionRecord>>;

    /// Active records of one partition in insertion order.
    async fn list_active(
        &mut self,
        kind: ExtensionType,
    ) -> Result<Vec<ExtensionRecord>>;

    async fn count_active(&mut self, kind: ExtensionType) -> Result<u64>;

    /// Serialise writers of `kind` until this transaction ends. Taken before
    /// a count that guards an insert, so concurrent callers cannot both pass
    /// the same capacity check.
    async fn lock_partition(&mut self, kind: ExtensionType) -> Result<()>;

    /// Insert an active record. Fails with
    /// [`StoreError::Duplicate`](crate::error::StoreError::Duplicate) when
    /// the name is already taken by any record.
    async fn insert(&mut self, new: NewExtension) -> Result<ExtensionRecord>;

    /// Persist the `active` flag of `record`. Name and type are immutable and
    /// ignored by implementations.
    async fn update(&mut self, record: &ExtensionRecord)
    -> Result<ExtensionRecord>;

    async fn commit(self: Box<Self>) -> Result<()>;
}
