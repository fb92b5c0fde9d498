use std::{any::type_name_of_val, fmt, sync::Arc};

use extcheck_contracts::events::ExtensionBroadcast;
use extcheck_contracts::extensions::ExtensionListResponse;
use extcheck_model::{ExtensionRecord, ExtensionType, NewExtension};
use tracing::{debug, error, info, warn};

use super::notifier::ChangeNotifier;
use super::validator;
use crate::database::ports::extensions::{ExtensionStore, ExtensionTx};
use crate::error::ExtensionError;

/// Upper bound on simultaneously active custom extensions.
pub const MAX_CUSTOM_EXTENSIONS: u64 = 200;

type Result<T> = std::result::Result<T, ExtensionError>;

/// Activation rules for fixed and custom extensions.
///
/// Each public operation runs in exactly one store transaction. Change
/// notifications are published only after that transaction commits, and a
/// failure to publish never fails the operation.
#[derive(Clone)]
pub struct ExtensionManager {
    store: Arc<dyn ExtensionStore>,
    notifier: Arc<dyn ChangeNotifier>,
}

impl fmt::Debug for ExtensionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionManager")
            .field("store", &type_name_of_val(self.store.as_ref()))
            .field("notifier", &type_name_of_val(self.notifier.as_ref()))
            .finish()
    }
}

impl ExtensionManager {
    pub fn new(
        store: Arc<dyn ExtensionStore>,
        notifier: Arc<dyn ChangeNotifier>,
    ) -> Self {
        Self { store, notifier }
    }

    /// Register a custom extension, or reactivate a known inactive name.
    ///
    /// The raw input is validated first and lowercased afterwards. A known
    /// inactive name keeps its original type when reactivated.
    pub async fn add_custom(
        &self,
        candidate: Option<&str>,
    ) -> Result<ExtensionRecord> {
        debug!(?candidate, "adding custom extension");

        if let Err(err) = validator::validate(candidate) {
            warn!(?candidate, code = err.code(), "rejected custom extension");
            return Err(err.into());
        }
        let name = candidate.map(str::to_lowercase).unwrap_or_default();

        let mut tx = self.store.begin().await?;
        tx.lock_partition(ExtensionType::Custom).await?;

        let active = tx.count_active(ExtensionType::Custom).await?;
        if active >= MAX_CUSTOM_EXTENSIONS {
            warn!(active, "custom extension capacity reached");
            return Err(ExtensionError::MaxLimitExceeded {
                limit: MAX_CUSTOM_EXTENSIONS,
            });
        }

        let fixed_active = tx
            .find_by_name_and_type(&name, ExtensionType::Fixed)
            .await?
            .is_some_and(|record| record.active);
        if fixed_active {
            warn!(%name, "custom extension collides with an active fixed one");
            return Err(ExtensionError::FixedExtensionConflict);
        }

        let record = match tx.find_by_name(&name).await? {
            None => tx.insert(NewExtension::custom(name.as_str())).await?,
            Some(existing) if existing.active => {
                return Err(ExtensionError::AlreadyExists);
            }
            Some(existing) => tx.update(&existing.activated()).await?,
        };

        tx.commit().await?;
        info!(id = %record.id, name = %record.name, kind = %record.kind, "extension activated");

        self.broadcast_full().await;
        Ok(record)
    }

    /// Deactivate the record holding exactly `name`. Deactivating an already
    /// inactive record succeeds.
    pub async fn deactivate_custom(
        &self,
        name: &str,
    ) -> Result<ExtensionRecord> {
        debug!(%name, "removing custom extension");

        let mut tx = self.store.begin().await?;
        let existing =
            tx.find_by_name(name).await?.ok_or(ExtensionError::NotFound)?;
        let record = tx.update(&existing.deactivated()).await?;
        tx.commit().await?;
        info!(id = %record.id, name = %record.name, "extension deactivated");

        self.broadcast_full().await;
        Ok(record)
    }

    /// Activate fixed extension `name`, creating it when unknown.
    ///
    /// No validation, capacity or conflict checks apply to fixed names.
    pub async fn save_fixed(&self, name: &str) -> Result<ExtensionRecord> {
        debug!(%name, "saving fixed extension");

        let mut tx = self.store.begin().await?;
        let record = save_fixed_in(tx.as_mut(), &name.to_lowercase()).await?;
        tx.commit().await?;

        self.broadcast_full().await;
        Ok(record)
    }

    /// Deactivate fixed extension `name`; unknown names are a no-op.
    pub async fn delete_fixed(
        &self,
        name: &str,
    ) -> Result<Option<ExtensionRecord>> {
        debug!(%name, "releasing fixed extension");

        let mut tx = self.store.begin().await?;
        let record =
            delete_fixed_in(tx.as_mut(), &name.to_lowercase()).await?;
        tx.commit().await?;

        self.broadcast_full().await;
        Ok(record)
    }

    /// Apply `checked` then `unchecked` in one transaction and publish a
    /// single delta carrying both lists as given.
    pub async fn batch_update_fixed(
        &self,
        checked: Option<Vec<String>>,
        unchecked: Option<Vec<String>>,
    ) -> Result<()> {
        let checked = checked.unwrap_or_default();
        let unchecked = unchecked.unwrap_or_default();
        debug!(
            checked = checked.len(),
            unchecked = unchecked.len(),
            "batch updating fixed extensions"
        );

        let mut tx = self.store.begin().await?;
        for name in &checked {
            save_fixed_in(tx.as_mut(), &name.to_lowercase()).await?;
        }
        for name in &unchecked {
            delete_fixed_in(tx.as_mut(), &name.to_lowercase()).await?;
        }
        tx.commit().await?;

        self.notifier.publish(ExtensionBroadcast::Delta {
            fixed_added: checked,
            fixed_removed: unchecked,
        });
        Ok(())
    }

    /// Active names of both partitions in insertion order.
    pub async fn list_active(&self) -> Result<ExtensionListResponse> {
        let mut tx = self.store.begin().await?;
        let fixed = tx.list_active(ExtensionType::Fixed).await?;
        let custom = tx.list_active(ExtensionType::Custom).await?;
        tx.commit().await?;

        Ok(ExtensionListResponse::new(names(fixed), names(custom)))
    }

    async fn broadcast_full(&self) {
        match self.list_active().await {
            Ok(snapshot) => {
                self.notifier.publish(ExtensionBroadcast::Full(snapshot))
            }
            Err(err) => {
                error!(error = %err, "failed to build extension snapshot for broadcast")
            }
        }
    }
}

async fn save_fixed_in(
    tx: &mut dyn ExtensionTx,
    name: &str,
) -> Result<ExtensionRecord> {
    let record = match tx.find_by_name_and_type(name, ExtensionType::Fixed).await? {
        Some(existing) => tx.update(&existing.activated()).await?,
        None => tx.insert(NewExtension::fixed(name)).await?,
    };
    info!(id = %record.id, name = %record.name, "fixed extension active");
    Ok(record)
}

async fn delete_fixed_in(
    tx: &mut dyn ExtensionTx,
    name: &str,
) -> Result<Option<ExtensionRecord>> {
    let Some(existing) =
        tx.find_by_name_and_type(name, ExtensionType::Fixed).await?
    else {
        debug!(%name, "no fixed extension to release");
        return Ok(None);
    };

    let record = tx.update(&existing.deactivated()).await?;
    info!(id = %record.id, name = %record.name, "fixed extension released");
    Ok(Some(record))
}

fn names(records: Vec<ExtensionRecord>) -> Vec<String> {
    records.into_iter().map(|record| record.name).collect()
}
