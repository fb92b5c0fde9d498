use std::time::Duration;

use async_trait::async_trait;
use extcheck_model::{
    ExtensionId, ExtensionRecord, ExtensionType, NewExtension,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;

use crate::database::ports::extensions::{ExtensionStore, ExtensionTx};
use crate::error::{Result, StoreError};

/// PostgreSQL adapter over the `extensions` table.
#[derive(Debug, Clone)]
pub struct PostgresExtensionStore {
    pool: PgPool,
}

impl PostgresExtensionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(url)
            .await
            .map_err(|e| {
                StoreError::Internal(format!("Database connection failed: {e}"))
            })?;

        info!(max_connections, "PostgreSQL pool ready");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the bundled migrations.
    pub async fn migrate(&self) -> Result<()> {
        crate::MIGRATOR.run(&self.pool).await.map_err(|e| {
            StoreError::Internal(format!("Migration failed: {e}"))
        })
    }
}

#[async_trait]
impl ExtensionStore for PostgresExtensionStore {
    async fn begin(&self) -> Result<Box<dyn ExtensionTx>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PostgresExtensionTx { tx }))
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ExtensionRow {
    id: i64,
    name: String,
    kind: String,
    is_active: bool,
}

impl TryFrom<ExtensionRow> for ExtensionRecord {
    type Error = StoreError;

    fn try_from(row: ExtensionRow) -> Result<Self> {
        Ok(ExtensionRecord {
            id: ExtensionId(row.id),
            name: row.name,
            kind: row.kind.parse()?,
            active: row.is_active,
        })
    }
}

/// Transaction-scoped advisory lock key per partition.
fn partition_lock_key(kind: ExtensionType) -> i64 {
    match kind {
        ExtensionType::Fixed => 0x6578_7463_6b01,
        ExtensionType::Custom => 0x6578_7463_6b02,
    }
}

struct PostgresExtensionTx {
    tx: Transaction<'static, Postgres>,
}

fn map_rows(rows: Vec<ExtensionRow>) -> Result<Vec<ExtensionRecord>> {
    rows.into_iter().map(ExtensionRecord::try_from).collect()
}

#[async_trait]
impl ExtensionTx for PostgresExtensionTx {
    async fn find_by_name(
        &mut self,
        name: &str,
    ) -> Result<Option<ExtensionRecord>> {
        let row = sqlx::query_as::<_, ExtensionRow>(
            r#"
            SELECT id, name, type AS kind, is_active
            FROM extensions
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&mut *self.tx)
        .await?;

        row.map(ExtensionRecord::try_from).transpose()
    }

    async fn find_by_name_and_type(
        &mut self,
        name: &str,
        kind: ExtensionType,
    ) -> Result<Option<ExtensionRecord>> {
        let row = sqlx::query_as::<_, ExtensionRow>(
            r#"
            SELECT id, name, type AS kind, is_active
            FROM extensions
            WHERE name = $1 AND type = $2
            "#,
        )
        .bind(name)
        .bind(kind.as_str())
        .fetch_optional(&mut *self.tx)
        .await?;

        row.map(ExtensionRecord::try_from).transpose()
    }

    async fn list_active(
        &mut self,
        kind: ExtensionType,
    ) -> Result<Vec<ExtensionRecord>> {
        let rows = sqlx::query_as::<_, ExtensionRow>(
            r#"
            SELECT id, name, type AS kind, is_active
            FROM extensions
            WHERE type = $1 AND is_active
            ORDER BY id
            "#,
        )
        .bind(kind.as_str())
        .fetch_all(&mut *self.tx)
        .await?;

        map_rows(rows)
    }

    async fn count_active(&mut self, kind: ExtensionType) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM extensions WHERE type = $1 AND is_active",
        )
        .bind(kind.as_str())
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(count.max(0) as u64)
    }

    async fn lock_partition(&mut self, kind: ExtensionType) -> Result<()> {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(partition_lock_key(kind))
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn insert(&mut self, new: NewExtension) -> Result<ExtensionRecord> {
        let row = sqlx::query_as::<_, ExtensionRow>(
            r#"
            INSERT INTO extensions (name, type, is_active)
            VALUES ($1, $2, TRUE)
            RETURNING id, name, type AS kind, is_active
            "#,
        )
        .bind(&new.name)
        .bind(new.kind.as_str())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                StoreError::Duplicate(new.name.clone())
            }
            other => StoreError::Database(other),
        })?;

        ExtensionRecord::try_from(row)
    }

    async fn update(
        &mut self,
        record: &ExtensionRecord,
    ) -> Result<ExtensionRecord> {
        let row = sqlx::query_as::<_, ExtensionRow>(
            r#"
            UPDATE extensions
            SET is_active = $2
            WHERE id = $1
            RETURNING id, name, type AS kind, is_active
            "#,
        )
        .bind(record.id.get())
        .bind(record.active)
        .fetch_optional(&mut *self.tx)
        .await?
        .ok_or_else(|| {
            StoreError::Internal(format!(
                "extension {} vanished during update",
                record.id
            ))
        })?;

        ExtensionRecord::try_from(row)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
