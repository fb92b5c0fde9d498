//! Storage port for extension records and its adapters.
//!
//! Application code only sees [`ports::extensions::ExtensionStore`]; the
//! PostgreSQL adapter is used in production, the in-memory adapter in tests
//! and when no database is configured.

pub mod infrastructure;
pub mod ports;

pub use infrastructure::memory::InMemoryExtensionStore;
#[cfg(feature = "database")]
pub use infrastructure::postgres::PostgresExtensionStore;
pub use ports::extensions::{ExtensionStore, ExtensionTx};
