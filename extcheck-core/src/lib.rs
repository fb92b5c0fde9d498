//! # extcheck core
//!
//! Business rules for the extension blocklist service.
//!
//! - [`domain::extensions::validator`]: syntactic checks for a proposed
//!   extension name
//! - [`domain::extensions::ExtensionManager`]: activation state machine,
//!   custom capacity, fixed/custom conflict detection and change broadcasts
//! - [`database`]: the transactional storage port plus PostgreSQL and
//!   in-memory adapters
//!
//! ## Feature Flags
//!
//! - `database` (default): PostgreSQL adapter and the bundled [`MIGRATOR`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Storage ports and adapters
pub mod database;

/// Extension domain services
pub mod domain;

/// Error types and error handling utilities
pub mod error;

#[cfg(feature = "database")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub use domain::extensions::{
    ChangeNotifier, ExtensionManager, MAX_CUSTOM_EXTENSIONS, validator,
};
pub use error::{ExtensionError, Result, StoreError};
