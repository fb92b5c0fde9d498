//! Core data model definitions shared across extcheck crates.
#![allow(missing_docs)]

pub mod error;
pub mod extension;
pub mod extension_type;
pub mod ids;

pub use error::{ModelError, Result};
pub use extension::{ExtensionRecord, NewExtension};
pub use extension_type::ExtensionType;
pub use ids::ExtensionId;
