//! Configuration library for extcheck.
//!
//! Values are composed from built-in defaults, an optional TOML file and the
//! process environment (after `.env` has been loaded), in increasing order of
//! precedence. Command-line overrides are applied by the server binary on
//! top of the loaded [`Config`].
#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::sources::{EnvConfig, FileConfig};
pub use models::{
    BroadcastConfig, Config, ConfigMetadata, CorsConfig, DatabaseConfig,
    ServerConfig,
};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
