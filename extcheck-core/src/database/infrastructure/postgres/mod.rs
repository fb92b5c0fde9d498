pub mod extensions;

pub use extensions::PostgresExtensionStore;
