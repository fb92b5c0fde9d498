pub mod connection;
pub mod event_bus;
pub mod manager;

pub use connection::{Connection, Delivery};
pub use event_bus::{ExtensionEventBus, ExtensionEventFrame};
pub use manager::ConnectionManager;
