//! Extension blocklist domain: validation, activation rules and change
//! notification.

pub mod manager;
pub mod notifier;
pub mod validator;

pub use manager::{ExtensionManager, MAX_CUSTOM_EXTENSIONS};
pub use notifier::ChangeNotifier;
