use std::{fmt, sync::Arc};

use extcheck_config::Config;
use extcheck_core::ExtensionManager;
use extcheck_core::database::ExtensionStore;

use crate::infra::websocket::{ConnectionManager, ExtensionEventBus};

#[derive(Clone)]
pub struct AppState {
    pub extensions: Arc<ExtensionManager>,
    pub store: Arc<dyn ExtensionStore>,
    pub config: Arc<Config>,
    pub websocket_manager: Arc<ConnectionManager>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("extensions", &self.extensions)
            .field("websocket_manager", &self.websocket_manager)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire the manager, the change topic and the socket registry around
    /// `store`.
    pub fn new(config: Arc<Config>, store: Arc<dyn ExtensionStore>) -> Self {
        let bus = Arc::new(ExtensionEventBus::new(config.broadcast.capacity));
        let extensions =
            Arc::new(ExtensionManager::new(Arc::clone(&store), bus.clone()));
        let websocket_manager = Arc::new(ConnectionManager::new(
            bus,
            config.broadcast.client_queue,
        ));

        Self {
            extensions,
            store,
            config,
            websocket_manager,
        }
    }

    pub fn extensions(&self) -> &ExtensionManager {
        &self.extensions
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
