#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Result, anyhow};
use axum_test::TestServer;
use extcheck_config::Config;
use extcheck_core::database::InMemoryExtensionStore;
use extcheck_server::{AppState, create_app};

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub store: InMemoryExtensionStore,
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".into();
    config.server.port = 0;
    config.dev_mode = true;
    config
}

fn build(config: Config, http_transport: bool) -> Result<TestApp> {
    let store = InMemoryExtensionStore::new();
    let state = AppState::new(Arc::new(config), Arc::new(store.clone()));
    let router = create_app(state.clone());

    let server = if http_transport {
        TestServer::builder()
            .http_transport()
            .build(router)
            .map_err(|err| anyhow!(err.to_string()))?
    } else {
        TestServer::new(router).map_err(|err| anyhow!(err.to_string()))?
    };

    Ok(TestApp {
        server,
        state,
        store,
    })
}

/// Router driven in-process over the mock transport.
pub fn build_test_app() -> Result<TestApp> {
    build(test_config(), false)
}

/// Router bound to a real local port; required for WebSocket upgrades.
pub fn build_http_test_app(config: Config) -> Result<TestApp> {
    build(config, true)
}
