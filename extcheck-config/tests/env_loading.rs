use std::fs;
use std::sync::Mutex;

use extcheck_config::{ConfigLoader, EnvConfig};
use once_cell::sync::Lazy;
use tempfile::tempdir;

// Tests in this file mutate the process environment.
static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

const KEYS: &[&str] = &[
    "EXTCHECK_CONFIG",
    "SERVER_HOST",
    "SERVER_PORT",
    "DATABASE_URL",
    "DATABASE_MAX_CONNECTIONS",
    "BROADCAST_CAPACITY",
    "BROADCAST_CLIENT_QUEUE",
    "CORS_ALLOWED_ORIGINS",
    "DEV_MODE",
];

fn clear_env() {
    for key in KEYS {
        unsafe { std::env::remove_var(key) };
    }
}

#[test]
fn gather_reads_typed_values() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();
    unsafe {
        std::env::set_var("SERVER_PORT", "9001");
        std::env::set_var("BROADCAST_CAPACITY", "not-a-number");
        std::env::set_var("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test");
        std::env::set_var("DEV_MODE", "on");
        std::env::set_var("DATABASE_URL", "   ");
    }

    let env = EnvConfig::gather();
    clear_env();

    assert_eq!(env.server_port, Some(9001));
    assert_eq!(env.broadcast_capacity, None);
    assert_eq!(
        env.cors_allowed_origins,
        Some(vec!["http://a.test".to_string(), "http://b.test".to_string()])
    );
    assert_eq!(env.dev_mode, Some(true));
    assert_eq!(env.database_url, None);
}

#[test]
fn dotenv_file_feeds_the_loader() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let dir = tempdir().unwrap();
    let env_file = dir.path().join(".env");
    fs::write(
        &env_file,
        "SERVER_PORT=7100\nDEV_MODE=true\nBROADCAST_CLIENT_QUEUE=8\n",
    )
    .unwrap();
    let config_file = dir.path().join("extcheck.toml");
    fs::write(&config_file, "[server]\nport = 9090\nhost = \"127.0.0.1\"\n")
        .unwrap();

    let load = ConfigLoader::new()
        .with_env_file(&env_file)
        .with_config_path(&config_file)
        .load();
    clear_env();
    let load = load.unwrap();

    assert!(load.config.metadata.env_file_loaded);
    assert_eq!(load.config.server.bind_address(), "127.0.0.1:7100");
    assert_eq!(load.config.broadcast.client_queue, 8);
    assert!(load.config.dev_mode);
    assert!(load.warnings.is_empty());
}

#[test]
fn missing_env_file_is_not_an_error() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let dir = tempdir().unwrap();
    let config_file = dir.path().join("extcheck.toml");
    fs::write(&config_file, "dev_mode = true\n").unwrap();

    let load = ConfigLoader::new()
        .with_env_file(dir.path().join("absent.env"))
        .with_config_path(&config_file)
        .load()
        .unwrap();

    assert!(!load.config.metadata.env_file_loaded);
    assert_eq!(load.config.server.port, 8080);
}
