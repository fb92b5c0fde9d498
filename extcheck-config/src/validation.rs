use thiserror::Error;

use super::models::Config;

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("DATABASE_URL must start with postgres:// or postgresql://")]
    UnsupportedDatabaseUrl,
    #[error("{field} must be greater than zero")]
    ZeroValue { field: &'static str },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    if let Some(url) = &config.database.url
        && !(url.starts_with("postgres://")
            || url.starts_with("postgresql://"))
    {
        return Err(ConfigGuardRailError::UnsupportedDatabaseUrl);
    }

    for (field, value) in [
        (
            "DATABASE_MAX_CONNECTIONS",
            config.database.max_connections as usize,
        ),
        ("BROADCAST_CAPACITY", config.broadcast.capacity),
        ("BROADCAST_CLIENT_QUEUE", config.broadcast.client_queue),
    ] {
        if value == 0 {
            return Err(ConfigGuardRailError::ZeroValue { field });
        }
    }

    if config.database.url.is_none() && !config.dev_mode {
        warnings.push_with_hint(
            "DATABASE_URL not configured; extensions are kept in memory and lost on restart",
            "Set DATABASE_URL to a PostgreSQL instance, or DEV_MODE=true to silence this warning",
        );
    }

    if config.cors.allows_any_origin() && !config.dev_mode {
        warnings.push_with_hint(
            "CORS accepts requests from any origin",
            "Set CORS_ALLOWED_ORIGINS to the browser origins that serve the UI",
        );
    }

    Ok(warnings)
}
