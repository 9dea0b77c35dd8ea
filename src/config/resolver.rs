//! Configuration resolution across all sources.
//!
//! # Precedence (lowest to highest)
//! ```text
//! compiled defaults
//!     → config file (field by field)
//!     → SEONAUT_<SECTION>_<KEY> variables (field by field)
//!     → DATABASE_URL (replaces the whole database section)
//!     → PORT (server port only)
//! ```
//!
//! Malformed `DATABASE_URL` or `PORT` values are skipped with a warning and
//! the lower-precedence value stands.

use std::path::Path;

use crate::config::database_url::parse_database_url;
use crate::config::env::{env_key, Environment, DATABASE_URL_VAR, PORT_VAR};
use crate::config::loader::{read_config_file, ConfigError};
use crate::config::schema::{Configuration, DEFAULT_DATABASE_PORT, DEFAULT_SERVER_PORT};

/// Resolve the effective configuration from the file at `path_hint` and `env`.
///
/// Fails only when the file exists but cannot be read or mapped.
pub fn resolve(path_hint: &Path, env: &Environment) -> Result<Configuration, ConfigError> {
    let mut config = match read_config_file(path_hint)? {
        Some((path, config)) => {
            tracing::info!(path = %path.display(), "Config file loaded");
            config
        }
        None => {
            tracing::info!(
                path = %path_hint.display(),
                "No config file found, using defaults and environment"
            );
            Configuration::default()
        }
    };

    apply_prefixed_overrides(&mut config, env);
    apply_database_url(&mut config, env);
    apply_platform_port(&mut config, env);

    Ok(config)
}

/// Apply `SEONAUT_*` overrides for every known configuration key.
pub fn apply_prefixed_overrides(config: &mut Configuration, env: &Environment) {
    let set = |target: &mut String, key: &str| {
        if let Some(value) = env.setting(key) {
            *target = value.to_string();
        }
    };

    set(&mut config.crawler.agent, "crawler.agent");

    set(&mut config.server.host, "server.host");
    set(&mut config.server.public_url, "server.url");
    set(&mut config.server.frontend_url, "server.frontend_url");
    if let Some(value) = env.setting("server.port") {
        config.server.port = parse_port_or_default(value, "server.port", DEFAULT_SERVER_PORT);
    }

    set(&mut config.database.host, "database.server");
    set(&mut config.database.user, "database.user");
    set(&mut config.database.password, "database.password");
    set(&mut config.database.database_name, "database.database");
    if let Some(value) = env.setting("database.port") {
        config.database.port = parse_port_or_default(value, "database.port", DEFAULT_DATABASE_PORT);
    }
}

/// Replace the database section from `DATABASE_URL` when it parses.
pub fn apply_database_url(config: &mut Configuration, env: &Environment) {
    let Some(raw) = env.get(DATABASE_URL_VAR) else {
        return;
    };

    match parse_database_url(raw) {
        Ok(database) => {
            tracing::debug!(
                host = %database.host,
                port = database.port,
                "Database section taken from {}",
                DATABASE_URL_VAR
            );
            config.database = database;
        }
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed {}", DATABASE_URL_VAR);
        }
    }
}

/// Override the server port from the platform `PORT` variable when it parses.
pub fn apply_platform_port(config: &mut Configuration, env: &Environment) {
    let Some(raw) = env.get(PORT_VAR) else {
        return;
    };

    match raw.parse::<u16>() {
        Ok(port) => config.server.port = port,
        Err(e) => {
            tracing::warn!(value = %raw, error = %e, "Ignoring malformed {}", PORT_VAR);
        }
    }
}

fn parse_port_or_default(value: &str, key: &str, default: u16) -> u16 {
    value.parse().unwrap_or_else(|_| {
        tracing::warn!(
            variable = %env_key(key),
            value = %value,
            default,
            "Invalid port, using default"
        );
        default
    })
}
