//! Startup orchestration.
//!
//! Resolves configuration and the origin policy from one environment
//! snapshot, builds the server, and binds the listener last.

use std::io;
use std::path::Path;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{self, ConfigError, Environment, ServerSection};
use crate::http::middleware::SharedSessionValidator;
use crate::http::HttpServer;
use crate::security::OriginPolicy;

/// Fatal startup failures. The process exits non-zero on any of these.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },
}

/// Resolve everything the server needs and bind its listener.
pub async fn start(
    config_path: &Path,
    env: &Environment,
    sessions: SharedSessionValidator,
) -> Result<(HttpServer, TcpListener), StartupError> {
    let config = config::resolve(config_path, env)?;
    let policy = OriginPolicy::from_env(env);

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        public_url = %config.server.public_url,
        database_host = %config.database.host,
        database_port = config.database.port,
        database_name = %config.database.database_name,
        "Configuration resolved"
    );
    tracing::info!(origins = ?policy.origins(), "CORS allow-list");

    let listener = bind(&config.server).await?;
    Ok((HttpServer::new(config, policy, sessions), listener))
}

/// Bind a TCP listener on the configured host and port.
pub async fn bind(server: &ServerSection) -> Result<TcpListener, StartupError> {
    let address = server.bind_address();
    let listener = TcpListener::bind((server.host.as_str(), server.port))
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    tracing::info!(address = %address, "Listener bound");
    Ok(listener)
}
