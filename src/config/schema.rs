//! Configuration schema definitions.
//!
//! The `Default` impls carry the compiled-in defaults, so a file that only
//! names a few keys deserializes on top of them field by field.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default bind host for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default HTTP server port.
pub const DEFAULT_SERVER_PORT: u16 = 10000;

/// Default database port, also used when a connection URL has none.
pub const DEFAULT_DATABASE_PORT: u16 = 3306;

/// User agent announced by the crawler.
pub const DEFAULT_AGENT: &str = "Mozilla/5.0 (compatible; SEOnautBot/1.0; +https://seonaut.org/bot)";

/// Root configuration, resolved once at startup and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Configuration {
    /// Crawler settings.
    pub crawler: CrawlerSection,

    /// HTTP server settings.
    pub server: ServerSection,

    /// Database connection settings.
    pub database: DatabaseSection,
}

/// Crawler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CrawlerSection {
    /// User-Agent header sent with every crawl request.
    pub agent: String,
}

impl Default for CrawlerSection {
    fn default() -> Self {
        Self {
            agent: DEFAULT_AGENT.to_string(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSection {
    /// Bind host (e.g., "0.0.0.0").
    pub host: String,

    /// Bind port.
    pub port: u16,

    /// Public URL the server is reachable at.
    #[serde(rename = "url")]
    pub public_url: String,

    /// URL of the browser frontend talking to this server.
    pub frontend_url: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            public_url: String::new(),
            frontend_url: String::new(),
        }
    }
}

impl ServerSection {
    /// `host:port` as shown in logs.
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// Database configuration.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// Database server host.
    #[serde(rename = "server")]
    pub host: String,

    pub port: u16,

    pub user: String,

    pub password: String,

    /// Name of the database (schema) to use.
    #[serde(rename = "database")]
    pub database_name: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_DATABASE_PORT,
            user: String::new(),
            password: String::new(),
            database_name: String::new(),
        }
    }
}

// Keeps the password out of logs and panic messages.
impl fmt::Debug for DatabaseSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSection")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database_name", &self.database_name)
            .finish()
    }
}
