//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! Environment::from_process() (captured once)
//!     + config file (TOML, optional)
//!     → resolver.rs (defaults < file < SEONAUT_* < DATABASE_URL < PORT)
//!     → Configuration (immutable)
//!     → passed explicitly to the server at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once resolved; there is no reload
//! - All fields have defaults, so an absent file is not an error
//! - Malformed platform overrides never abort startup

pub mod database_url;
pub mod env;
pub mod loader;
pub mod resolver;
pub mod schema;

pub use env::Environment;
pub use loader::ConfigError;
pub use resolver::resolve;
pub use schema::{Configuration, CrawlerSection, DatabaseSection, ServerSection};
