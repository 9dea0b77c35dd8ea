//! SEOnaut server: configuration resolution and request admission.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::Configuration;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use security::OriginPolicy;
