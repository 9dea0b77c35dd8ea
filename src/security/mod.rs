//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Environment → origins.rs (OriginPolicy, immutable)
//!
//! Incoming request:
//!     → http::middleware::admission (consults OriginPolicy)
//!     → http::middleware::session (protected routes only)
//!     → handler
//! ```
//!
//! # Design Decisions
//! - CORS is a browser-enforced boundary: a rejected origin only loses the
//!   allow-origin header, the request is still served

pub mod origins;

pub use origins::{OriginPolicy, DEFAULT_ALLOWED_ORIGINS};
