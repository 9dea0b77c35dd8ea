//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing)
//!     → middleware/admission.rs (CORS headers, preflight)
//!     → middleware/session.rs (protected routes)
//!     → handler
//! ```

pub mod middleware;
pub mod server;

pub use server::HttpServer;
