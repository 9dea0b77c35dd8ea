//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields)
//!     → tower-http TraceLayer `request` span per request, with a request_id field
//!
//! Consumers:
//!     → logging.rs (fmt subscriber to stdout, filtered by RUST_LOG)
//! ```

pub mod logging;
