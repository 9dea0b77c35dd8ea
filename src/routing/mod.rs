//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     app_routes.rs (method + path → handler, public or protected)
//!     → table.rs (wraps each route in the middleware pipeline)
//!     → axum Router (immutable)
//!
//! Per request:
//!     admission gate → [session gate if protected] → handler
//! ```
//!
//! # Design Decisions
//! - Routes are registered at startup and immutable at runtime
//! - Unmatched paths still pass the admission gate

pub mod app_routes;
pub mod table;

pub use app_routes::app_router;
pub use table::{Access, RouteTable};
