//! Per-request middleware stages.
//!
//! # Order
//! ```text
//! request
//!     → admission.rs (CORS headers, OPTIONS answered here)
//!     → session.rs (protected routes only)
//!     → handler
//! ```

pub mod admission;
pub mod session;

pub use admission::{admission_gate, AdmissionDecision};
pub use session::{
    require_session, SessionPresence, SessionValidator, SessionVerdict, SharedSessionValidator,
};
