//! Structured logging.
//!
//! The filter comes from `RUST_LOG` and falls back to [`DEFAULT_FILTER`].

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "seonaut_server=info,seonaut=info,tower_http=info";

/// Install the global subscriber.
///
/// Calling it again (e.g. from several tests) leaves the first one in place.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
