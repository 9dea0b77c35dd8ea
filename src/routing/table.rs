//! Route registration with a fixed middleware pipeline.
//!
//! # Responsibilities
//! - Register method + path handlers as public or protected
//! - Wrap protected handlers with the session gate
//! - Put the admission gate in front of every route and the fallback
//!
//! # Design Decisions
//! - The stage order is fixed here once: admission, then session, then handler
//! - Preflight requests never reach the session gate

use std::sync::Arc;

use axum::{
    handler::Handler,
    middleware,
    routing::MethodRouter,
    Router,
};

use crate::http::middleware::{admission_gate, require_session, SharedSessionValidator};
use crate::security::OriginPolicy;

/// Whether a route needs a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
}

/// Builder for the application router.
pub struct RouteTable {
    router: Router,
    policy: Arc<OriginPolicy>,
    sessions: SharedSessionValidator,
    registered: Vec<(String, Access)>,
}

impl RouteTable {
    pub fn new(policy: Arc<OriginPolicy>, sessions: SharedSessionValidator) -> Self {
        Self {
            router: Router::new(),
            policy,
            sessions,
            registered: Vec::new(),
        }
    }

    /// Register `methods` at `path`.
    ///
    /// The same path may be registered several times with disjoint methods,
    /// each with its own access level.
    pub fn route(mut self, path: &str, access: Access, methods: MethodRouter) -> Self {
        let methods = match access {
            Access::Public => methods,
            Access::Protected => methods.route_layer(middleware::from_fn_with_state(
                self.sessions.clone(),
                require_session,
            )),
        };

        tracing::trace!(path, ?access, "Route registered");
        self.registered.push((path.to_string(), access));
        self.router = self.router.route(path, methods);
        self
    }

    pub fn public(self, path: &str, methods: MethodRouter) -> Self {
        self.route(path, Access::Public, methods)
    }

    pub fn protected(self, path: &str, methods: MethodRouter) -> Self {
        self.route(path, Access::Protected, methods)
    }

    /// Registered paths with their access level, in registration order.
    pub fn registered(&self) -> &[(String, Access)] {
        &self.registered
    }

    /// Finish the table with `fallback` for unmatched paths.
    ///
    /// The admission gate wraps every route, the method-not-allowed answers
    /// and the fallback, so `OPTIONS` is answered for any path.
    pub fn into_router<H, T>(self, fallback: H) -> Router
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        tracing::debug!(routes = self.registered.len(), "Route table built");
        self.router
            .fallback(fallback)
            .layer(middleware::from_fn_with_state(self.policy, admission_gate))
    }
}
