//! Session gate for protected routes.
//!
//! The admission gate only knows that a [`SessionValidator`] sits between it
//! and protected handlers. How a session is recognised is up to the
//! implementation; [`SessionPresence`] is the default one.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::State,
    http::{header::COOKIE, request::Parts, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;

/// Outcome of a session check.
pub enum SessionVerdict {
    /// Continue to the wrapped handler.
    Continue,
    /// Stop here and answer with this response.
    Reject(Response),
}

/// Decides whether a request carries a usable session.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    async fn validate(&self, parts: &Parts) -> SessionVerdict;
}

/// Shared handle used as middleware state.
pub type SharedSessionValidator = Arc<dyn SessionValidator>;

/// Middleware running the configured [`SessionValidator`].
pub async fn require_session(
    State(validator): State<SharedSessionValidator>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let (parts, body) = req.into_parts();

    match validator.validate(&parts).await {
        SessionVerdict::Continue => next.run(Request::from_parts(parts, body)).await,
        SessionVerdict::Reject(response) => {
            tracing::debug!(method = %parts.method, path = %parts.uri.path(), "Session required");
            response
        }
    }
}

/// Default session cookie name.
pub const DEFAULT_SESSION_COOKIE: &str = "session";

/// Where browsers without a session are sent.
pub const SIGN_IN_PATH: &str = "/signin";

/// Treats a request as authenticated when it carries a non-empty session cookie.
///
/// API callers (`/api/...`) get `401` with a JSON body, browsers a
/// `303 See Other` to the sign-in page.
#[derive(Debug, Clone)]
pub struct SessionPresence {
    cookie_name: String,
}

impl SessionPresence {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }

    /// Whether `parts` carries the session cookie with a value.
    pub fn has_session(&self, parts: &Parts) -> bool {
        parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .any(|(name, value)| name == self.cookie_name && !value.is_empty())
    }
}

impl Default for SessionPresence {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_COOKIE)
    }
}

#[async_trait]
impl SessionValidator for SessionPresence {
    async fn validate(&self, parts: &Parts) -> SessionVerdict {
        if self.has_session(parts) {
            return SessionVerdict::Continue;
        }

        let response = if parts.uri.path().starts_with("/api/") {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "authentication required" })),
            )
                .into_response()
        } else {
            Redirect::to(SIGN_IN_PATH).into_response()
        };
        SessionVerdict::Reject(response)
    }
}
