//! Admission gate: CORS headers and preflight short-circuit.
//!
//! Runs first for every registered route, before any session check. It never
//! rejects a request: a disallowed origin only loses the allow-origin header.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
            ORIGIN,
        },
        HeaderMap, HeaderValue, Method, Request, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::security::OriginPolicy;

pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization, X-Requested-With";
pub const ALLOW_CREDENTIALS: &str = "true";
/// Preflight cache lifetime (24 hours).
pub const MAX_AGE: &str = "86400";

/// Per-request admission outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionDecision {
    /// Origin echoed back in `Access-Control-Allow-Origin`, when allowed.
    pub origin_echoed: Option<HeaderValue>,
    pub is_preflight: bool,
    /// Whether the request continues to the wrapped handler.
    pub should_forward: bool,
}

impl AdmissionDecision {
    /// Decide admission from the request's `Origin` header and method.
    pub fn evaluate(policy: &OriginPolicy, origin: Option<&HeaderValue>, method: &Method) -> Self {
        let origin_echoed = origin
            .filter(|value| {
                value
                    .to_str()
                    .map(|origin| policy.is_allowed(origin))
                    .unwrap_or(false)
            })
            .cloned();
        let is_preflight = method == Method::OPTIONS;

        Self {
            origin_echoed,
            is_preflight,
            should_forward: !is_preflight,
        }
    }

    /// Write the CORS headers for this decision.
    pub fn apply(&self, headers: &mut HeaderMap) {
        if let Some(origin) = &self.origin_echoed {
            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
        }
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
        headers.insert(
            ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static(ALLOW_CREDENTIALS),
        );
        headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static(MAX_AGE));
    }
}

/// Middleware applying [`AdmissionDecision`] to every request.
///
/// `OPTIONS` requests are answered here with `200` and an empty body.
pub async fn admission_gate(
    State(policy): State<Arc<OriginPolicy>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let decision = AdmissionDecision::evaluate(&policy, req.headers().get(ORIGIN), req.method());

    if req.headers().contains_key(ORIGIN) && decision.origin_echoed.is_none() {
        tracing::debug!(
            origin = ?req.headers().get(ORIGIN),
            path = %req.uri().path(),
            "Origin not in allow-list"
        );
    }

    let mut response = if decision.should_forward {
        next.run(req).await
    } else {
        tracing::trace!(path = %req.uri().path(), "Answering preflight");
        StatusCode::OK.into_response()
    };

    decision.apply(response.headers_mut());
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    fn gated(calls: Arc<AtomicUsize>) -> Router {
        let policy = Arc::new(OriginPolicy::new(["https://app.example"]));
        Router::new()
            .route(
                "/resource",
                get(move || {
                    let calls = calls.clone();
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        (StatusCode::ACCEPTED, "handled")
                    }
                }),
            )
            .layer(middleware::from_fn_with_state(policy, admission_gate))
    }

    fn assert_standard_headers(headers: &HeaderMap) {
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], ALLOW_METHODS);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_HEADERS], ALLOW_HEADERS);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[ACCESS_CONTROL_MAX_AGE], "86400");
    }

    #[test]
    fn test_evaluate() {
        let policy = OriginPolicy::new(["https://app.example"]);
        let allowed = HeaderValue::from_static("https://app.example");
        let denied = HeaderValue::from_static("https://evil.com");

        let decision = AdmissionDecision::evaluate(&policy, Some(&allowed), &Method::GET);
        assert_eq!(decision.origin_echoed, Some(allowed.clone()));
        assert!(!decision.is_preflight);
        assert!(decision.should_forward);

        let decision = AdmissionDecision::evaluate(&policy, Some(&denied), &Method::OPTIONS);
        assert_eq!(decision.origin_echoed, None);
        assert!(decision.is_preflight);
        assert!(!decision.should_forward);

        let decision = AdmissionDecision::evaluate(&policy, None, &Method::POST);
        assert_eq!(decision.origin_echoed, None);
        assert!(decision.should_forward);
    }

    #[tokio::test]
    async fn test_preflight_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let response = gated(calls.clone())
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/resource")
                    .header(ORIGIN, "https://app.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "https://app.example");
        assert_standard_headers(response.headers());
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_allowed_origin_is_echoed() {
        let calls = Arc::new(AtomicUsize::new(0));
        let response = gated(calls.clone())
            .oneshot(
                Request::builder()
                    .uri("/resource")
                    .header(ORIGIN, "https://app.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "https://app.example");
        assert_standard_headers(response.headers());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_disallowed_origin_still_served() {
        let calls = Arc::new(AtomicUsize::new(0));
        let response = gated(calls.clone())
            .oneshot(
                Request::builder()
                    .uri("/resource")
                    .header(ORIGIN, "https://evil.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert!(!response.headers().contains_key(ACCESS_CONTROL_ALLOW_ORIGIN));
        assert_standard_headers(response.headers());
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"handled");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_preflight_on_get_only_route() {
        // OPTIONS is not registered on the route; the gate still answers it.
        let calls = Arc::new(AtomicUsize::new(0));
        let response = gated(calls.clone())
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/resource")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(!response.headers().contains_key(ACCESS_CONTROL_ALLOW_ORIGIN));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
