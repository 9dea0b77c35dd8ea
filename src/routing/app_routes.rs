//! The application's route set.
//!
//! Business handlers (crawler, dashboard, export, ...) live outside this
//! crate; until they are wired in, their routes answer `501 Not Implemented`
//! behind the full admission pipeline.

use std::sync::Arc;

use axum::{
    http::{StatusCode, Uri},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::http::middleware::SharedSessionValidator;
use crate::routing::table::RouteTable;
use crate::security::OriginPolicy;

/// Build the application router.
pub fn app_router(policy: Arc<OriginPolicy>, sessions: SharedSessionValidator) -> Router {
    register(RouteTable::new(policy, sessions)).into_router(not_found)
}

/// Register every application route on `table`.
pub fn register(table: RouteTable) -> RouteTable {
    let table = table.public("/health", get(health));

    let table = table
        // Users
        .public("/signup", get(not_implemented).post(not_implemented))
        .public("/signin", get(not_implemented).post(not_implemented))
        .protected("/account", get(not_implemented).post(not_implemented))
        .protected("/account/delete", get(not_implemented).post(not_implemented))
        .protected("/signout", get(not_implemented))
        // Projects
        .protected("/", get(not_implemented))
        .protected("/project/add", get(not_implemented).post(not_implemented))
        .protected("/project/edit", get(not_implemented).post(not_implemented))
        .protected("/project/delete", get(not_implemented))
        // Crawler
        .protected("/crawl/start", get(not_implemented))
        .protected("/crawl/stop", get(not_implemented))
        .protected("/crawl/live", get(not_implemented))
        .protected("/crawl/auth", get(not_implemented).post(not_implemented))
        .protected("/crawl/ws", get(not_implemented))
        // Reports
        .protected("/dashboard", get(not_implemented))
        .protected("/explorer", get(not_implemented))
        .protected("/issues", get(not_implemented))
        .protected("/issues/view", get(not_implemented))
        .protected("/resources", get(not_implemented))
        // Export and archive
        .protected("/export", get(not_implemented))
        .protected("/export/csv", get(not_implemented))
        .protected("/export/sitemap", get(not_implemented))
        .protected("/export/resources", get(not_implemented))
        .protected("/export/wazc", get(not_implemented))
        .protected("/archive", get(not_implemented))
        .protected("/archive/download", get(not_implemented))
        .protected("/replay", get(not_implemented))
        .protected("/support-seonaut", get(not_implemented));

    register_api(table)
}

fn register_api(table: RouteTable) -> RouteTable {
    table
        .public("/api/auth/signup", post(not_implemented))
        .public("/api/auth/signin", post(not_implemented))
        .protected("/api/auth/signout", post(not_implemented))
        .protected("/api/auth/user", get(not_implemented))
        .protected("/api/projects", get(not_implemented).post(not_implemented))
        .protected(
            "/api/projects/{id}",
            get(not_implemented).put(not_implemented).delete(not_implemented),
        )
        .protected("/api/projects/{id}/crawl/start", post(not_implemented))
        .protected("/api/projects/{id}/crawl/stop", post(not_implemented))
        .protected("/api/projects/{id}/crawl/status", get(not_implemented))
        .protected("/api/projects/{id}/issues", get(not_implemented))
        .protected("/api/projects/{id}/issues/{issue_id}", get(not_implemented))
        .protected("/api/projects/{id}/dashboard", get(not_implemented))
        .protected("/api/projects/{id}/pages", get(not_implemented))
        .protected("/api/projects/{id}/export/csv", get(not_implemented))
        .protected("/api/projects/{id}/export/sitemap", get(not_implemented))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "healthy", "service": "seonaut" }))
}

async fn not_implemented(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(json!({ "error": "not implemented", "path": uri.path() })),
    )
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "not found", "path": uri.path() })),
    )
}
