/*
 * Responsibility
 * - URL layout of the service
 * - Per-route authorization requirements are declared here with `.require(..)`;
 *   authentication itself is applied router-wide by the gate in app.rs
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::v1::handlers::{
    auth::{login, unauthorized},
    health::health,
    resources::{admin_only, me, permission_protected, protected, role_protected},
};
use crate::middleware::auth::guard::{RequireExt, Requirement};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/login", post(login))
        .route("/unauthorized", get(unauthorized))
        .route(
            "/protected",
            get(protected).require(Requirement::Authenticated),
        )
        .route(
            "/role-protected",
            get(role_protected).require(Requirement::role("user")),
        )
        .route(
            "/permission-protected",
            get(permission_protected).require(Requirement::permission("user:view")),
        )
        .route("/admin", get(admin_only).require(Requirement::role("admin")))
        .route("/me", get(me).require(Requirement::Authenticated))
}
