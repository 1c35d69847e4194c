/*
 * Responsibility
 * - Demo resources behind the gate, one per requirement kind
 * - Requirements themselves are declared in routes.rs
 */
use axum::Json;

use crate::api::v1::dto::principal::PrincipalResponse;
use crate::api::v1::extractors::CurrentPrincipal;

pub async fn protected() -> &'static str {
    "this is a protected resource"
}

pub async fn role_protected() -> &'static str {
    "this resource requires the user role"
}

pub async fn permission_protected() -> &'static str {
    "this resource requires the user:view permission"
}

pub async fn admin_only() -> &'static str {
    "this resource requires the admin role"
}

pub async fn me(CurrentPrincipal(principal): CurrentPrincipal) -> Json<PrincipalResponse> {
    Json(principal.into())
}
