use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

use crate::services::auth::Principal;

use super::AuthCtx;

/// Extractor for handlers that need the authenticated principal.
/// Assumes the gate already put an `AuthCtx` into request extensions;
/// answers 401 when there is none or it carries no principal.
pub struct CurrentPrincipal(pub Principal);

impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .and_then(|ctx| ctx.principal.clone())
            .map(CurrentPrincipal)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
