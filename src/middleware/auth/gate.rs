//! Bearer token check → `AuthCtx` in request extensions.
//!
//! Every request is classified by the `PolicyMatcher` first. Public paths
//! pass through untouched. Anything else goes through:
//!
//! 1. `OPTIONS` preflight → bypassed, no credential inspection
//! 2. no `Authorization` header → `NoToken`
//! 3. header without the `Bearer ` prefix → `BadFormat`
//! 4. realm authentication fails → `InvalidOrExpired`
//!
//! The checks run in that order and each denial has its own fixed message.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Method, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::middleware::auth::policy::Policy;
use crate::services::auth::{Credential, Principal};
use crate::state::AppState;

pub const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    NoToken,
    BadFormat,
    InvalidOrExpired,
}

impl DenialReason {
    pub fn message(&self) -> &'static str {
        match self {
            DenialReason::NoToken => "no authentication token provided",
            DenialReason::BadFormat => "invalid token format, Bearer prefix required",
            DenialReason::InvalidOrExpired => "authentication token invalid or expired",
        }
    }
}

/// Result of running the gate on one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Bypassed,
    Authenticated(Principal),
    Denied(DenialReason),
}

/// Apply the gate to every route of `router`.
///
/// ```ignore
/// let app = api::v1::routes();
/// let app = middleware::auth::gate::apply(app, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, gate_middleware))
}

async fn gate_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if state.policy.classify(req.uri().path()) == Policy::Public {
        req.extensions_mut().insert(AuthCtx::public());
        return Ok(next.run(req).await);
    }

    let ctx = match authenticate(&state, req.method(), req.headers()).await {
        GateOutcome::Bypassed => AuthCtx::bypassed(),
        GateOutcome::Authenticated(principal) => AuthCtx::authenticated(principal),
        GateOutcome::Denied(reason) => {
            tracing::warn!(
                reason = ?reason,
                method = %req.method(),
                path = %req.uri().path(),
                "request denied"
            );
            return Err(AppError::Unauthenticated(reason));
        }
    };

    // middleware → extractor handoff
    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}

/// Pull the bearer credential out of the headers.
pub fn extract_credential(headers: &HeaderMap) -> Result<Credential, DenialReason> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(DenialReason::NoToken)?;

    let token = value
        .as_bytes()
        .strip_prefix(BEARER_PREFIX.as_bytes())
        .ok_or(DenialReason::BadFormat)?;

    // Prefixed but unreadable: the token itself is what's wrong.
    let token = std::str::from_utf8(token).map_err(|_| DenialReason::InvalidOrExpired)?;

    Ok(Credential::bearer(token.trim()))
}

/// Run the authentication state machine for a protected request.
pub async fn authenticate(state: &AppState, method: &Method, headers: &HeaderMap) -> GateOutcome {
    if method == Method::OPTIONS {
        return GateOutcome::Bypassed;
    }

    let credential = match extract_credential(headers) {
        Ok(credential) => credential,
        Err(reason) => return GateOutcome::Denied(reason),
    };

    match state.realms.authenticate(&credential).await {
        Ok(principal) => {
            tracing::debug!(subject = %principal.subject, "authenticated");
            GateOutcome::Authenticated(principal)
        }
        Err(err) => {
            // Subject is peeked for the log only; the token may be forged.
            tracing::warn!(
                error = %err,
                claimed_subject = ?state.codec.decode_subject(&credential.raw),
                "access token verification failed"
            );
            GateOutcome::Denied(DenialReason::InvalidOrExpired)
        }
    }
}
