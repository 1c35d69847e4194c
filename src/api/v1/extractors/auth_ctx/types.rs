/*
 * Responsibility
 * - The per-request authentication context handlers see
 * - Built fresh by the gate for each request and placed in request extensions;
 *   never shared across requests
 */

use crate::services::auth::Principal;

/// How the gate let the request through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Path classified as public; no credential was inspected.
    Public,
    /// CORS preflight; no credential was inspected.
    Bypassed,
    Authenticated,
}

#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub principal: Option<Principal>,
    pub outcome: AuthOutcome,
}

impl AuthCtx {
    pub fn public() -> Self {
        Self {
            principal: None,
            outcome: AuthOutcome::Public,
        }
    }

    pub fn bypassed() -> Self {
        Self {
            principal: None,
            outcome: AuthOutcome::Bypassed,
        }
    }

    pub fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
            outcome: AuthOutcome::Authenticated,
        }
    }
}
