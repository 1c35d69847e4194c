//! Per-route role/permission requirements.
//!
//! Requirements are attached when a route is registered:
//!
//! ```ignore
//! .route("/role-protected", get(role_protected).require(Requirement::role("user")))
//! ```
//!
//! The guard reads the `AuthCtx` bound by the gate and answers 403 when the
//! principal lacks the grant. It never produces a 401; that is the gate's job.

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::api::v1::extractors::{AuthCtx, AuthOutcome};
use crate::error::AppError;
use crate::services::auth::Principal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    Authenticated,
    Role(String),
    Permission(String),
    /// Every listed role.
    AllRoles(Vec<String>),
    /// At least one listed role.
    AnyRole(Vec<String>),
}

impl Requirement {
    pub fn role(name: impl Into<String>) -> Self {
        Self::Role(name.into())
    }

    pub fn permission(name: impl Into<String>) -> Self {
        Self::Permission(name.into())
    }

    pub fn check(&self, principal: Option<&Principal>) -> Result<(), AccessDenied> {
        let principal = principal.ok_or(AccessDenied::Unauthenticated)?;

        match self {
            Requirement::Authenticated => Ok(()),
            Requirement::Role(role) if principal.has_role(role) => Ok(()),
            Requirement::Role(role) => Err(AccessDenied::RoleInsufficient(role.clone())),
            Requirement::Permission(perm) if principal.is_permitted(perm) => Ok(()),
            Requirement::Permission(perm) => {
                Err(AccessDenied::PermissionInsufficient(perm.clone()))
            }
            Requirement::AllRoles(roles) => match roles.iter().find(|r| !principal.has_role(r)) {
                Some(missing) => Err(AccessDenied::RoleInsufficient(missing.clone())),
                None => Ok(()),
            },
            Requirement::AnyRole(roles) => {
                if roles.iter().any(|r| principal.has_role(r)) {
                    Ok(())
                } else {
                    Err(AccessDenied::RoleInsufficient(roles.join(",")))
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    #[error("no authenticated principal")]
    Unauthenticated,
    #[error("missing role: {0}")]
    RoleInsufficient(String),
    #[error("missing permission: {0}")]
    PermissionInsufficient(String),
}

pub trait RequireExt {
    fn require(self, requirement: Requirement) -> Self;
}

impl<S> RequireExt for MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn require(self, requirement: Requirement) -> Self {
        self.route_layer(middleware::from_fn_with_state(requirement, guard_middleware))
    }
}

async fn guard_middleware(
    State(requirement): State<Requirement>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ctx = req.extensions().get::<AuthCtx>();

    // Preflight never carries credentials.
    if matches!(ctx.map(|c| c.outcome), Some(AuthOutcome::Bypassed)) {
        return Ok(next.run(req).await);
    }

    let principal = ctx.and_then(|c| c.principal.as_ref());
    if let Err(denied) = requirement.check(principal) {
        tracing::warn!(
            subject = principal.map(|p| p.subject.as_str()),
            requirement = ?requirement,
            reason = %denied,
            "authorization denied"
        );
        return Err(AppError::Forbidden(denied));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::Grants;

    fn admin() -> Principal {
        Principal::new("admin", Grants::new(["user", "admin"], ["user:view", "user:*"]))
    }

    fn alice() -> Principal {
        Principal::new("alice", Grants::new(["user"], ["user:view"]))
    }

    #[test]
    fn test_authenticated() {
        assert_eq!(Requirement::Authenticated.check(Some(&alice())), Ok(()));
        assert_eq!(
            Requirement::Authenticated.check(None),
            Err(AccessDenied::Unauthenticated)
        );
    }

    #[test]
    fn test_role() {
        assert_eq!(Requirement::role("user").check(Some(&alice())), Ok(()));
        assert_eq!(Requirement::role("admin").check(Some(&admin())), Ok(()));
        assert_eq!(
            Requirement::role("admin").check(Some(&alice())),
            Err(AccessDenied::RoleInsufficient("admin".into()))
        );
    }

    #[test]
    fn test_permission_with_wildcard() {
        assert_eq!(Requirement::permission("user:view").check(Some(&alice())), Ok(()));
        assert_eq!(Requirement::permission("user:delete").check(Some(&admin())), Ok(()));
        assert_eq!(
            Requirement::permission("user:delete").check(Some(&alice())),
            Err(AccessDenied::PermissionInsufficient("user:delete".into()))
        );
    }

    #[test]
    fn test_role_lists() {
        let both = Requirement::AllRoles(vec!["user".into(), "admin".into()]);
        assert_eq!(both.check(Some(&admin())), Ok(()));
        assert_eq!(
            both.check(Some(&alice())),
            Err(AccessDenied::RoleInsufficient("admin".into()))
        );

        let either = Requirement::AnyRole(vec!["admin".into(), "user".into()]);
        assert_eq!(either.check(Some(&alice())), Ok(()));
        let neither = Requirement::AnyRole(vec!["ops".into(), "root".into()]);
        assert_eq!(
            neither.check(Some(&alice())),
            Err(AccessDenied::RoleInsufficient("ops,root".into()))
        );
    }
}
