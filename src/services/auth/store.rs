//! Identity lookups the gate depends on but does not own.
//!
//! Both stores here are fixed stand-ins: one hardcoded account for login and
//! a username rule for grants. A real deployment swaps in implementations
//! backed by a user/role database; the gate and guard only see the traits.
use async_trait::async_trait;

use crate::services::auth::principal::Grants;

pub const BASE_ROLE: &str = "user";
pub const BASE_PERMISSION: &str = "user:view";
pub const ADMIN_SUBJECT: &str = "admin";
pub const ADMIN_ROLE: &str = "admin";
pub const ADMIN_PERMISSION: &str = "user:*";

/// Username/password check used by the login endpoint.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    async fn verify(&self, username: &str, password: &str) -> bool;
}

/// Role and permission lookup keyed by subject.
#[async_trait]
pub trait RoleStore: Send + Sync + 'static {
    async fn grants(&self, subject: &str) -> Grants;
}

/// Single plaintext account. Not for production use.
#[derive(Debug, Clone)]
pub struct StaticUserStore {
    username: String,
    password: String,
}

impl Default for StaticUserStore {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "password".to_string(),
        }
    }
}

#[async_trait]
impl UserStore for StaticUserStore {
    async fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

/// Everyone gets the base grants; `admin` additionally gets the admin role and `user:*`.
#[derive(Debug, Clone, Default)]
pub struct StaticRoleStore;

#[async_trait]
impl RoleStore for StaticRoleStore {
    async fn grants(&self, subject: &str) -> Grants {
        let mut grants = Grants::new([BASE_ROLE], [BASE_PERMISSION]);
        if subject == ADMIN_SUBJECT {
            grants.merge(Grants::new([ADMIN_ROLE], [ADMIN_PERMISSION]));
        }
        grants
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_user_store() {
        let store = StaticUserStore::default();
        assert!(store.verify("admin", "password").await);
        assert!(!store.verify("admin", "Password").await);
        assert!(!store.verify("alice", "password").await);
        assert!(!store.verify("", "").await);
    }

    #[tokio::test]
    async fn test_admin_grants() {
        let grants = StaticRoleStore.grants("admin").await;
        assert_eq!(grants, Grants::new(["user", "admin"], ["user:view", "user:*"]));
    }

    #[tokio::test]
    async fn test_base_grants() {
        for subject in ["alice", "Admin", "", "admin "] {
            let grants = StaticRoleStore.grants(subject).await;
            assert_eq!(grants, Grants::new(["user"], ["user:view"]), "{subject:?}");
        }
    }
}
