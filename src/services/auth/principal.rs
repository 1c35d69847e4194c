use std::collections::BTreeSet;

use crate::services::auth::permission;

/// Transport shape of a raw credential. Realms declare which kinds they accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    Bearer,
}

/// The bearer value as taken from the request, before verification.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub raw: String,
    pub kind: CredentialKind,
}

impl Credential {
    pub fn bearer(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            kind: CredentialKind::Bearer,
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never log the token itself
        f.debug_struct("Credential")
            .field("kind", &self.kind)
            .field("len", &self.raw.len())
            .finish()
    }
}

/// Roles and permissions granted to a subject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grants {
    pub roles: BTreeSet<String>,
    pub permissions: BTreeSet<String>,
}

impl Grants {
    pub fn new<R, P>(roles: R, permissions: P) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            roles: roles.into_iter().map(Into::into).collect(),
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn merge(&mut self, other: Grants) {
        self.roles.extend(other.roles);
        self.permissions.extend(other.permissions);
    }
}

/// Resolved identity of the caller for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject: String,
    pub roles: BTreeSet<String>,
    pub permissions: BTreeSet<String>,
}

impl Principal {
    pub fn new(subject: impl Into<String>, grants: Grants) -> Self {
        Self {
            subject: subject.into(),
            roles: grants.roles,
            permissions: grants.permissions,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Wildcard-aware: a grant of `user:*` permits `user:view`.
    pub fn is_permitted(&self, required: &str) -> bool {
        self.permissions
            .iter()
            .any(|granted| permission::implies(granted, required))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_checks() {
        let p = Principal::new("admin", Grants::new(["user", "admin"], ["user:view", "user:*"]));

        assert!(p.has_role("user"));
        assert!(p.has_role("admin"));
        assert!(!p.has_role("root"));
        assert!(p.is_permitted("user:view"));
        assert!(p.is_permitted("user:delete"));
        assert!(!p.is_permitted("post:view"));
    }

    #[test]
    fn test_grants_merge() {
        let mut g = Grants::new(["user"], ["user:view"]);
        g.merge(Grants::new(["admin", "user"], ["user:*"]));

        assert_eq!(g, Grants::new(["admin", "user"], ["user:*", "user:view"]));
    }

    #[test]
    fn test_credential_debug_hides_raw() {
        let c = Credential::bearer("secret.token.value");
        let rendered = format!("{:?}", c);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("Bearer"));
    }
}
