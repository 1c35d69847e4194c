use std::collections::BTreeSet;

use serde::Serialize;

use crate::services::auth::Principal;

#[derive(Debug, Clone, Serialize)]
pub struct PrincipalResponse {
    pub subject: String,
    pub roles: BTreeSet<String>,
    pub permissions: BTreeSet<String>,
}

impl From<Principal> for PrincipalResponse {
    fn from(p: Principal) -> Self {
        Self {
            subject: p.subject,
            roles: p.roles,
            permissions: p.permissions,
        }
    }
}
