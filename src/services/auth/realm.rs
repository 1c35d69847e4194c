//! Realms turn a raw credential into a `Principal`.
//!
//! `authenticate` answers "who is this", `authorize` answers "what may they
//! do". `Realms` picks the first realm that supports a credential's kind.
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::services::auth::principal::{Credential, CredentialKind, Grants, Principal};
use crate::services::auth::store::RoleStore;
use crate::services::auth::token::TokenCodec;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Bad signature, malformed token or expired. Not distinguished further.
    #[error("token invalid or expired")]
    InvalidToken,
    #[error("token carries no subject")]
    SubjectMissing,
    #[error("no realm supports this credential")]
    UnsupportedCredential,
}

#[async_trait]
pub trait Realm: Send + Sync + 'static {
    /// Name for logs.
    fn name(&self) -> &'static str;

    fn supports(&self, credential: &Credential) -> bool;

    async fn authenticate(&self, credential: &Credential) -> Result<Principal, AuthError>;

    async fn authorize(&self, subject: &str) -> Grants;
}

/// Bearer JWT realm: the codec proves identity, a `RoleStore` supplies grants.
#[derive(Clone)]
pub struct JwtRealm {
    codec: Arc<TokenCodec>,
    roles: Arc<dyn RoleStore>,
}

impl JwtRealm {
    pub fn new(codec: Arc<TokenCodec>, roles: Arc<dyn RoleStore>) -> Self {
        Self { codec, roles }
    }
}

#[async_trait]
impl Realm for JwtRealm {
    fn name(&self) -> &'static str {
        "jwt"
    }

    fn supports(&self, credential: &Credential) -> bool {
        credential.kind == CredentialKind::Bearer
    }

    async fn authenticate(&self, credential: &Credential) -> Result<Principal, AuthError> {
        if !self.codec.verify(&credential.raw) {
            return Err(AuthError::InvalidToken);
        }

        let subject = self
            .codec
            .decode_subject(&credential.raw)
            .ok_or(AuthError::SubjectMissing)?;

        let grants = self.authorize(&subject).await;
        Ok(Principal::new(subject, grants))
    }

    async fn authorize(&self, subject: &str) -> Grants {
        self.roles.grants(subject).await
    }
}

/// Ordered realm list; first supporting realm wins.
#[derive(Clone, Default)]
pub struct Realms {
    realms: Vec<Arc<dyn Realm>>,
}

impl Realms {
    pub fn with(mut self, realm: Arc<dyn Realm>) -> Self {
        self.realms.push(realm);
        self
    }

    pub async fn authenticate(&self, credential: &Credential) -> Result<Principal, AuthError> {
        let Some(realm) = self.realms.iter().find(|r| r.supports(credential)) else {
            warn!(kind = ?credential.kind, "no realm supports credential");
            return Err(AuthError::UnsupportedCredential);
        };

        realm.authenticate(credential).await.inspect_err(|err| {
            warn!(realm = realm.name(), error = %err, "authentication failed");
        })
    }
}
