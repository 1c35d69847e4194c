/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - token codec, realm list, path policy, user store
 * - Cheap to Clone (Arc inside); everything here is read-only after startup
 */
use std::sync::Arc;

use crate::config::Config;
use crate::middleware::auth::policy::PolicyMatcher;
use crate::services::auth::{
    Realms, TokenCodec, build_auth_services, factory::AuthServices, store::UserStore,
};

#[derive(Clone)]
pub struct AppState {
    pub codec: Arc<TokenCodec>,
    pub realms: Arc<Realms>,
    pub policy: Arc<PolicyMatcher>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(auth: AuthServices, policy: PolicyMatcher) -> Self {
        Self {
            codec: auth.codec,
            realms: auth.realms,
            policy: Arc::new(policy),
            users: auth.users,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let policy = PolicyMatcher::from_public_paths(config.public_paths.iter().cloned());
        Self::new(build_auth_services(config), policy)
    }
}
