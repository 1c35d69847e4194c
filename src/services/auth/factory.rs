/// Factory: build the authentication services from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{
    JwtRealm, Realms, TokenCodec,
    store::{StaticRoleStore, StaticUserStore, UserStore},
};

pub struct AuthServices {
    pub codec: Arc<TokenCodec>,
    pub realms: Arc<Realms>,
    pub users: Arc<dyn UserStore>,
}

pub fn build_auth_services(config: &Config) -> AuthServices {
    let codec = Arc::new(TokenCodec::new(
        config.jwt_secret.as_bytes(),
        config.token_ttl_seconds,
    ));

    let jwt_realm = JwtRealm::new(codec.clone(), Arc::new(StaticRoleStore));
    let realms = Realms::default().with(Arc::new(jwt_realm));

    AuthServices {
        codec,
        realms: Arc::new(realms),
        users: Arc::new(StaticUserStore::default()),
    }
}
