pub mod factory;
pub mod permission;
pub mod principal;
pub mod realm;
pub mod store;
pub mod token;

pub use factory::build_auth_services;
pub use principal::{Credential, Grants, Principal};
pub use realm::{JwtRealm, Realms};
pub use token::TokenCodec;
