use serde::{Deserialize, Serialize};

/// Form (or query) body for `POST /login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `token` and `expires_in` are present only when the credentials matched.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Seconds until expiry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    pub msg: &'static str,
}

impl LoginResponse {
    pub const SUCCESS: &'static str = "login successful";
    pub const FAILURE: &'static str = "invalid username or password";

    pub fn success(token: String, expires_in: i64) -> Self {
        Self {
            token: Some(token),
            expires_in: Some(expires_in),
            msg: Self::SUCCESS,
        }
    }

    pub fn failure() -> Self {
        Self {
            token: None,
            expires_in: None,
            msg: Self::FAILURE,
        }
    }
}
