//! HS256 token codec.
//!
//! A token is a compact JWT (`header.payload.signature`, base64url) whose
//! payload carries `sub`, `iat` and `exp`. Nothing is stored server-side:
//! validity is recomputed from the signed bytes on every call.
//!
//! Key material is shared read-only across requests; all methods take `&self`.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize)]
struct IssuedClaims<'a> {
    sub: &'a str,
    iat: i64,
    exp: i64,
}

/// Claims as read back during verification.
///
/// `sub` stays optional so a correctly signed token without a subject still
/// verifies; the realm reports that case separately.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub iat: Option<i64>,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct PeekClaims {
    #[serde(default)]
    sub: Option<String>,
}

#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: i64,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenCodec")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(secret: &[u8], ttl_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // `now <= exp` is valid, anything later is not.
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_seconds: i64::try_from(ttl_seconds).unwrap_or(i64::MAX),
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Issue a token for `subject`, valid from now for the configured TTL.
    pub fn create(&self, subject: &str) -> Result<String, TokenError> {
        self.create_at(subject, Utc::now())
    }

    /// Issue a token as if it had been created at `issued_at`.
    pub fn create_at(&self, subject: &str, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let iat = issued_at.timestamp();
        let claims = IssuedClaims {
            sub: subject,
            iat,
            exp: iat.saturating_add(self.ttl_seconds),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign token");
            TokenError::Encode(e)
        })
    }

    /// Verify signature and expiry and return the claims.
    pub fn decode(&self, token: &str) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }

    /// `true` iff the signature matches and the token has not expired.
    ///
    /// Malformed input, a bad signature and expiry all collapse to `false`.
    pub fn verify(&self, token: &str) -> bool {
        match self.decode(token) {
            Ok(claims) => {
                debug!(sub = ?claims.sub, iat = ?claims.iat, exp = claims.exp, "token verified");
                true
            }
            Err(err) => {
                debug!(kind = ?err.kind(), "token verification failed");
                false
            }
        }
    }

    /// Read `sub` from the payload without checking signature or expiry.
    ///
    /// Only for logging and for resolving the subject after `verify`.
    pub fn decode_subject(&self, token: &str) -> Option<String> {
        let mut parts = token.split('.');
        let (Some(_header), Some(payload), Some(_signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return None;
        };

        let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
        serde_json::from_slice::<PeekClaims>(&bytes).ok()?.sub
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const TTL: u64 = 24 * 60 * 60;

    fn codec() -> TokenCodec {
        TokenCodec::new(b"test-secret", TTL)
    }

    fn sign_raw(secret: &[u8], claims: &serde_json::Value) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap()
    }

    #[test]
    fn test_create_then_verify_and_decode() {
        let codec = codec();
        for subject in ["admin", "alice", "user with spaces", "ünïcødé"] {
            let token = codec.create(subject).unwrap();
            assert_eq!(token.split('.').count(), 3);
            assert!(codec.verify(&token));
            assert_eq!(codec.decode_subject(&token).as_deref(), Some(subject));
        }
    }

    #[test]
    fn test_claims_carry_ttl() {
        let codec = codec();
        let token = codec.create("alice").unwrap();
        let claims = codec.decode(&token).unwrap();

        assert_eq!(claims.sub.as_deref(), Some("alice"));
        assert_eq!(claims.exp - claims.iat.unwrap(), TTL as i64);
    }

    #[test]
    fn test_expired_token_fails() {
        let codec = codec();
        let issued = Utc::now() - Duration::hours(25);
        let token = codec.create_at("alice", issued).unwrap();

        assert!(!codec.verify(&token));
        // Still peekable for logging.
        assert_eq!(codec.decode_subject(&token).as_deref(), Some("alice"));
    }

    #[test]
    fn test_recent_backdated_token_is_valid() {
        let codec = codec();
        let issued = Utc::now() - Duration::hours(23);
        let token = codec.create_at("alice", issued).unwrap();
        assert!(codec.verify(&token));
    }

    #[test]
    fn test_tampered_signature_fails() {
        let codec = codec();
        let token = codec.create("admin").unwrap();
        let (head, signature) = token.rsplit_once('.').unwrap();

        let mut sig_bytes = URL_SAFE_NO_PAD.decode(signature).unwrap();
        for i in 0..sig_bytes.len() {
            sig_bytes[i] ^= 0x01;
            let tampered = format!("{}.{}", head, URL_SAFE_NO_PAD.encode(&sig_bytes));
            assert!(!codec.verify(&tampered), "flipped byte {} still verified", i);
            sig_bytes[i] ^= 0x01;
        }
    }

    #[test]
    fn test_tampered_payload_fails() {
        let codec = codec();
        let token = codec.create("alice").unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let forged_payload = URL_SAFE_NO_PAD.encode(
            serde_json::json!({"sub": "admin", "iat": 0, "exp": i64::MAX / 2}).to_string(),
        );
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert!(!codec.verify(&forged));
        assert_eq!(codec.decode_subject(&forged).as_deref(), Some("admin"));
    }

    #[test]
    fn test_wrong_secret_fails() {
        let other = TokenCodec::new(b"another-secret", TTL);
        let token = other.create("admin").unwrap();
        assert!(!codec().verify(&token));
    }

    #[test]
    fn test_malformed_input() {
        let codec = codec();
        for garbage in ["", "garbage", "a.b", "a.b.c", "a.b.c.d", "...", "Bearer x"] {
            assert!(!codec.verify(garbage), "{garbage:?} verified");
            assert_eq!(codec.decode_subject(garbage), None);
        }
    }

    #[test]
    fn test_signed_token_without_subject_verifies_but_has_no_subject() {
        let exp = Utc::now().timestamp() + 60;
        let token = sign_raw(b"test-secret", &serde_json::json!({ "exp": exp }));

        assert!(codec().verify(&token));
        assert_eq!(codec().decode_subject(&token), None);
    }

    #[test]
    fn test_token_without_exp_fails() {
        let token = sign_raw(b"test-secret", &serde_json::json!({ "sub": "alice" }));
        assert!(!codec().verify(&token));
    }

    #[test]
    fn test_debug_hides_key() {
        let rendered = format!("{:?}", codec());
        assert!(!rendered.contains("test-secret"));
    }
}
