//! Bearer-token authentication
//!
//! Tokens are HMAC-SHA256 signed strings minted at login and presented on
//! every request and socket handshake.
//! Format: `"{user_id}:{expires_at_millis}:{hmac_hex}"`.
//!
//! Verification checks the signature against the server-held secret and the
//! expiry against the current clock. It has no side effects; a failure is
//! terminal for the request.

use crate::core_model::types::{Timestamp, UserId};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::Duration;

type HmacSha256 = Hmac<Sha256>;

/// An authenticated principal attached to the call context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
}

/// Mints and verifies bearer tokens with a server-held secret
pub struct TokenSigner {
    secret: Vec<u8>,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    /// Mint a token for `user_id`, valid for the configured ttl
    pub fn mint(&self, user_id: &UserId) -> Result<String, AuthError> {
        let expires_at = Timestamp::now().as_millis() + self.ttl.as_millis() as u64;
        let payload = format!("{}:{}", user_id.0, expires_at);

        let mut mac =
            HmacSha256::new_from_slice(&self.secret).map_err(|_| AuthError::BadSignature)?;
        mac.update(payload.as_bytes());
        let sig = hex::encode(mac.finalize().into_bytes());

        Ok(format!("{payload}:{sig}"))
    }

    /// Verify a raw token and resolve the principal it names
    pub fn verify(&self, raw: &str) -> Result<Principal, AuthError> {
        let parts: Vec<&str> = raw.splitn(3, ':').collect();
        if parts.len() != 3 {
            return Err(AuthError::Malformed);
        }
        let (user_id, expires_str, sig_hex) = (parts[0], parts[1], parts[2]);
        if user_id.is_empty() {
            return Err(AuthError::Malformed);
        }

        let payload = format!("{user_id}:{expires_str}");
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).map_err(|_| AuthError::BadSignature)?;
        mac.update(payload.as_bytes());

        let sig = hex::decode(sig_hex).map_err(|_| AuthError::Malformed)?;
        mac.verify_slice(&sig).map_err(|_| AuthError::BadSignature)?;

        let expires_at: u64 = expires_str.parse().map_err(|_| AuthError::Malformed)?;
        if Timestamp::now().as_millis() >= expires_at {
            return Err(AuthError::Expired);
        }

        Ok(Principal {
            user_id: UserId::new(user_id.to_string()),
        })
    }
}

/// Extract the raw token from an `Authorization: Bearer …` header value
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::Missing)?;
    let token = header.strip_prefix("Bearer ").ok_or(AuthError::Malformed)?;
    if token.is_empty() {
        return Err(AuthError::Malformed);
    }
    Ok(token)
}

/// Authentication errors; all surface to callers as Unauthenticated
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("No credential provided")]
    Missing,

    #[error("Malformed credential")]
    Malformed,

    #[error("Credential signature invalid")]
    BadSignature,

    #[error("Credential expired")]
    Expired,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(b"test-secret".to_vec(), Duration::from_secs(3600))
    }

    #[test]
    fn test_mint_then_verify() {
        let signer = signer();
        let user = UserId::generate();

        let token = signer.mint(&user).unwrap();
        let principal = signer.verify(&token).unwrap();

        assert_eq!(principal.user_id, user);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let signer = signer();
        let user = UserId::new("alice".to_string());

        let token = signer.mint(&user).unwrap();
        let forged = token.replacen("alice", "admin", 1);

        assert!(matches!(
            signer.verify(&forged),
            Err(AuthError::BadSignature)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let signer = signer();
        let other = TokenSigner::new(b"other-secret".to_vec(), Duration::from_secs(3600));
        let user = UserId::generate();

        let token = signer.mint(&user).unwrap();
        assert!(matches!(other.verify(&token), Err(AuthError::BadSignature)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let signer = TokenSigner::new(b"test-secret".to_vec(), Duration::from_secs(0));
        let user = UserId::generate();

        let token = signer.mint(&user).unwrap();
        assert!(matches!(signer.verify(&token), Err(AuthError::Expired)));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let signer = signer();
        assert!(matches!(signer.verify(""), Err(AuthError::Malformed)));
        assert!(matches!(signer.verify("abc"), Err(AuthError::Malformed)));
        assert!(matches!(
            signer.verify("user:notanumber:00"),
            Err(AuthError::Malformed) | Err(AuthError::BadSignature)
        ));
    }

    #[test]
    fn test_bearer_extraction() {
        assert!(matches!(bearer_token(None), Err(AuthError::Missing)));
        assert!(matches!(
            bearer_token(Some("Token abc")),
            Err(AuthError::Malformed)
        ));
        assert_eq!(bearer_token(Some("Bearer abc")).unwrap(), "abc");
    }
}
