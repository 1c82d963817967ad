//! # Admin Session Token
//!
//! Opaque to clients, but not secret: `base64(JSON { id, email, timestamp })`
//! with the timestamp in epoch milliseconds. There is no signature, anyone can
//! mint one.
//!
//! ## Lifecycle
//! - issued by the login endpoint and stored both as the `adminToken` cookie
//!   and by the client
//! - verified on every protected request
//! - rejected once older than the configured lifetime (24 hours by default)
//!
//! A token that cannot be decoded and a token that has expired are treated
//! the same way: unauthenticated.
use std::time::Duration;

use base64::{
    Engine,
    engine::general_purpose::{STANDARD, STANDARD_NO_PAD},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::credentials::AdminUser;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub id: u64,
    pub email: String,
    /// Missing timestamps decode as the epoch and are always expired.
    #[serde(default)]
    pub timestamp: i64,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("Unauthorized - No token provided")]
    Missing,

    #[error("Invalid token format")]
    Malformed,

    #[error("Token expired")]
    Expired,
}

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn issue(admin: &AdminUser, now_ms: i64) -> Result<String, serde_json::Error> {
    let claims = Claims {
        id: admin.id,
        email: admin.email.clone(),
        timestamp: now_ms,
    };

    Ok(STANDARD.encode(serde_json::to_vec(&claims)?))
}

pub fn decode(token: &str) -> Result<Claims, SessionError> {
    let token = token.trim();

    let bytes = STANDARD
        .decode(token)
        .or_else(|_| STANDARD_NO_PAD.decode(token))
        .map_err(|_| SessionError::Malformed)?;

    serde_json::from_slice(&bytes).map_err(|_| SessionError::Malformed)
}

/// Claims of a well-formed token no older than `ttl` at `now_ms`.
pub fn verify(token: &str, now_ms: i64, ttl: Duration) -> Result<Claims, SessionError> {
    if token.trim().is_empty() {
        return Err(SessionError::Missing);
    }

    let claims = decode(token)?;
    let age = now_ms.saturating_sub(claims.timestamp);

    if age > ttl.as_millis() as i64 {
        return Err(SessionError::Expired);
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);
    const ISSUED_AT: i64 = 1_700_000_000_000;

    fn admin() -> AdminUser {
        AdminUser {
            id: 1,
            email: "admin@budaya.com".to_string(),
            password: "admin123".to_string(),
            name: "Admin User".to_string(),
        }
    }

    #[test]
    fn test_issue_then_verify() {
        let token = issue(&admin(), ISSUED_AT).unwrap();

        let claims = verify(&token, ISSUED_AT + 1_000, DAY).unwrap();
        assert_eq!(claims.id, 1);
        assert_eq!(claims.email, "admin@budaya.com");
        assert_eq!(claims.timestamp, ISSUED_AT);
    }

    #[test]
    fn test_token_is_plain_base64_json() {
        let token = issue(&admin(), ISSUED_AT).unwrap();
        let bytes = STANDARD.decode(&token).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["timestamp"], ISSUED_AT);
        assert_eq!(json["email"], "admin@budaya.com");
    }

    #[test]
    fn test_expiry_boundary() {
        let token = issue(&admin(), ISSUED_AT).unwrap();
        let day_ms = DAY.as_millis() as i64;

        assert!(verify(&token, ISSUED_AT + day_ms, DAY).is_ok());
        assert_eq!(
            verify(&token, ISSUED_AT + day_ms + 1, DAY),
            Err(SessionError::Expired)
        );
    }

    #[test]
    fn test_missing_timestamp_is_expired() {
        let token = STANDARD.encode(br#"{"id":1,"email":"admin@budaya.com"}"#);

        assert_eq!(verify(&token, ISSUED_AT, DAY), Err(SessionError::Expired));
    }

    #[test]
    fn test_malformed_tokens() {
        assert_eq!(verify("not base64!", ISSUED_AT, DAY), Err(SessionError::Malformed));

        let not_json = STANDARD.encode("hello");
        assert_eq!(verify(&not_json, ISSUED_AT, DAY), Err(SessionError::Malformed));

        assert_eq!(verify("  ", ISSUED_AT, DAY), Err(SessionError::Missing));
    }

    #[test]
    fn test_unpadded_token_accepted() {
        let token = issue(&admin(), ISSUED_AT).unwrap();
        let unpadded = token.trim_end_matches('=');

        assert!(verify(unpadded, ISSUED_AT, DAY).is_ok());
    }
}
