// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client-side JWT claim extraction.
//!
//! The token is decoded only to read its claims; the signature is never
//! verified here. Trust is delegated entirely to the backend, which
//! rejects tampered tokens on every request.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use smartpay_core::SmartPayError;

/// The claims the client reads from the bearer JWT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id of the session owner.
    pub sub: String,
    pub username: String,
    pub role: String,
}

/// Decodes the payload segment of a JWT without verifying the signature.
pub fn decode_claims(token: &str) -> Result<Claims, SmartPayError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next()) {
        (Some(_header), Some(payload), Some(_signature)) => payload,
        _ => {
            return Err(SmartPayError::Session(
                "malformed token: expected three dot-separated segments".into(),
            ))
        }
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| SmartPayError::Session(format!("token payload is not base64url: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| SmartPayError::Session(format!("token claims are not valid JSON: {e}")))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds an unsigned test token with the given claims JSON.
    pub(crate) fn test_token(claims: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
        format!("{header}.{payload}.signature")
    }

    #[test]
    fn decodes_sub_username_and_role() {
        let token = test_token(&serde_json::json!({
            "sub": "u-42",
            "username": "vendor1",
            "role": "vendor",
            "exp": 1735689600
        }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub, "u-42");
        assert_eq!(claims.username, "vendor1");
        assert_eq!(claims.role, "vendor");
    }

    #[test]
    fn rejects_token_without_three_segments() {
        let err = decode_claims("not-a-jwt").unwrap_err();
        assert!(matches!(err, SmartPayError::Session(_)));
    }

    #[test]
    fn rejects_non_base64_payload() {
        let err = decode_claims("a.###.c").unwrap_err();
        assert!(matches!(err, SmartPayError::Session(_)));
    }

    #[test]
    fn rejects_payload_missing_claims() {
        let token = test_token(&serde_json::json!({"sub": "u-1"}));
        let err = decode_claims(&token).unwrap_err();
        assert!(matches!(err, SmartPayError::Session(_)));
    }
}
