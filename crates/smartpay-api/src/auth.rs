// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication endpoint wrapper.

use serde::{Deserialize, Serialize};
use smartpay_core::SmartPayError;

use crate::client::SmartPayClient;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Response from a successful login: the bearer JWT.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

impl SmartPayClient {
    /// Exchanges credentials for a bearer token.
    ///
    /// The token is a JWT carrying `sub`, `username`, and `role` claims;
    /// the client only decodes those claims, it never validates the
    /// signature (trust is delegated to the backend).
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, SmartPayError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(SmartPayError::Validation(
                "username and password are required".into(),
            ));
        }
        self.post_json("/auth/login", &LoginRequest { username, password }, "login")
            .await
    }
}
