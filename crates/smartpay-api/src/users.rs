// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User administration endpoint wrappers.

use serde::{Deserialize, Serialize};
use smartpay_core::SmartPayError;

use crate::client::SmartPayClient;

/// A backend user record, also used as the session profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub username: String,
    pub role: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub store_id: Option<String>,
}

/// Payload for creating a user.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
}

impl SmartPayClient {
    /// Fetches one user by id.
    pub async fn get_user(&self, user_id: &str) -> Result<UserProfile, SmartPayError> {
        self.get_json(&format!("/users/{user_id}"), &[], "user").await
    }

    /// Lists all users visible to the session.
    pub async fn list_users(&self) -> Result<Vec<UserProfile>, SmartPayError> {
        self.get_json("/users", &[], "user").await
    }

    /// Creates a user.
    pub async fn create_user(&self, user: &NewUser) -> Result<UserProfile, SmartPayError> {
        if user.username.trim().is_empty() {
            return Err(SmartPayError::Validation("username is required".into()));
        }
        self.post_json("/users", user, "user").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn get_user_decodes_profile() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/u-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "user_id": "u-1",
                "username": "vendor1",
                "role": "vendor",
                "store_id": "store-3"
            })))
            .mount(&server)
            .await;

        let client = SmartPayClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let profile = client.get_user("u-1").await.unwrap();
        assert_eq!(profile.username, "vendor1");
        assert_eq!(profile.role, "vendor");
        assert_eq!(profile.store_id.as_deref(), Some("store-3"));
        assert!(profile.email.is_none());
    }
}
