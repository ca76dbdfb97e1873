// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The session object and its on-disk store.
//!
//! The session is an explicit value with a single writer ([`login`] /
//! [`logout`]) and read-only consumers. Collaborators receive a
//! reference, never a global.

use std::fs;
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use smartpay_api::{SmartPayClient, UserProfile};
use smartpay_core::SmartPayError;
use tracing::{debug, info};

use crate::flow::FlowStore;
use crate::jwt::{decode_claims, Claims};

const SESSION_FILE: &str = "session.json";

/// An authenticated session: the bearer token, its decoded claims, and
/// the fetched profile.
#[derive(Debug, Clone)]
pub struct Session {
    token: SecretString,
    claims: Claims,
    profile: UserProfile,
}

impl Session {
    /// The bearer token, for constructing an authenticated client.
    pub fn token(&self) -> &SecretString {
        &self.token
    }

    /// Claims decoded from the token payload.
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// The profile fetched at login.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Id of the session owner (the token's `sub` claim).
    pub fn user_id(&self) -> &str {
        &self.claims.sub
    }
}

/// Wire format of the persisted session file.
#[derive(Serialize, Deserialize)]
struct SessionFile {
    token: String,
    profile: UserProfile,
}

/// On-disk persistence for the session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// A store rooted at `dir`. An empty path falls back to the platform
    /// config directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir: PathBuf = dir.into();
        if dir.as_os_str().is_empty() {
            Self {
                dir: Self::default_dir(),
            }
        } else {
            Self { dir }
        }
    }

    /// `~/.config/smartpay` on Linux, the platform equivalent elsewhere.
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("smartpay")
    }

    /// Directory the session files live in.
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    /// Loads the persisted session, if one exists.
    ///
    /// A corrupt file is an error rather than a silent logout, so the
    /// user learns why their session disappeared.
    pub fn load(&self) -> Result<Option<Session>, SmartPayError> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .map_err(|e| SmartPayError::Session(format!("failed to read session file: {e}")))?;
        let file: SessionFile = serde_json::from_str(&content)
            .map_err(|e| SmartPayError::Session(format!("session file is corrupt: {e}")))?;
        let claims = decode_claims(&file.token)?;
        debug!(user = %claims.username, "session loaded");
        Ok(Some(Session {
            token: file.token.into(),
            claims,
            profile: file.profile,
        }))
    }

    /// Persists a session and returns it.
    pub fn save(&self, token: String, profile: UserProfile) -> Result<Session, SmartPayError> {
        let claims = decode_claims(&token)?;
        fs::create_dir_all(&self.dir)
            .map_err(|e| SmartPayError::Session(format!("failed to create session dir: {e}")))?;
        let file = SessionFile {
            token: token.clone(),
            profile: profile.clone(),
        };
        let content = serde_json::to_string_pretty(&file)
            .map_err(|e| SmartPayError::Session(format!("failed to encode session: {e}")))?;
        fs::write(self.path(), content)
            .map_err(|e| SmartPayError::Session(format!("failed to write session file: {e}")))?;
        Ok(Session {
            token: token.into(),
            claims,
            profile,
        })
    }

    /// Removes the persisted session, if any.
    pub fn clear(&self) -> Result<(), SmartPayError> {
        let path = self.path();
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| SmartPayError::Session(format!("failed to remove session: {e}")))?;
        }
        Ok(())
    }
}

/// Logs in: exchanges credentials for a token, decodes its claims,
/// fetches the owner's profile, and persists the session.
///
/// This and [`logout`] are the only writers of session state.
pub async fn login(
    store: &SessionStore,
    client: &SmartPayClient,
    username: &str,
    password: &str,
) -> Result<Session, SmartPayError> {
    let response = client.login(username, password).await?;
    let claims = decode_claims(&response.token)?;

    let authed = client
        .clone()
        .with_bearer_token(response.token.clone().into());
    let profile = authed.get_user(&claims.sub).await?;

    let session = store.save(response.token, profile)?;
    info!(user = %session.claims().username, "logged in");
    Ok(session)
}

/// Logs out: clears the persisted session and any in-progress sale
/// wizard snapshot.
pub fn logout(store: &SessionStore) -> Result<(), SmartPayError> {
    store.clear()?;
    FlowStore::new(store.dir().clone()).clear()?;
    info!("logged out");
    Ok(())
}

/// An authenticated API client for an existing session.
pub fn authenticated_client(
    client: &SmartPayClient,
    session: &Session,
) -> SmartPayClient {
    client
        .clone()
        .with_bearer_token(session.token().expose_secret().to_string().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::tests::test_token;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn profile() -> UserProfile {
        UserProfile {
            user_id: "u-42".into(),
            username: "vendor1".into(),
            role: "vendor".into(),
            name: None,
            email: None,
            store_id: None,
        }
    }

    fn token() -> String {
        test_token(&serde_json::json!({
            "sub": "u-42",
            "username": "vendor1",
            "role": "vendor"
        }))
    }

    #[test]
    fn save_load_clear_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        assert!(store.load().unwrap().is_none());

        let session = store.save(token(), profile()).unwrap();
        assert_eq!(session.user_id(), "u-42");

        let loaded = store.load().unwrap().expect("session should persist");
        assert_eq!(loaded.claims().username, "vendor1");
        assert_eq!(loaded.profile().role, "vendor");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_session_file_is_an_error_not_a_silent_logout() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        std::fs::create_dir_all(dir.path()).unwrap();
        std::fs::write(dir.path().join("session.json"), "{not json").unwrap();
        assert!(store.load().is_err());
    }

    #[tokio::test]
    async fn login_fetches_profile_and_persists() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"token": token()})),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/users/u-42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "user_id": "u-42",
                "username": "vendor1",
                "role": "vendor"
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        let client = SmartPayClient::new(server.uri(), Duration::from_secs(5)).unwrap();

        let session = login(&store, &client, "vendor1", "hunter2").await.unwrap();
        assert_eq!(session.profile().username, "vendor1");
        assert!(store.load().unwrap().is_some());

        logout(&store).unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
