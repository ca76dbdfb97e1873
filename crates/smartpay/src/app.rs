// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared command context: configuration, the API client, and the
//! session store, built once in `main` and passed by reference to every
//! command.

use std::time::Duration;

use smartpay_api::SmartPayClient;
use smartpay_config::SmartPayConfig;
use smartpay_core::{format_currency, SmartPayError};
use smartpay_session::{authenticated_client, Session, SessionStore};

pub struct App {
    pub config: SmartPayConfig,
    pub client: SmartPayClient,
    pub sessions: SessionStore,
}

impl App {
    pub fn new(config: SmartPayConfig) -> Result<Self, SmartPayError> {
        let client = SmartPayClient::new(
            config.api.base_url.clone(),
            Duration::from_secs(config.api.request_timeout_secs),
        )?;
        let sessions = SessionStore::new(config.session.dir.clone());
        Ok(Self {
            config,
            client,
            sessions,
        })
    }

    /// The persisted session plus a client carrying its bearer token.
    pub fn require_session(&self) -> Result<(Session, SmartPayClient), SmartPayError> {
        let session = self.sessions.load()?.ok_or_else(|| {
            SmartPayError::Session("not logged in; run `smartpay login` first".into())
        })?;
        let client = authenticated_client(&self.client, &session);
        Ok((session, client))
    }

    /// Formats an amount with the configured currency locale.
    pub fn money(&self, value: f64) -> String {
        format_currency(value, self.config.display.currency_locale)
    }
}
