// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Television resource wrappers. Mirrors the device family.

use smartpay_core::{SmartPayError, Television};

use crate::client::SmartPayClient;

impl SmartPayClient {
    /// Fetches one television by id.
    pub async fn get_television(&self, television_id: &str) -> Result<Television, SmartPayError> {
        self.get_json(&format!("/televisions/{television_id}"), &[], "television")
            .await
    }

    /// Lists televisions, optionally filtered by enrolment id.
    pub async fn list_televisions(
        &self,
        enrolment_id: Option<&str>,
    ) -> Result<Vec<Television>, SmartPayError> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(id) = enrolment_id {
            query.push(("enrolment_id", id));
        }
        self.get_json("/televisions", &query, "television").await
    }

    /// Finds the television bound to an enrolment, taking the first match.
    pub async fn find_television_by_enrolment(
        &self,
        enrolment_id: &str,
    ) -> Result<Television, SmartPayError> {
        let televisions = self.list_televisions(Some(enrolment_id)).await?;
        televisions
            .into_iter()
            .next()
            .ok_or(SmartPayError::NotFound {
                resource: "television".to_string(),
            })
    }
}
