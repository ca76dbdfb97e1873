// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Enrolment and QR-provisioning endpoint wrappers.

use serde::Serialize;
use smartpay_core::{Enrolment, SmartPayError};

use crate::client::SmartPayClient;

/// Payload for creating an enrolment.
#[derive(Debug, Clone, Serialize)]
pub struct NewEnrolment {
    pub user_id: String,
    pub vendor_id: String,
}

impl SmartPayClient {
    /// Creates an enrolment binding a customer/vendor pair to a
    /// not-yet-identified hardware unit.
    ///
    /// Abandoned enrolments are never cancelled server-side; regenerating
    /// simply creates a fresh one.
    pub async fn create_enrolment(
        &self,
        enrolment: &NewEnrolment,
    ) -> Result<Enrolment, SmartPayError> {
        self.post_json("/enrolments", enrolment, "enrolment").await
    }

    /// Fetches the QR-encodable provisioning payload for an enrolment.
    ///
    /// The payload embeds the store id and the re-enrollment flag; the
    /// backend owns its exact shape, so it is passed through opaquely.
    pub async fn get_qr_payload(
        &self,
        enrolment_id: &str,
        store_id: Option<&str>,
        re_enrollment: bool,
    ) -> Result<serde_json::Value, SmartPayError> {
        let re_enrollment = if re_enrollment { "true" } else { "false" };
        let mut query: Vec<(&str, &str)> = vec![("re_enrollment", re_enrollment)];
        if let Some(store) = store_id {
            query.push(("store_id", store));
        }
        self.get_json(
            &format!("/qrEnrollment/{enrolment_id}"),
            &query,
            "qr enrollment payload",
        )
        .await
    }
}
