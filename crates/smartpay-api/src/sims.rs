// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SIM management wrappers.

use serde::Serialize;
use smartpay_core::SmartPayError;

use crate::client::SmartPayClient;

#[derive(Debug, Serialize)]
struct SimRequest<'a> {
    device_id: &'a str,
    applied_by_id: &'a str,
}

impl SmartPayClient {
    /// Approves the SIM currently reported by a device.
    pub async fn approve_sim(
        &self,
        device_id: &str,
        applied_by_id: &str,
    ) -> Result<(), SmartPayError> {
        self.post_json_unit(
            "/sims/approve",
            &SimRequest {
                device_id,
                applied_by_id,
            },
            "sim",
        )
        .await
    }

    /// Removes an approved SIM from a device.
    pub async fn remove_sim(
        &self,
        device_id: &str,
        applied_by_id: &str,
    ) -> Result<(), SmartPayError> {
        self.post_json_unit(
            "/sims/remove",
            &SimRequest {
                device_id,
                applied_by_id,
            },
            "sim",
        )
        .await
    }
}
