// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Device action dispatch and history wrappers.
//!
//! Thin command layer: every verb is a single backend call carrying
//! `{action, applied_by_id, is_television, payload}`. Fire-and-forget
//! from the client's perspective; callers re-fetch the detail on success
//! and nothing is mutated locally before the call succeeds.

use serde::Serialize;
use smartpay_core::{ActionKind, DeviceAction, SmartPayError};

use crate::client::SmartPayClient;

/// Payload for dispatching an action against a hardware unit.
#[derive(Debug, Clone, Serialize)]
pub struct ActionRequest {
    pub action: ActionKind,
    pub applied_by_id: String,
    pub is_television: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl SmartPayClient {
    /// Dispatches one action against a hardware unit.
    pub async fn dispatch_action(
        &self,
        hardware_id: &str,
        request: &ActionRequest,
    ) -> Result<(), SmartPayError> {
        self.post_json_unit(
            &format!("/device-actions/{hardware_id}"),
            request,
            "device action",
        )
        .await
    }

    /// Fetches the append-only action history for a hardware unit.
    pub async fn list_actions(
        &self,
        hardware_id: &str,
        is_television: bool,
    ) -> Result<Vec<DeviceAction>, SmartPayError> {
        let is_television = if is_television { "true" } else { "false" };
        self.get_json(
            &format!("/device-actions/{hardware_id}"),
            &[("is_television", is_television)],
            "device action",
        )
        .await
    }
}
