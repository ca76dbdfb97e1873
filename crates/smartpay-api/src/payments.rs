// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payment resource wrappers.
//!
//! Payments are append-only from the client's perspective: registered
//! once, never edited. The down payment is tagged `is_initial` at
//! registration so later quota math never infers it from list order.

use serde::Serialize;
use smartpay_core::{Payment, SmartPayError};

use crate::client::SmartPayClient;

/// Payload for registering a payment against a plan.
#[derive(Debug, Clone, Serialize)]
pub struct NewPayment {
    pub plan_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub television_id: Option<String>,
    pub value: f64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub is_initial: bool,
}

impl SmartPayClient {
    /// Lists the payments registered against a plan.
    pub async fn list_payments(&self, plan_id: &str) -> Result<Vec<Payment>, SmartPayError> {
        self.get_json("/payments", &[("plan_id", plan_id)], "payment")
            .await
    }

    /// Registers a payment.
    ///
    /// Required fields and a positive amount are validated before any
    /// network call; a failed registration changes nothing locally.
    pub async fn register_payment(&self, payment: &NewPayment) -> Result<Payment, SmartPayError> {
        if payment.value <= 0.0 {
            return Err(SmartPayError::Validation(
                "payment amount must be greater than zero".into(),
            ));
        }
        if payment.method.trim().is_empty() {
            return Err(SmartPayError::Validation(
                "payment method is required".into(),
            ));
        }
        self.post_json("/payments", payment, "payment").await
    }
}
