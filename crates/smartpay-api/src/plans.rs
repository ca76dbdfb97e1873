// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plan resource wrappers.

use chrono::NaiveDate;
use serde::Serialize;
use smartpay_core::{HardwareKind, Plan, SmartPayError};

use crate::client::SmartPayClient;

/// Payload for creating a plan. Exactly one of `device_id` /
/// `television_id` must be set.
#[derive(Debug, Clone, Serialize)]
pub struct NewPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub television_id: Option<String>,
    pub user_id: String,
    pub vendor_id: String,
    pub value: f64,
    pub initial_date: NaiveDate,
    pub period: u32,
    pub quotas: u32,
}

impl SmartPayClient {
    /// Fetches one plan by id.
    pub async fn get_plan(&self, plan_id: &str) -> Result<Plan, SmartPayError> {
        self.get_json(&format!("/plans/{plan_id}"), &[], "plan").await
    }

    /// Lists plans, optionally filtered by customer.
    pub async fn list_plans(&self, user_id: Option<&str>) -> Result<Vec<Plan>, SmartPayError> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(id) = user_id {
            query.push(("user_id", id));
        }
        self.get_json("/plans", &query, "plan").await
    }

    /// Lists the plans attached to one hardware unit.
    pub async fn plans_for_hardware(
        &self,
        kind: HardwareKind,
        hardware_id: &str,
    ) -> Result<Vec<Plan>, SmartPayError> {
        let key = match kind {
            HardwareKind::Device => "device_id",
            HardwareKind::Television => "television_id",
        };
        self.get_json("/plans", &[(key, hardware_id)], "plan").await
    }

    /// Creates a plan. Plans are immutable from this client once created,
    /// apart from the contract upload.
    pub async fn create_plan(&self, plan: &NewPlan) -> Result<Plan, SmartPayError> {
        if plan.value <= 0.0 {
            return Err(SmartPayError::Validation(
                "plan value must be greater than zero".into(),
            ));
        }
        if plan.quotas == 0 {
            return Err(SmartPayError::Validation(
                "plan must have at least one quota".into(),
            ));
        }
        if plan.period == 0 {
            return Err(SmartPayError::Validation(
                "plan period must be at least one day".into(),
            ));
        }
        if plan.device_id.is_some() == plan.television_id.is_some() {
            return Err(SmartPayError::Validation(
                "exactly one of device_id or television_id is required".into(),
            ));
        }
        self.post_json("/plans", plan, "plan").await
    }

    /// Uploads the signed contract document for a plan.
    pub async fn upload_contract(
        &self,
        plan_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), SmartPayError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")
            .map_err(|e| SmartPayError::Validation(format!("invalid contract file: {e}")))?;
        let form = reqwest::multipart::Form::new().part("contract", part);
        self.post_multipart(&format!("/plans/{plan_id}/contract"), form, "contract")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn new_plan() -> NewPlan {
        NewPlan {
            device_id: Some("dev-1".into()),
            television_id: None,
            user_id: "u-1".into(),
            vendor_id: "v-1".into(),
            value: 1_000_000.0,
            initial_date: "2024-01-01".parse().unwrap(),
            period: 30,
            quotas: 10,
        }
    }

    #[tokio::test]
    async fn create_plan_round_trips() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/plans"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "plan_id": "plan-1",
                "device_id": "dev-1",
                "user_id": "u-1",
                "vendor_id": "v-1",
                "value": 1000000.0,
                "initial_date": "2024-01-01",
                "period": 30,
                "quotas": 10
            })))
            .mount(&server)
            .await;

        let client = SmartPayClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let plan = client.create_plan(&new_plan()).await.unwrap();
        assert_eq!(plan.plan_id, "plan-1");
        assert_eq!(plan.quotas, 10);
    }

    #[tokio::test]
    async fn plan_needs_exactly_one_hardware_reference() {
        let client = SmartPayClient::new("http://127.0.0.1:9", Duration::from_secs(5)).unwrap();

        let mut both = new_plan();
        both.television_id = Some("tv-1".into());
        assert!(matches!(
            client.create_plan(&both).await.unwrap_err(),
            SmartPayError::Validation(_)
        ));

        let mut neither = new_plan();
        neither.device_id = None;
        assert!(matches!(
            client.create_plan(&neither).await.unwrap_err(),
            SmartPayError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn non_positive_value_is_rejected_client_side() {
        let client = SmartPayClient::new("http://127.0.0.1:9", Duration::from_secs(5)).unwrap();
        let mut plan = new_plan();
        plan.value = 0.0;
        assert!(matches!(
            client.create_plan(&plan).await.unwrap_err(),
            SmartPayError::Validation(_)
        ));
    }
}
