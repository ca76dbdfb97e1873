// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Device resource wrappers.
//!
//! "Find by enrolment id" is an ordinary list-with-filter call taking the
//! first match; the enrollment polling flow leans on its 404-shaped
//! not-found behavior.

use smartpay_core::{Device, SmartPayError};

use crate::client::SmartPayClient;

impl SmartPayClient {
    /// Fetches one device by id.
    pub async fn get_device(&self, device_id: &str) -> Result<Device, SmartPayError> {
        self.get_json(&format!("/devices/{device_id}"), &[], "device")
            .await
    }

    /// Lists devices, optionally filtered by enrolment id.
    pub async fn list_devices(
        &self,
        enrolment_id: Option<&str>,
    ) -> Result<Vec<Device>, SmartPayError> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(id) = enrolment_id {
            query.push(("enrolment_id", id));
        }
        self.get_json("/devices", &query, "device").await
    }

    /// Finds the device bound to an enrolment, taking the first match.
    ///
    /// An empty result is reported as [`SmartPayError::NotFound`] so the
    /// polling loop treats "no rows yet" and a backend 404 identically.
    pub async fn find_device_by_enrolment(
        &self,
        enrolment_id: &str,
    ) -> Result<Device, SmartPayError> {
        let devices = self.list_devices(Some(enrolment_id)).await?;
        devices
            .into_iter()
            .next()
            .ok_or(SmartPayError::NotFound {
                resource: "device".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn device_json(id: &str, enrolment: &str) -> serde_json::Value {
        serde_json::json!({
            "device_id": id,
            "serial_number": "SN-001",
            "model": "A14",
            "brand": "Samsung",
            "imei": "356938035643809",
            "state": "Active",
            "enrolment_id": enrolment
        })
    }

    #[tokio::test]
    async fn find_by_enrolment_takes_first_match() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/devices"))
            .and(query_param("enrolment_id", "enr-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                device_json("dev-1", "enr-1"),
                device_json("dev-2", "enr-1"),
            ])))
            .mount(&server)
            .await;

        let client = SmartPayClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let device = client.find_device_by_enrolment("enr-1").await.unwrap();
        assert_eq!(device.device_id, "dev-1");
    }

    #[tokio::test]
    async fn empty_list_is_reported_as_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = SmartPayClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let err = client.find_device_by_enrolment("enr-1").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
