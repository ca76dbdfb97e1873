// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store and store-contact administration wrappers.

use serde::{Deserialize, Serialize};
use smartpay_core::SmartPayError;

use crate::client::SmartPayClient;

/// A physical store selling financed devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub store_id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Payload for creating a store.
#[derive(Debug, Clone, Serialize)]
pub struct NewStore {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A contact person attached to a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreContact {
    pub contact_id: String,
    pub store_id: String,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Payload for creating a store contact.
#[derive(Debug, Clone, Serialize)]
pub struct NewStoreContact {
    pub store_id: String,
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl SmartPayClient {
    /// Lists all stores.
    pub async fn list_stores(&self) -> Result<Vec<Store>, SmartPayError> {
        self.get_json("/stores", &[], "store").await
    }

    /// Fetches one store by id.
    pub async fn get_store(&self, store_id: &str) -> Result<Store, SmartPayError> {
        self.get_json(&format!("/stores/{store_id}"), &[], "store").await
    }

    /// Creates a store.
    pub async fn create_store(&self, store: &NewStore) -> Result<Store, SmartPayError> {
        if store.name.trim().is_empty() {
            return Err(SmartPayError::Validation("store name is required".into()));
        }
        self.post_json("/stores", store, "store").await
    }

    /// Lists the contacts attached to a store.
    pub async fn list_store_contacts(
        &self,
        store_id: &str,
    ) -> Result<Vec<StoreContact>, SmartPayError> {
        self.get_json("/store-contacts", &[("store_id", store_id)], "store contact")
            .await
    }

    /// Creates a store contact.
    pub async fn create_store_contact(
        &self,
        contact: &NewStoreContact,
    ) -> Result<StoreContact, SmartPayError> {
        if contact.name.trim().is_empty() || contact.phone.trim().is_empty() {
            return Err(SmartPayError::Validation(
                "contact name and phone are required".into(),
            ));
        }
        self.post_json("/store-contacts", contact, "store contact")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn store_contacts_filter_by_store() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/store-contacts"))
            .and(query_param("store_id", "store-3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "contact_id": "c-1",
                "store_id": "store-3",
                "name": "Ana",
                "phone": "+57 300 000 0000"
            }])))
            .mount(&server)
            .await;

        let client = SmartPayClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let contacts = client.list_store_contacts("store-3").await.unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name, "Ana");
    }

    #[tokio::test]
    async fn blank_contact_fields_fail_validation() {
        let client = SmartPayClient::new("http://127.0.0.1:9", Duration::from_secs(5)).unwrap();
        let err = client
            .create_store_contact(&NewStoreContact {
                store_id: "store-3".into(),
                name: " ".into(),
                phone: "123".into(),
                email: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SmartPayError::Validation(_)));
    }
}
