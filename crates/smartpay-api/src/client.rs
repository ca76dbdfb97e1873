// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared HTTP client for the SmartPay REST API.
//!
//! Provides [`SmartPayClient`], which owns the connection pool, injects
//! the bearer token, and maps HTTP failures into the [`SmartPayError`]
//! taxonomy. Per-resource wrappers live in the sibling modules and are
//! pure I/O on top of this client.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;
use smartpay_core::SmartPayError;
use tracing::debug;

/// Structured error body the backend attaches to 4xx/5xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: String,
}

/// HTTP client for SmartPay backend communication.
///
/// Cheap to clone; the underlying reqwest client shares its pool. The
/// bearer token is provided once (from the session) and injected on every
/// request rather than living in process-wide default headers.
#[derive(Debug, Clone)]
pub struct SmartPayClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<SecretString>,
}

impl SmartPayClient {
    /// Creates a new client for the given base URL (including `/api/v1`).
    ///
    /// `timeout` bounds each request so a dead connection cannot hang a
    /// command forever.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SmartPayError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| SmartPayError::Internal(format!("failed to build HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    /// Returns a client that sends `Authorization: Bearer <token>`.
    pub fn with_bearer_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    /// Whether a bearer token is attached.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.header(
                AUTHORIZATION,
                format!("Bearer {}", token.expose_secret()),
            ),
            None => req,
        }
    }

    /// GET `path`, optionally with query parameters, decoding a JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        resource: &str,
    ) -> Result<T, SmartPayError> {
        let req = self.authorize(self.http.get(self.url(path)).query(query));
        let response = req.send().await.map_err(transport_error)?;
        Self::decode(response, resource).await
    }

    /// POST a JSON body to `path`, decoding a JSON response.
    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        resource: &str,
    ) -> Result<T, SmartPayError> {
        let req = self.authorize(self.http.post(self.url(path)).json(body));
        let response = req.send().await.map_err(transport_error)?;
        Self::decode(response, resource).await
    }

    /// POST a JSON body to `path`, ignoring the response body.
    pub(crate) async fn post_json_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        resource: &str,
    ) -> Result<(), SmartPayError> {
        let req = self.authorize(self.http.post(self.url(path)).json(body));
        let response = req.send().await.map_err(transport_error)?;
        Self::check_status(response, resource).await?;
        Ok(())
    }

    /// DELETE `path`, ignoring the response body.
    pub(crate) async fn delete_unit(
        &self,
        path: &str,
        resource: &str,
    ) -> Result<(), SmartPayError> {
        let req = self.authorize(self.http.delete(self.url(path)));
        let response = req.send().await.map_err(transport_error)?;
        Self::check_status(response, resource).await?;
        Ok(())
    }

    /// POST a multipart form to `path`, ignoring the response body.
    pub(crate) async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        resource: &str,
    ) -> Result<(), SmartPayError> {
        let req = self.authorize(self.http.post(self.url(path)).multipart(form));
        let response = req.send().await.map_err(transport_error)?;
        Self::check_status(response, resource).await?;
        Ok(())
    }

    async fn decode<T: DeserializeOwned>(
        response: Response,
        resource: &str,
    ) -> Result<T, SmartPayError> {
        let response = Self::check_status(response, resource).await?;
        let body = response.text().await.map_err(transport_error)?;
        serde_json::from_str(&body).map_err(|e| {
            SmartPayError::Internal(format!("failed to parse {resource} response: {e}"))
        })
    }

    /// Maps non-success statuses to the error taxonomy: 404 becomes
    /// [`SmartPayError::NotFound`], anything else surfaces the backend's
    /// `detail` body verbatim with a generic fallback.
    async fn check_status(response: Response, resource: &str) -> Result<Response, SmartPayError> {
        let status = response.status();
        debug!(status = %status, resource, "response received");

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(SmartPayError::NotFound {
                resource: resource.to_string(),
            });
        }

        let body = response.text().await.unwrap_or_default();
        let detail = match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(parsed) => parsed.detail,
            Err(_) if !body.is_empty() => body,
            Err(_) => format!("request for {resource} failed"),
        };
        Err(SmartPayError::Api {
            status: status.as_u16(),
            detail,
        })
    }
}

fn transport_error(err: reqwest::Error) -> SmartPayError {
    SmartPayError::Transport {
        message: err.to_string(),
        source: Some(Box::new(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> SmartPayClient {
        SmartPayClient::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[derive(Debug, Deserialize)]
    struct Pong {
        ok: bool,
    }

    #[tokio::test]
    async fn bearer_token_is_injected() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .mount(&server)
            .await;

        let client = test_client(&server.uri()).with_bearer_token("tok-123".into());
        let pong: Pong = client.get_json("/ping", &[], "ping").await.unwrap();
        assert!(pong.ok);
    }

    #[tokio::test]
    async fn unauthenticated_client_sends_no_header() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(!client.is_authenticated());
        let pong: Pong = client.get_json("/ping", &[], "ping").await.unwrap();
        assert!(pong.ok);
    }

    #[tokio::test]
    async fn query_parameters_are_sent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/devices"))
            .and(query_param("enrolment_id", "enr-9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let pong: Pong = client
            .get_json("/devices", &[("enrolment_id", "enr-9")], "device")
            .await
            .unwrap();
        assert!(pong.ok);
    }

    #[tokio::test]
    async fn not_found_maps_to_not_found_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/devices/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .get_json::<Pong>("/devices/missing", &[], "device")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn structured_detail_is_surfaced_verbatim() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/plans"))
            .respond_with(ResponseTemplate::new(422).set_body_json(
                serde_json::json!({"detail": "device already has an active plan"}),
            ))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .post_json_unit("/plans", &serde_json::json!({}), "plan")
            .await
            .unwrap_err();
        match err {
            SmartPayError::Api { status, detail } => {
                assert_eq!(status, 422);
                assert_eq!(detail, "device already has an active plan");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_detail_falls_back_to_generic_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/plans"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .post_json_unit("/plans", &serde_json::json!({}), "plan")
            .await
            .unwrap_err();
        match err {
            SmartPayError::Api { status, detail } => {
                assert_eq!(status, 500);
                assert!(detail.contains("plan"), "got: {detail}");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_server_maps_to_transport_error() {
        // Nothing listens on this port.
        let client = test_client("http://127.0.0.1:9");
        let err = client.get_json::<Pong>("/ping", &[], "ping").await.unwrap_err();
        assert!(matches!(err, SmartPayError::Transport { .. }), "got {err:?}");
    }
}
