// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Full sale scenario against a mock backend: log in, enroll a device,
//! create an installment plan, register a payment, and check what the
//! reconciled views derive from the accumulated state.

use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use smartpay_api::{ActionRequest, NewPayment, NewPlan, SmartPayClient};
use smartpay_core::{reconcile, ActionKind, BlockState, HardwareKind};
use smartpay_enroll::{EnrollmentFlow, EnrollmentPhase, PollConfig};
use smartpay_session::SessionStore;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn vendor_token() -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        serde_json::json!({
            "sub": "u-vendor",
            "username": "vendor1",
            "role": "vendor"
        })
        .to_string(),
    );
    format!("{header}.{payload}.sig")
}

async fn mount_backend(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "token": vendor_token() })),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/u-vendor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user_id": "u-vendor",
            "username": "vendor1",
            "role": "vendor",
            "store_id": "store-3"
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/enrolments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "enrolment_id": "enr-1",
            "user_id": "u-cust",
            "vendor_id": "u-vendor"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/qrEnrollment/enr-1"))
        .and(query_param("store_id", "store-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "store_id": "store-3",
            "re_enrollment": false
        })))
        .mount(server)
        .await;

    // The device is not provisioned for the first three polls.
    Mock::given(method("GET"))
        .and(path("/devices"))
        .and(query_param("enrolment_id", "enr-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .up_to_n_times(3)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/devices"))
        .and(query_param("enrolment_id", "enr-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "device_id": "dev-1",
            "serial_number": "SN-0001",
            "model": "A14",
            "brand": "Samsung",
            "state": "Active",
            "enrolment_id": "enr-1"
        }])))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/plans"))
        .and(body_partial_json(serde_json::json!({
            "device_id": "dev-1",
            "user_id": "u-cust",
            "value": 1000000.0,
            "quotas": 10
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "plan_id": "plan-1",
            "device_id": "dev-1",
            "user_id": "u-cust",
            "vendor_id": "u-vendor",
            "value": 1000000.0,
            "initial_date": "2024-01-01",
            "period": 30,
            "quotas": 10
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "payment_id": "pay-1",
            "plan_id": "plan-1",
            "device_id": "dev-1",
            "value": 100000.0,
            "method": "cash",
            "state": "Approved",
            "date": "2024-01-05T10:00:00Z"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/payments"))
        .and(query_param("plan_id", "plan-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "payment_id": "pay-1",
            "plan_id": "plan-1",
            "device_id": "dev-1",
            "value": 100000.0,
            "method": "cash",
            "state": "Approved",
            "date": "2024-01-05T10:00:00Z"
        }])))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/device-actions/dev-1"))
        .and(body_partial_json(serde_json::json!({
            "action": "block",
            "applied_by_id": "u-vendor"
        })))
        .respond_with(ResponseTemplate::new(202))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/device-actions/dev-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "action": "block",
            "state": "applied",
            "created_at": "2024-02-10T08:00:00Z",
            "applied_by": "u-vendor"
        }])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn full_sale_flow_reconciles_balance_and_block_state() {
    let server = MockServer::start().await;
    mount_backend(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let sessions = SessionStore::new(dir.path());
    let client = SmartPayClient::new(server.uri(), Duration::from_secs(5)).unwrap();

    // Log in and carry the bearer token from here on.
    let session = smartpay_session::login(&sessions, &client, "vendor1", "hunter2")
        .await
        .unwrap();
    assert_eq!(session.user_id(), "u-vendor");
    let client = smartpay_session::authenticated_client(&client, &session);

    // Enroll: generate the QR payload, then poll until the device appears.
    let mut flow = EnrollmentFlow::new(client.clone(), HardwareKind::Device);
    let start = flow
        .generate("u-cust", session.user_id(), Some("store-3"), false)
        .await
        .unwrap();
    assert_eq!(start.enrolment.enrolment_id, "enr-1");

    let mut attempts = Vec::new();
    let hardware = flow
        .poll(PollConfig::new(Duration::from_millis(10), 10), |n| {
            attempts.push(n)
        })
        .await
        .unwrap();
    assert_eq!(hardware.id(), "dev-1");
    assert_eq!(flow.phase(), EnrollmentPhase::Connected);
    // Three empty answers before the hit.
    assert_eq!(attempts, vec![1, 2, 3, 4]);

    // Finance the device over ten monthly quotas.
    let plan = client
        .create_plan(&NewPlan {
            device_id: Some(hardware.id().to_string()),
            television_id: None,
            user_id: "u-cust".into(),
            vendor_id: session.user_id().into(),
            value: 1_000_000.0,
            initial_date: "2024-01-01".parse().unwrap(),
            period: 30,
            quotas: 10,
        })
        .await
        .unwrap();

    // First installment, paid in cash. Not tagged as a down payment.
    let payment = client
        .register_payment(&NewPayment {
            plan_id: plan.plan_id.clone(),
            device_id: plan.device_id.clone(),
            television_id: None,
            value: 100_000.0,
            method: "cash".into(),
            reference: None,
            is_initial: false,
        })
        .await
        .unwrap();
    assert!(!payment.is_initial);

    // Reconciled view: balance, installment amount, next due date.
    let payments = client.list_payments(&plan.plan_id).await.unwrap();
    assert_eq!(reconcile::pending_value(&plan, &payments), 900_000.0);
    assert_eq!(reconcile::quota_value(&plan, &payments), 100_000.0);
    assert!(!reconcile::is_paid(&plan, &payments));

    let today = "2024-02-15".parse().unwrap();
    let next_due = reconcile::compute_next_due_date(&plan, &payments, today).unwrap();
    assert_eq!(next_due, Some("2024-01-31".parse().unwrap()));

    // Block the device for the overdue quota and re-derive its state.
    client
        .dispatch_action(
            hardware.id(),
            &ActionRequest {
                action: ActionKind::Block,
                applied_by_id: session.user_id().into(),
                is_television: false,
                payload: None,
            },
        )
        .await
        .unwrap();
    let history = client.list_actions(hardware.id(), false).await.unwrap();
    assert_eq!(reconcile::latest_block_state(&history), BlockState::Blocked);
}
