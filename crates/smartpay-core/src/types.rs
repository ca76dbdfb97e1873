// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types consumed from the SmartPay backend.
//!
//! Authoritative storage for every entity here lives server-side; the
//! client reads these records and issues commands against them. Field
//! names mirror the wire format under `/api/v1/`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A pending binding request between a customer/vendor pair and a
/// not-yet-identified physical device.
///
/// Created by the client to start provisioning; resolved once a [`Device`]
/// or [`Television`] referencing it appears server-side. The client only
/// polls for that resolution, it never mutates enrolment state directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrolment {
    pub enrolment_id: String,
    pub user_id: String,
    pub vendor_id: String,
}

/// Whether a hardware unit is an Android device or a television.
///
/// The backend keeps the two under separate resources with otherwise
/// identical shapes, so most flows carry this discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HardwareKind {
    Device,
    Television,
}

impl HardwareKind {
    /// True for the television resource family.
    pub fn is_television(self) -> bool {
        matches!(self, HardwareKind::Television)
    }
}

/// Lifecycle state of a managed hardware unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum HardwareState {
    Active,
    Inactive,
}

/// A managed Android device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub device_id: String,
    pub serial_number: String,
    pub model: String,
    pub brand: String,
    #[serde(default)]
    pub imei: Option<String>,
    pub state: HardwareState,
    #[serde(default)]
    pub enrolment_id: Option<String>,
}

/// A managed television. Same shape as [`Device`] apart from the id field
/// and the lack of an IMEI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Television {
    pub television_id: String,
    pub serial_number: String,
    pub model: String,
    pub brand: String,
    pub state: HardwareState,
    #[serde(default)]
    pub enrolment_id: Option<String>,
}

/// Either kind of managed hardware, as returned by the enrollment polling
/// flow and consumed by the detail views.
#[derive(Debug, Clone, PartialEq)]
pub enum Hardware {
    Device(Device),
    Television(Television),
}

impl Hardware {
    /// The backend id of the unit, regardless of kind.
    pub fn id(&self) -> &str {
        match self {
            Hardware::Device(d) => &d.device_id,
            Hardware::Television(t) => &t.television_id,
        }
    }

    pub fn serial_number(&self) -> &str {
        match self {
            Hardware::Device(d) => &d.serial_number,
            Hardware::Television(t) => &t.serial_number,
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Hardware::Device(d) => &d.model,
            Hardware::Television(t) => &t.model,
        }
    }

    pub fn kind(&self) -> HardwareKind {
        match self {
            Hardware::Device(_) => HardwareKind::Device,
            Hardware::Television(_) => HardwareKind::Television,
        }
    }
}

/// An installment schedule financing one hardware unit's price over a
/// fixed number of periodic quotas.
///
/// Immutable once created from this client, apart from the contract
/// document upload. Exactly one of `device_id`/`television_id` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub plan_id: String,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub television_id: Option<String>,
    pub user_id: String,
    pub vendor_id: String,
    /// Principal financed, in the display currency's minor-unit-free form.
    pub value: f64,
    /// Date the schedule starts counting from.
    pub initial_date: NaiveDate,
    /// Days between consecutive quotas.
    pub period: u32,
    /// Number of scheduled installments.
    pub quotas: u32,
    /// Backend reference to the uploaded contract document, when present.
    #[serde(default)]
    pub contract: Option<String>,
}

/// Settlement state of a registered payment.
///
/// Only `Approved` payments count toward the pending balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum PaymentState {
    Approved,
    Pending,
    Rejected,
    Failed,
    Returned,
}

/// A registered payment against a plan. Append-only from the client's
/// perspective: created via registration, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: String,
    pub plan_id: String,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub television_id: Option<String>,
    pub value: f64,
    pub method: String,
    pub state: PaymentState,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub reference: Option<String>,
    /// Explicitly tags the down payment at registration time, so quota
    /// math never has to infer it from list order.
    #[serde(default)]
    pub is_initial: bool,
}

/// Commands that can be issued against a hardware unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Block,
    Unblock,
    Locate,
    Notify,
    Unenroll,
    BlockSim,
    UnblockSim,
}

/// Delivery state of a dispatched action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActionState {
    Pending,
    Failed,
    Applied,
}

/// One entry in a hardware unit's append-only action audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceAction {
    pub action: ActionKind,
    pub state: ActionState,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub applied_by: Option<String>,
}

/// Current block state of a unit, derived from its action history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum BlockState {
    Blocked,
    Unblocked,
}
