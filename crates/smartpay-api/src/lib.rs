// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! REST API client for the SmartPay backend.
//!
//! One shared [`SmartPayClient`] owns the HTTP pool and bearer-token
//! injection; the per-resource modules add thin wrappers over the
//! `/api/v1/*` endpoints. No business logic lives here -- balances, due
//! dates, and block states are derived in `smartpay-core`.

pub mod actions;
pub mod auth;
pub mod client;
pub mod devices;
pub mod enrolments;
pub mod payments;
pub mod plans;
pub mod sims;
pub mod stores;
pub mod televisions;
pub mod users;

pub use actions::ActionRequest;
pub use auth::LoginResponse;
pub use client::SmartPayClient;
pub use enrolments::NewEnrolment;
pub use payments::NewPayment;
pub use plans::NewPlan;
pub use stores::{NewStore, NewStoreContact, Store, StoreContact};
pub use users::{NewUser, UserProfile};
