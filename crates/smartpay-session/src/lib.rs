// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session state for the SmartPay client.
//!
//! Auth state is an explicit [`Session`] object rather than process-wide
//! singletons: one writer (login/logout), read-only consumers, persisted
//! under the user's config directory. Also carries the in-progress
//! sale-wizard snapshot.

pub mod flow;
pub mod jwt;
pub mod session;

pub use flow::{FlowStore, SaleFlowState};
pub use jwt::{decode_claims, Claims};
pub use session::{authenticated_client, login, logout, Session, SessionStore};
