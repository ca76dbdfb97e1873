// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the SmartPay client.
//!
//! This crate holds the domain types consumed from the SmartPay backend,
//! the shared error taxonomy, and the pure payment-plan reconciliation
//! logic that every view derives balances and due dates from.

pub mod error;
pub mod money;
pub mod reconcile;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SmartPayError;
pub use money::{format_currency, CurrencyLocale};
pub use types::{
    ActionKind, ActionState, BlockState, Device, DeviceAction, Enrolment, Hardware, HardwareKind,
    HardwareState, Payment, PaymentState, Plan, Television,
};
