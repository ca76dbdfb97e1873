// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hardware enrollment for the SmartPay client.
//!
//! Generates provisioning payloads and polls the backend, bounded and
//! cancellable, until the enrolled device or television appears.

pub mod flow;
pub mod poller;

pub use flow::{EnrollmentFlow, EnrollmentPhase, EnrollmentStart};
pub use poller::{poll_for_hardware, PollConfig};
