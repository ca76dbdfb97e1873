// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded polling for the hardware unit bound to an enrolment.
//!
//! The backend has no push channel, so after showing the provisioning QR
//! the client repeatedly asks "is there a device for this enrolment yet?"
//! A not-found answer is the expected not-yet-provisioned signal and is
//! swallowed silently; any other failure is a non-fatal warning and the
//! loop continues. The attempt ceiling turns into a timeout error.
//!
//! The cancellation token is honored at every iteration, so a superseded
//! enrollment or a torn-down caller stops the loop deterministically
//! instead of leaking it.

use std::time::Duration;

use smartpay_api::SmartPayClient;
use smartpay_core::{Hardware, HardwareKind, SmartPayError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// Interval and attempt ceiling for one polling run.
///
/// Devices and televisions use different defaults; both live in
/// configuration rather than here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay before every attempt, including the first.
    pub interval: Duration,
    /// Maximum number of find attempts before reporting a timeout.
    pub max_attempts: u32,
}

impl PollConfig {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }
}

/// Polls until the hardware bound to `enrolment_id` appears, the attempt
/// ceiling is reached, or `cancel` fires.
///
/// `on_attempt` is invoked with the 1-based attempt number before each
/// find call, so callers can render progress.
pub async fn poll_for_hardware(
    client: &SmartPayClient,
    enrolment_id: &str,
    kind: HardwareKind,
    config: PollConfig,
    cancel: &CancellationToken,
    mut on_attempt: impl FnMut(u32),
) -> Result<Hardware, SmartPayError> {
    debug!(
        enrolment_id,
        %kind,
        max_attempts = config.max_attempts,
        interval_ms = config.interval.as_millis() as u64,
        "polling for provisioned hardware"
    );

    for attempt in 1..=config.max_attempts {
        // The delay comes first: the unit cannot possibly have been
        // provisioned before the QR was even scanned.
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!(enrolment_id, attempt, "polling cancelled");
                return Err(SmartPayError::Cancelled);
            }
            _ = tokio::time::sleep(config.interval) => {}
        }

        on_attempt(attempt);

        let found = match kind {
            HardwareKind::Device => client
                .find_device_by_enrolment(enrolment_id)
                .await
                .map(Hardware::Device),
            HardwareKind::Television => client
                .find_television_by_enrolment(enrolment_id)
                .await
                .map(Hardware::Television),
        };

        match found {
            Ok(hardware) => {
                debug!(enrolment_id, attempt, id = hardware.id(), "hardware provisioned");
                return Ok(hardware);
            }
            Err(err) if err.is_not_found() => {
                trace!(enrolment_id, attempt, "not provisioned yet");
            }
            Err(err) => {
                // Non-fatal: a flaky backend response must not abort the
                // whole provisioning session.
                warn!(enrolment_id, attempt, error = %err, "poll attempt failed, continuing");
            }
        }
    }

    Err(SmartPayError::EnrollmentTimeout {
        attempts: config.max_attempts,
    })
}
