// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The enrollment state machine.
//!
//! `Idle -> Generating -> Polling -> {Connected | TimedOut}`, with a
//! manual retry from `TimedOut` back to `Generating`. Regenerating at any
//! point cancels the superseded polling loop through its token before a
//! brand-new enrolment is created; the abandoned enrolment itself is
//! never cancelled server-side.

use smartpay_api::{NewEnrolment, SmartPayClient};
use smartpay_core::{Enrolment, Hardware, HardwareKind, SmartPayError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::poller::{poll_for_hardware, PollConfig};

/// Where an enrollment flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentPhase {
    /// Nothing generated yet.
    Idle,
    /// An enrolment and its provisioning payload are being created.
    Generating,
    /// Waiting for the hardware record to appear.
    Polling,
    /// Terminal success: the hardware was captured.
    Connected,
    /// The attempt ceiling elapsed; a manual retry may regenerate.
    TimedOut,
}

/// A freshly generated enrolment plus its QR-encodable payload.
#[derive(Debug, Clone)]
pub struct EnrollmentStart {
    pub enrolment: Enrolment,
    /// Opaque provisioning payload; the backend owns its shape. Embeds
    /// the store id and the re-enrollment flag.
    pub payload: serde_json::Value,
}

/// Drives one hardware unit through provisioning.
#[derive(Debug)]
pub struct EnrollmentFlow {
    client: SmartPayClient,
    kind: HardwareKind,
    phase: EnrollmentPhase,
    cancel: CancellationToken,
    current: Option<EnrollmentStart>,
}

impl EnrollmentFlow {
    pub fn new(client: SmartPayClient, kind: HardwareKind) -> Self {
        Self {
            client,
            kind,
            phase: EnrollmentPhase::Idle,
            cancel: CancellationToken::new(),
            current: None,
        }
    }

    pub fn phase(&self) -> EnrollmentPhase {
        self.phase
    }

    /// The enrolment generated by the last [`generate`](Self::generate),
    /// if any. Stays valid after a timeout so a manual retry can reuse
    /// the same QR without regenerating.
    pub fn current(&self) -> Option<&EnrollmentStart> {
        self.current.as_ref()
    }

    /// Token cancelling the active polling loop; clone it to wire up
    /// Ctrl+C or caller teardown.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Creates a brand-new enrolment and fetches its provisioning payload.
    ///
    /// Any polling loop still running for a previous enrolment is
    /// cancelled first; the superseded enrolment is simply abandoned.
    pub async fn generate(
        &mut self,
        customer_id: &str,
        vendor_id: &str,
        store_id: Option<&str>,
        re_enrollment: bool,
    ) -> Result<&EnrollmentStart, SmartPayError> {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        self.phase = EnrollmentPhase::Generating;
        self.current = None;

        let enrolment = self
            .client
            .create_enrolment(&NewEnrolment {
                user_id: customer_id.to_string(),
                vendor_id: vendor_id.to_string(),
            })
            .await
            .inspect_err(|_| self.phase = EnrollmentPhase::Idle)?;

        let payload = self
            .client
            .get_qr_payload(&enrolment.enrolment_id, store_id, re_enrollment)
            .await
            .inspect_err(|_| self.phase = EnrollmentPhase::Idle)?;

        info!(enrolment_id = %enrolment.enrolment_id, kind = %self.kind, "enrolment generated");
        Ok(self.current.insert(EnrollmentStart { enrolment, payload }))
    }

    /// Polls for the provisioned hardware, driving the phase to
    /// `Connected` or `TimedOut`.
    pub async fn poll(
        &mut self,
        config: PollConfig,
        on_attempt: impl FnMut(u32),
    ) -> Result<Hardware, SmartPayError> {
        let Some(start) = &self.current else {
            return Err(SmartPayError::Internal(
                "poll called before an enrolment was generated".into(),
            ));
        };
        let enrolment_id = start.enrolment.enrolment_id.clone();

        self.phase = EnrollmentPhase::Polling;
        let cancel = self.cancel.clone();
        let result = poll_for_hardware(
            &self.client,
            &enrolment_id,
            self.kind,
            config,
            &cancel,
            on_attempt,
        )
        .await;

        match &result {
            Ok(hardware) => {
                self.phase = EnrollmentPhase::Connected;
                debug!(id = hardware.id(), "enrollment connected");
            }
            Err(SmartPayError::EnrollmentTimeout { .. }) => {
                self.phase = EnrollmentPhase::TimedOut;
            }
            Err(_) => {
                // Cancellation or transport collapse; the enrolment stays
                // reusable but the flow is back to square one.
                self.phase = EnrollmentPhase::Idle;
            }
        }
        result
    }
}
