// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payment-plan reconciliation.
//!
//! The backend never persists a balance or a next-due-date field; every
//! view derives them from the plan's static terms plus the payment list.
//! This module is the single place that derivation happens. All functions
//! are pure: `today` is an explicit argument where the calendar matters.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};

use crate::error::SmartPayError;
use crate::types::{ActionKind, BlockState, DeviceAction, Payment, PaymentState, Plan};

/// How far past `initial_date` the next-due-date search is allowed to run
/// before giving up, once it has passed today's date.
pub const DUE_DATE_SEARCH_HORIZON_DAYS: i64 = 365;

/// Principal minus the sum of approved payments.
///
/// Negative results mean the plan was overpaid; callers decide how to
/// present that, nothing is clamped here.
pub fn pending_value(plan: &Plan, payments: &[Payment]) -> f64 {
    let approved: f64 = payments
        .iter()
        .filter(|p| p.state == PaymentState::Approved)
        .map(|p| p.value)
        .sum();
    plan.value - approved
}

/// True once approved payments cover the full principal.
pub fn is_paid(plan: &Plan, payments: &[Payment]) -> bool {
    pending_value(plan, payments) <= 0.0
}

/// The next quota date that has not been covered by an approved payment.
///
/// Walks `initial_date + n * period` days (n >= 1) and returns the first
/// calendar date not already present among the approved payments' dates
/// (timestamps truncated to date-only). Returns `Ok(None)` when the plan
/// is fully paid. Fails with [`SmartPayError::NoDueDate`] if the search
/// runs more than [`DUE_DATE_SEARCH_HORIZON_DAYS`] past `initial_date`
/// while already beyond `today`.
///
/// A zero period never advances the candidate, so it is rejected up
/// front; plans arrive from the wire and cannot be assumed well-formed.
pub fn compute_next_due_date(
    plan: &Plan,
    payments: &[Payment],
    today: NaiveDate,
) -> Result<Option<NaiveDate>, SmartPayError> {
    if is_paid(plan, payments) {
        return Ok(None);
    }
    if plan.period == 0 {
        return Err(SmartPayError::Validation(
            "plan period must be at least one day".into(),
        ));
    }

    let paid_dates: HashSet<NaiveDate> = payments
        .iter()
        .filter(|p| p.state == PaymentState::Approved)
        .map(|p| p.date.date_naive())
        .collect();

    let period = Days::new(u64::from(plan.period));
    let mut candidate = plan.initial_date;
    loop {
        candidate = candidate
            .checked_add_days(period)
            .ok_or_else(|| SmartPayError::Internal("due date out of range".into()))?;

        let days_out = candidate.signed_duration_since(plan.initial_date).num_days();
        if days_out > DUE_DATE_SEARCH_HORIZON_DAYS && candidate > today {
            return Err(SmartPayError::NoDueDate(DUE_DATE_SEARCH_HORIZON_DAYS));
        }

        if !paid_dates.contains(&candidate) {
            return Ok(Some(candidate));
        }
    }
}

/// The per-quota installment amount.
///
/// The down payment is the payment explicitly tagged `is_initial` at
/// registration; when no payment carries the tag, the full principal is
/// spread across the quotas.
pub fn quota_value(plan: &Plan, payments: &[Payment]) -> f64 {
    if plan.quotas == 0 {
        return 0.0;
    }
    let down_payment = payments
        .iter()
        .find(|p| p.is_initial)
        .map(|p| p.value)
        .unwrap_or(0.0);
    ((plan.value - down_payment) / f64::from(plan.quotas)).round()
}

/// Current block state derived from the action audit trail.
///
/// Only block/unblock entries count; the most recent by `created_at`
/// wins. A unit with no block history is unblocked.
pub fn latest_block_state(actions: &[DeviceAction]) -> BlockState {
    actions
        .iter()
        .filter(|a| matches!(a.action, ActionKind::Block | ActionKind::Unblock))
        .max_by_key(|a| a.created_at)
        .map(|a| match a.action {
            ActionKind::Block => BlockState::Blocked,
            _ => BlockState::Unblocked,
        })
        .unwrap_or(BlockState::Unblocked)
}
