// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the SmartPay client.

use thiserror::Error;

/// The primary error type used across all SmartPay crates.
///
/// Mirrors the failure taxonomy the backend exposes: transport failures
/// (no response at all), not-found responses (the expected
/// not-yet-provisioned signal during enrollment polling), structured API
/// errors carrying a `detail` body, and client-side validation failures
/// that block a request before it is sent.
#[derive(Debug, Error)]
pub enum SmartPayError {
    /// Configuration errors (invalid TOML, missing required fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/transport failure: the server could not be reached at all.
    #[error("cannot reach server: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The requested resource does not exist (HTTP 404-class).
    ///
    /// During enrollment polling this is the expected signal that the
    /// hardware has not been provisioned yet and must be swallowed silently.
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// The backend rejected the request with a structured error body.
    ///
    /// `detail` carries the backend's own message verbatim when the body
    /// had one, or a generic fallback otherwise.
    #[error("API error ({status}): {detail}")]
    Api { status: u16, detail: String },

    /// Session errors (missing session, malformed token, corrupt session file).
    #[error("session error: {0}")]
    Session(String),

    /// Client-side validation rejected the input before any network call.
    #[error("validation error: {0}")]
    Validation(String),

    /// Enrollment polling reached its attempt ceiling without a match.
    #[error("enrollment polling timed out after {attempts} attempts")]
    EnrollmentTimeout { attempts: u32 },

    /// The operation was cancelled before completing.
    #[error("operation cancelled")]
    Cancelled,

    /// No valid due date exists within the reconciliation search bound.
    #[error("no valid due date found within {0} days of the plan start")]
    NoDueDate(i64),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SmartPayError {
    /// True for the 404-class responses that enrollment polling treats as
    /// "keep waiting" rather than as a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SmartPayError::NotFound { .. })
    }
}
