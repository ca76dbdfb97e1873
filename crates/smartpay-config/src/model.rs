// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the SmartPay client.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.
//!
//! The enrollment section deliberately carries *separate* interval and
//! attempt-ceiling entries for devices and televisions; unifying them is
//! a business decision, not an implementation one.

use serde::{Deserialize, Serialize};
use smartpay_core::CurrencyLocale;

/// Top-level SmartPay configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SmartPayConfig {
    /// Backend API endpoint settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Session persistence settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Enrollment polling settings.
    #[serde(default)]
    pub enrollment: EnrollmentConfig,

    /// Display and locale settings.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Backend API endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL of the SmartPay REST API, including the `/api/v1` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds. Without one a hung connection
    /// blocks its caller indefinitely.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000/api/v1".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Session persistence configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Directory for the session and sale-wizard files. Empty means the
    /// platform config dir (`~/.config/smartpay` on Linux).
    #[serde(default)]
    pub dir: String,
}

/// Enrollment polling configuration.
///
/// Each attempt is preceded by the interval delay, so the first check is
/// never immediate.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EnrollmentConfig {
    /// Seconds between device polling attempts.
    #[serde(default = "default_device_poll_interval_secs")]
    pub device_poll_interval_secs: u64,

    /// Attempt ceiling for device polling.
    #[serde(default = "default_device_poll_max_attempts")]
    pub device_poll_max_attempts: u32,

    /// Seconds between television polling attempts.
    #[serde(default = "default_television_poll_interval_secs")]
    pub television_poll_interval_secs: u64,

    /// Attempt ceiling for television polling.
    #[serde(default = "default_television_poll_max_attempts")]
    pub television_poll_max_attempts: u32,

    /// Store id embedded in generated provisioning payloads when the
    /// command line does not supply one.
    #[serde(default)]
    pub default_store_id: Option<String>,
}

impl Default for EnrollmentConfig {
    fn default() -> Self {
        Self {
            device_poll_interval_secs: default_device_poll_interval_secs(),
            device_poll_max_attempts: default_device_poll_max_attempts(),
            television_poll_interval_secs: default_television_poll_interval_secs(),
            television_poll_max_attempts: default_television_poll_max_attempts(),
            default_store_id: None,
        }
    }
}

fn default_device_poll_interval_secs() -> u64 {
    3
}

fn default_device_poll_max_attempts() -> u32 {
    100
}

fn default_television_poll_interval_secs() -> u64 {
    5
}

fn default_television_poll_max_attempts() -> u32 {
    300
}

/// Display and locale configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    /// Currency formatting locale, applied to every amount the client
    /// renders.
    #[serde(default)]
    pub currency_locale: CurrencyLocale,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_both_polling_profiles() {
        let config = SmartPayConfig::default();
        assert_eq!(config.enrollment.device_poll_interval_secs, 3);
        assert_eq!(config.enrollment.device_poll_max_attempts, 100);
        assert_eq!(config.enrollment.television_poll_interval_secs, 5);
        assert_eq!(config.enrollment.television_poll_max_attempts, 300);
    }

    #[test]
    fn default_locale_is_colombian_peso() {
        let config = SmartPayConfig::default();
        assert_eq!(config.display.currency_locale, CurrencyLocale::Cop);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = toml::from_str::<SmartPayConfig>("[api]\nbase_uri = \"x\"\n");
        assert!(result.is_err());
    }
}
