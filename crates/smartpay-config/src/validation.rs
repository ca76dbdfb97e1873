// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes: a well-formed base URL, non-zero polling parameters, and a
//! sane request timeout.

use crate::diagnostic::ConfigError;
use crate::model::SmartPayConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)`
/// with all collected validation errors (does not fail fast).
pub fn validate_config(config: &SmartPayConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let base_url = config.api.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "api.base_url must not be empty".to_string(),
        });
    } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("api.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    if config.api.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "api.request_timeout_secs must be at least 1".to_string(),
        });
    }

    if config.enrollment.device_poll_interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "enrollment.device_poll_interval_secs must be at least 1".to_string(),
        });
    }

    if config.enrollment.television_poll_interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "enrollment.television_poll_interval_secs must be at least 1".to_string(),
        });
    }

    if config.enrollment.device_poll_max_attempts == 0 {
        errors.push(ConfigError::Validation {
            message: "enrollment.device_poll_max_attempts must be at least 1".to_string(),
        });
    }

    if config.enrollment.television_poll_max_attempts == 0 {
        errors.push(ConfigError::Validation {
            message: "enrollment.television_poll_max_attempts must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = SmartPayConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_base_url_fails_validation() {
        let mut config = SmartPayConfig::default();
        config.api.base_url = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("base_url"))));
    }

    #[test]
    fn non_http_base_url_fails_validation() {
        let mut config = SmartPayConfig::default();
        config.api.base_url = "ftp://smartpay.example.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("http"))));
    }

    #[test]
    fn zero_poll_interval_fails_validation() {
        let mut config = SmartPayConfig::default();
        config.enrollment.device_poll_interval_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("device_poll_interval_secs"))));
    }

    #[test]
    fn zero_attempt_ceiling_fails_validation() {
        let mut config = SmartPayConfig::default();
        config.enrollment.television_poll_max_attempts = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("television_poll_max_attempts"))));
    }
}
