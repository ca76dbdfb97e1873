// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./smartpay.toml` > `~/.config/smartpay/smartpay.toml`
//! > `/etc/smartpay/smartpay.toml` with environment variable overrides via
//! the `SMARTPAY_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SmartPayConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/smartpay/smartpay.toml` (system-wide)
/// 3. `~/.config/smartpay/smartpay.toml` (user XDG config)
/// 4. `./smartpay.toml` (local directory)
/// 5. `SMARTPAY_*` environment variables
pub fn load_config() -> Result<SmartPayConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SmartPayConfig::default()))
        .merge(Toml::file("/etc/smartpay/smartpay.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("smartpay/smartpay.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("smartpay.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<SmartPayConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SmartPayConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SmartPayConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SmartPayConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `SMARTPAY_API_BASE_URL` must map to
/// `api.base_url`, not `api.base.url`.
fn env_provider() -> Env {
    Env::prefixed("SMARTPAY_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped.
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("api_", "api.", 1)
            .replacen("session_", "session.", 1)
            .replacen("enrollment_", "enrollment.", 1)
            .replacen("display_", "display.", 1)
            .replacen("log_", "log.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_yields_defaults() {
        let config = load_config_from_str("").expect("defaults should load");
        assert_eq!(config.api.base_url, "http://localhost:8000/api/v1");
        assert_eq!(config.api.request_timeout_secs, 30);
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
[api]
base_url = "https://smartpay.example.com/api/v1"

[enrollment]
device_poll_max_attempts = 50
"#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://smartpay.example.com/api/v1");
        assert_eq!(config.enrollment.device_poll_max_attempts, 50);
        // Untouched keys keep their defaults.
        assert_eq!(config.enrollment.television_poll_max_attempts, 300);
    }
}
