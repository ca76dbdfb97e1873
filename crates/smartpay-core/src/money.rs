// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Currency display formatting.
//!
//! Amounts are stored and computed as plain numbers; formatting is a
//! display-layer concern only, always two decimal places. The locale is
//! a named configuration choice rather than a constant baked into each
//! view.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which locale conventions to format amounts with.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CurrencyLocale {
    /// `$ 1.234.567,89` (es-CO).
    #[default]
    Cop,
    /// `$1,234,567.89` (en-US).
    Usd,
}

/// Formats an amount with two decimals and the locale's separators.
pub fn format_currency(value: f64, locale: CurrencyLocale) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let (thousands_sep, decimal_sep, prefix) = match locale {
        CurrencyLocale::Cop => ('.', ',', "$ "),
        CurrencyLocale::Usd => (',', '.', "$"),
    };

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(thousands_sep);
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{prefix}{grouped}{decimal_sep}{fraction:02}")
}
