//! Display adapters layered over the numeric scoring results.

use serde::Serialize;

use super::domain::{SavingsSubScore, ScoreLabel};

/// Signed one-decimal percentage, e.g. `+5.2%` or `-2.1%`.
///
/// The `+` prefix is present only for non-negative growth. Values exactly halfway between
/// two tenths round away from zero (`0.25` renders as `+0.3%`).
pub fn format_trend(growth_percent: f64) -> String {
    if growth_percent == 0.0 {
        // covers -0.0, which would otherwise render as "+-0.0%"
        return "+0.0%".to_string();
    }
    if growth_percent > 0.0 {
        format!("+{}%", one_decimal(growth_percent))
    } else {
        format!("-{}%", one_decimal(growth_percent.abs()))
    }
}

/// Non-negative `magnitude` to one decimal place, exact ties rounded up.
fn one_decimal(magnitude: f64) -> String {
    // a binary float sits exactly on a .x5 boundary only when it is an odd multiple of 0.25
    let quarters = magnitude * 4.0;
    let is_tie = quarters.fract() == 0.0 && quarters % 2.0 == 1.0;

    if is_tie {
        format!("{:.1}", (magnitude * 10.0).ceil() / 10.0)
    } else {
        format!("{magnitude:.1}")
    }
}

/// Whole-dollar balance with thousands separators, e.g. `$12,480`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}")
}

impl SavingsSubScore {
    pub fn trend(&self) -> String {
        format_trend(self.growth_percent)
    }
}

/// Wire shape of [`SavingsSubScore`], carrying the formatted trend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsSignalView {
    pub score: u8,
    pub label: ScoreLabel,
    pub trend: String,
    pub avg_balance: f64,
    pub growth_percent: f64,
}

impl From<SavingsSubScore> for SavingsSignalView {
    fn from(value: SavingsSubScore) -> Self {
        Self {
            score: value.score,
            label: value.label,
            trend: value.trend(),
            avg_balance: value.avg_balance,
            growth_percent: value.growth_percent,
        }
    }
}
