use serde::{Deserialize, Serialize};

use super::format::SavingsSignalView;

/// Payment ledger counts for one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPaymentData {
    pub on_time_count: u32,
    pub total_count: u32,
}

/// Savings trajectory over the observation window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSavingsData {
    pub growth_percent: f64,
    pub avg_balance: f64,
}

/// Deposit regularity observed over the lookback window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIncomeData {
    pub months_with_income: u32,
    pub avg_deposit: f64,
    pub deposit_std_dev: f64,
    #[serde(default)]
    pub source_label: String,
}

/// Month-to-month spending swing, expressed as a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSpendingData {
    pub volatility_percent: f64,
}

/// The four raw behavioural records for a single subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSignals {
    pub payment: RawPaymentData,
    pub savings: RawSavingsData,
    pub income: RawIncomeData,
    pub spending: RawSpendingData,
}

/// Fixed keys of a [`SignalSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Pillar {
    PaymentReliability,
    SavingsStability,
    IncomeConsistency,
    SpendingStability,
}

impl Pillar {
    /// Evaluation order used for composites and factor generation.
    pub const ALL: [Pillar; 4] = [
        Pillar::PaymentReliability,
        Pillar::SavingsStability,
        Pillar::IncomeConsistency,
        Pillar::SpendingStability,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Pillar::PaymentReliability => "Payment Reliability",
            Pillar::SavingsStability => "Savings Stability",
            Pillar::IncomeConsistency => "Income Consistency",
            Pillar::SpendingStability => "Spending Stability",
        }
    }
}

/// Qualitative label attached to a 0-100 sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreLabel {
    Excellent,
    Good,
    Moderate,
    #[serde(rename = "Needs Work")]
    NeedsWork,
    Poor,
    /// Payment history is empty; the score is a neutral placeholder.
    #[serde(rename = "No Data")]
    NoData,
}

impl ScoreLabel {
    pub const fn from_score(score: u8) -> Self {
        if score >= 80 {
            ScoreLabel::Excellent
        } else if score >= 65 {
            ScoreLabel::Good
        } else if score >= 50 {
            ScoreLabel::Moderate
        } else if score >= 35 {
            ScoreLabel::NeedsWork
        } else {
            ScoreLabel::Poor
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ScoreLabel::Excellent => "Excellent",
            ScoreLabel::Good => "Good",
            ScoreLabel::Moderate => "Moderate",
            ScoreLabel::NeedsWork => "Needs Work",
            ScoreLabel::Poor => "Poor",
            ScoreLabel::NoData => "No Data",
        }
    }
}

/// Categorical spending swing. Independent of [`ScoreLabel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolatilityBand {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl VolatilityBand {
    pub fn from_percent(volatility_percent: f64) -> Self {
        if volatility_percent <= 10.0 {
            VolatilityBand::VeryLow
        } else if volatility_percent <= 20.0 {
            VolatilityBand::Low
        } else if volatility_percent <= 35.0 {
            VolatilityBand::Moderate
        } else if volatility_percent <= 50.0 {
            VolatilityBand::High
        } else {
            VolatilityBand::VeryHigh
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            VolatilityBand::VeryLow => "Very Low",
            VolatilityBand::Low => "Low",
            VolatilityBand::Moderate => "Moderate",
            VolatilityBand::High => "High",
            VolatilityBand::VeryHigh => "Very High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSubScore {
    pub score: u8,
    pub label: ScoreLabel,
    pub on_time: u32,
    pub total: u32,
}

/// Savings result. The display `trend` string is added on serialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "SavingsSignalView")]
pub struct SavingsSubScore {
    pub score: u8,
    pub label: ScoreLabel,
    pub growth_percent: f64,
    pub avg_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeSubScore {
    pub score: u8,
    pub label: ScoreLabel,
    #[serde(rename = "type")]
    pub income_type: String,
    pub months_tracked: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingSubScore {
    pub score: u8,
    pub label: ScoreLabel,
    pub volatility: VolatilityBand,
    pub volatility_percent: f64,
}

/// One sub-score per pillar, keyed by fixed names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalSet {
    pub payment_reliability: PaymentSubScore,
    pub savings_stability: SavingsSubScore,
    pub income_consistency: IncomeSubScore,
    pub spending_stability: SpendingSubScore,
}

impl SignalSet {
    pub fn score_for(&self, pillar: Pillar) -> u8 {
        match pillar {
            Pillar::PaymentReliability => self.payment_reliability.score,
            Pillar::SavingsStability => self.savings_stability.score,
            Pillar::IncomeConsistency => self.income_consistency.score,
            Pillar::SpendingStability => self.spending_stability.score,
        }
    }

    pub fn label_for(&self, pillar: Pillar) -> ScoreLabel {
        match pillar {
            Pillar::PaymentReliability => self.payment_reliability.label,
            Pillar::SavingsStability => self.savings_stability.label,
            Pillar::IncomeConsistency => self.income_consistency.label,
            Pillar::SpendingStability => self.spending_stability.label,
        }
    }

    /// `(pillar, score)` pairs in evaluation order.
    pub fn pillar_scores(&self) -> [(Pillar, u8); 4] {
        Pillar::ALL.map(|pillar| (pillar, self.score_for(pillar)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub const fn label(self) -> &'static str {
        match self {
            ConfidenceLevel::High => "High",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    #[serde(rename = "Low Risk")]
    LowRisk,
    #[serde(rename = "Low-Medium Risk")]
    LowMediumRisk,
    #[serde(rename = "Medium Risk")]
    MediumRisk,
    #[serde(rename = "Medium-High Risk")]
    MediumHighRisk,
    #[serde(rename = "High Risk")]
    HighRisk,
}

impl RiskTier {
    pub const fn label(self) -> &'static str {
        match self {
            RiskTier::LowRisk => "Low Risk",
            RiskTier::LowMediumRisk => "Low-Medium Risk",
            RiskTier::MediumRisk => "Medium Risk",
            RiskTier::MediumHighRisk => "Medium-High Risk",
            RiskTier::HighRisk => "High Risk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorKind {
    Positive,
    Negative,
}

/// Human-readable explanation contributing to a trust score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factor {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: FactorKind,
}

impl Factor {
    pub(crate) fn positive(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: FactorKind::Positive,
        }
    }

    pub(crate) fn negative(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: FactorKind::Negative,
        }
    }
}
