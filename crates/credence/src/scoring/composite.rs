use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::{ConfidenceLevel, Pillar, RiskTier, SignalSet};

/// Per-pillar weights applied to sub-scores. Each profile sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub payment_reliability: f64,
    pub savings_stability: f64,
    pub income_consistency: f64,
    pub spending_stability: f64,
}

impl ScoringWeights {
    pub const STANDARD: ScoringWeights = ScoringWeights {
        payment_reliability: 0.40,
        savings_stability: 0.25,
        income_consistency: 0.20,
        spending_stability: 0.15,
    };

    /// Weights used by the browser-side preview scorer.
    pub const CLIENT_PREVIEW: ScoringWeights = ScoringWeights {
        payment_reliability: 0.40,
        savings_stability: 0.30,
        income_consistency: 0.20,
        spending_stability: 0.10,
    };

    pub const fn weight(&self, pillar: Pillar) -> f64 {
        match pillar {
            Pillar::PaymentReliability => self.payment_reliability,
            Pillar::SavingsStability => self.savings_stability,
            Pillar::IncomeConsistency => self.income_consistency,
            Pillar::SpendingStability => self.spending_stability,
        }
    }

    /// Weighted composite over whichever pillars are supplied.
    ///
    /// A pillar absent from `scores` contributes nothing, which pulls the composite down
    /// rather than failing.
    pub fn composite<I>(&self, scores: I) -> u8
    where
        I: IntoIterator<Item = (Pillar, u8)>,
    {
        let weighted: f64 = scores
            .into_iter()
            .map(|(pillar, score)| self.weight(pillar) * f64::from(score))
            .sum();

        weighted.clamp(0.0, 100.0).round() as u8
    }

    pub fn trust_score(&self, signals: &SignalSet) -> u8 {
        self.composite(signals.pillar_scores())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Named weight profiles selectable from configuration and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightProfile {
    #[default]
    Standard,
    ClientPreview,
}

impl WeightProfile {
    pub const fn weights(self) -> ScoringWeights {
        match self {
            WeightProfile::Standard => ScoringWeights::STANDARD,
            WeightProfile::ClientPreview => ScoringWeights::CLIENT_PREVIEW,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            WeightProfile::Standard => "standard",
            WeightProfile::ClientPreview => "client_preview",
        }
    }
}

impl fmt::Display for WeightProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWeightProfile(pub String);

impl fmt::Display for UnknownWeightProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown weight profile '{}' (expected 'standard' or 'client_preview')",
            self.0
        )
    }
}

impl std::error::Error for UnknownWeightProfile {}

impl FromStr for WeightProfile {
    type Err = UnknownWeightProfile;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "standard" | "server" => Ok(Self::Standard),
            "client_preview" | "client-preview" | "client" => Ok(Self::ClientPreview),
            other => Err(UnknownWeightProfile(other.to_string())),
        }
    }
}

/// Composite trust score using the standard weights.
pub fn compute_trust_score(signals: &SignalSet) -> u8 {
    ScoringWeights::STANDARD.trust_score(signals)
}

pub fn classify_confidence(trust_score: u8) -> ConfidenceLevel {
    if trust_score >= 75 {
        ConfidenceLevel::High
    } else if trust_score >= 50 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

pub fn classify_risk(trust_score: u8) -> RiskTier {
    if trust_score >= 80 {
        RiskTier::LowRisk
    } else if trust_score >= 65 {
        RiskTier::LowMediumRisk
    } else if trust_score >= 50 {
        RiskTier::MediumRisk
    } else if trust_score >= 35 {
        RiskTier::MediumHighRisk
    } else {
        RiskTier::HighRisk
    }
}

/// Underwriting guidance shown alongside the business assessment.
pub fn recommend_action(trust_score: u8) -> &'static str {
    if trust_score >= 80 {
        "Strongly recommended for approval"
    } else if trust_score >= 65 {
        "Recommended for approval with standard terms"
    } else if trust_score >= 50 {
        "Consider approval with additional verification"
    } else if trust_score >= 35 {
        "Additional documentation required"
    } else {
        "Manual review recommended"
    }
}
