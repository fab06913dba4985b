//! Deterministic multi-signal trust scoring.
//!
//! Four raw behavioural records become four 0-100 sub-scores, which combine through fixed
//! weights into a composite trust score. Confidence, risk tier and explanatory factors are
//! derived from those results. Nothing here performs I/O or reads the clock.

mod composite;
pub mod domain;
mod factors;
pub mod format;
mod rules;
mod validation;

#[cfg(test)]
mod tests;

pub use composite::{
    classify_confidence, classify_risk, compute_trust_score, recommend_action, ScoringWeights,
    UnknownWeightProfile, WeightProfile,
};
pub use domain::{
    ConfidenceLevel, Factor, FactorKind, IncomeSubScore, PaymentSubScore, Pillar, RawIncomeData,
    RawPaymentData, RawSavingsData, RawSignals, RawSpendingData, RiskTier, SavingsSubScore,
    ScoreLabel, SignalSet, SpendingSubScore, VolatilityBand,
};
pub use factors::generate_factors;
pub use rules::{score_income, score_payment, score_savings, score_spending};
pub use validation::ScoringError;

use serde::Serialize;

/// Score every pillar independently.
pub fn compute_signal_set(raw: &RawSignals) -> SignalSet {
    SignalSet {
        payment_reliability: score_payment(&raw.payment),
        savings_stability: score_savings(&raw.savings),
        income_consistency: score_income(&raw.income),
        spending_stability: score_spending(&raw.spending),
    }
}

/// Stateless engine applying one weight profile to raw signals.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine {
    weights: ScoringWeights,
}

impl ScoringEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn assess(&self, raw: &RawSignals) -> TrustAssessment {
        let signals = compute_signal_set(raw);
        self.assess_signals(signals)
    }

    pub fn assess_signals(&self, signals: SignalSet) -> TrustAssessment {
        let trust_score = self.weights.trust_score(&signals);
        let factors = generate_factors(&signals);

        TrustAssessment {
            trust_score,
            confidence_level: classify_confidence(trust_score),
            risk_tier: classify_risk(trust_score),
            signals,
            factors,
        }
    }
}

/// Everything derived from one subject's raw signals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustAssessment {
    pub trust_score: u8,
    pub confidence_level: ConfidenceLevel,
    pub risk_tier: RiskTier,
    pub signals: SignalSet,
    pub factors: Vec<Factor>,
}

impl TrustAssessment {
    pub fn recommendation(&self) -> &'static str {
        recommend_action(self.trust_score)
    }
}
