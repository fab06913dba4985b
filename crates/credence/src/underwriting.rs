//! Lender-facing reshaping of a trust assessment.

use serde::Serialize;

use crate::scoring::{
    format::format_currency, ConfidenceLevel, Factor, Pillar, RiskTier, ScoreLabel,
    ScoringWeights, TrustAssessment, VolatilityBand,
};
use crate::sources::PersonaId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessAssessment {
    pub applicant: ApplicantSummary,
    pub assessment: AssessmentSummary,
    pub indicators: Vec<RiskIndicator>,
    pub factors: Vec<Factor>,
    pub details: ApplicantDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicantSummary {
    pub id: PersonaId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSummary {
    pub trust_score: u8,
    pub confidence_level: ConfidenceLevel,
    pub risk_tier: RiskTier,
    pub recommendation: &'static str,
}

/// One pillar as presented to an underwriter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskIndicator {
    pub name: &'static str,
    pub score: u8,
    pub label: ScoreLabel,
    pub weight: f64,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantDetails {
    pub on_time_payments: u32,
    pub total_payments: u32,
    pub savings_trend: String,
    pub average_balance: f64,
    pub income_type: String,
    pub months_tracked: u32,
    pub spending_volatility: VolatilityBand,
    pub volatility_percent: f64,
}

impl BusinessAssessment {
    pub fn from_assessment(
        persona_id: PersonaId,
        name: impl Into<String>,
        assessment: &TrustAssessment,
        weights: &ScoringWeights,
    ) -> Self {
        let signals = &assessment.signals;
        let payment = &signals.payment_reliability;
        let savings = &signals.savings_stability;
        let income = &signals.income_consistency;
        let spending = &signals.spending_stability;

        let indicators = Pillar::ALL
            .into_iter()
            .map(|pillar| {
                let detail = match pillar {
                    Pillar::PaymentReliability => {
                        format!("{}/{} payments on time", payment.on_time, payment.total)
                    }
                    Pillar::SavingsStability => format!(
                        "{} trend, {} average balance",
                        savings.trend(),
                        format_currency(savings.avg_balance)
                    ),
                    Pillar::IncomeConsistency => format!(
                        "{} income over {} months",
                        income.income_type, income.months_tracked
                    ),
                    Pillar::SpendingStability => format!(
                        "{} volatility ({:.1}%)",
                        spending.volatility.label(),
                        spending.volatility_percent
                    ),
                };

                RiskIndicator {
                    name: pillar.label(),
                    score: signals.score_for(pillar),
                    label: signals.label_for(pillar),
                    weight: weights.weight(pillar),
                    detail,
                }
            })
            .collect();

        Self {
            applicant: ApplicantSummary {
                id: persona_id,
                name: name.into(),
            },
            assessment: AssessmentSummary {
                trust_score: assessment.trust_score,
                confidence_level: assessment.confidence_level,
                risk_tier: assessment.risk_tier,
                recommendation: assessment.recommendation(),
            },
            indicators,
            factors: assessment.factors.clone(),
            details: ApplicantDetails {
                on_time_payments: payment.on_time,
                total_payments: payment.total,
                savings_trend: savings.trend(),
                average_balance: savings.avg_balance,
                income_type: income.income_type.clone(),
                months_tracked: income.months_tracked,
                spending_volatility: spending.volatility,
                volatility_percent: spending.volatility_percent,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringEngine;
    use crate::sources::{MockPersonaSource, SignalSource};

    fn jordan() -> BusinessAssessment {
        let persona = MockPersonaSource::default()
            .fetch(&PersonaId::new("jordan-rivera"))
            .expect("fetch")
            .expect("fixture present");
        let engine = ScoringEngine::default();
        let assessment = engine.assess(&persona.raw);
        BusinessAssessment::from_assessment(
            persona.persona_id,
            persona.display_name,
            &assessment,
            engine.weights(),
        )
    }

    #[test]
    fn assessment_carries_recommendation_for_composite() {
        let business = jordan();

        assert_eq!(business.assessment.trust_score, 64);
        assert_eq!(business.assessment.risk_tier, RiskTier::MediumRisk);
        assert_eq!(
            business.assessment.recommendation,
            "Consider approval with additional verification"
        );
        assert_eq!(business.applicant.name, "Jordan Rivera");
    }

    #[test]
    fn indicators_follow_pillar_order_with_weights() {
        let business = jordan();

        let names: Vec<&str> = business.indicators.iter().map(|i| i.name).collect();
        assert_eq!(
            names,
            vec![
                "Payment Reliability",
                "Savings Stability",
                "Income Consistency",
                "Spending Stability"
            ]
        );
        assert_eq!(business.indicators[0].weight, 0.40);
        assert_eq!(business.indicators[0].detail, "8/12 payments on time");
        assert_eq!(
            business.indicators[1].detail,
            "-2.1% trend, $150 average balance"
        );
        assert_eq!(business.indicators[3].detail, "High volatility (48.0%)");
    }

    #[test]
    fn details_serialize_in_camel_case() {
        let value = serde_json::to_value(jordan()).expect("serializes");

        assert_eq!(value["details"]["savingsTrend"], "-2.1%");
        assert_eq!(value["details"]["spendingVolatility"], "High");
        assert_eq!(value["assessment"]["riskTier"], "Medium Risk");
        assert_eq!(value["applicant"]["id"], "jordan-rivera");
    }
}
