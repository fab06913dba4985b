use super::{HistoryPoint, PersonaId, PersonaSignals, PersonaSummary, SignalSource, SourceError};
use crate::scoring::{RawIncomeData, RawPaymentData, RawSavingsData, RawSignals, RawSpendingData};

/// Built-in demo personas covering a strong, a building and a thin credit file.
#[derive(Debug, Clone)]
pub struct MockPersonaSource {
    personas: Vec<PersonaSignals>,
}

impl Default for MockPersonaSource {
    fn default() -> Self {
        Self {
            personas: vec![maya_chen(), jordan_rivera(), alex_thompson()],
        }
    }
}

impl MockPersonaSource {
    pub fn personas(&self) -> &[PersonaSignals] {
        &self.personas
    }
}

impl SignalSource for MockPersonaSource {
    fn fetch(&self, persona_id: &PersonaId) -> Result<Option<PersonaSignals>, SourceError> {
        Ok(self
            .personas
            .iter()
            .find(|persona| &persona.persona_id == persona_id)
            .cloned())
    }

    fn list(&self) -> Result<Vec<PersonaSummary>, SourceError> {
        Ok(self.personas.iter().map(PersonaSignals::summary).collect())
    }
}

fn history(points: &[(&str, u8)]) -> Vec<HistoryPoint> {
    points
        .iter()
        .map(|(month, score)| HistoryPoint {
            month: (*month).to_string(),
            score: *score,
        })
        .collect()
}

fn maya_chen() -> PersonaSignals {
    PersonaSignals {
        persona_id: PersonaId::new("maya-chen"),
        display_name: "Maya Chen".to_string(),
        raw: RawSignals {
            payment: RawPaymentData {
                on_time_count: 23,
                total_count: 24,
            },
            savings: RawSavingsData {
                growth_percent: 8.4,
                avg_balance: 2150.0,
            },
            income: RawIncomeData {
                months_with_income: 6,
                avg_deposit: 4200.0,
                deposit_std_dev: 180.0,
                source_label: "Salary".to_string(),
            },
            spending: RawSpendingData {
                volatility_percent: 14.5,
            },
        },
        history: history(&[
            ("2025-04", 82),
            ("2025-05", 85),
            ("2025-06", 88),
            ("2025-07", 90),
            ("2025-08", 93),
            ("2025-09", 95),
        ]),
    }
}

fn jordan_rivera() -> PersonaSignals {
    PersonaSignals {
        persona_id: PersonaId::new("jordan-rivera"),
        display_name: "Jordan Rivera".to_string(),
        raw: RawSignals {
            payment: RawPaymentData {
                on_time_count: 8,
                total_count: 12,
            },
            savings: RawSavingsData {
                growth_percent: -2.1,
                avg_balance: 150.0,
            },
            income: RawIncomeData {
                months_with_income: 5,
                avg_deposit: 2100.0,
                deposit_std_dev: 520.0,
                source_label: "Gig Work".to_string(),
            },
            spending: RawSpendingData {
                volatility_percent: 48.0,
            },
        },
        history: history(&[
            ("2025-04", 58),
            ("2025-05", 60),
            ("2025-06", 59),
            ("2025-07", 62),
            ("2025-08", 63),
            ("2025-09", 64),
        ]),
    }
}

fn alex_thompson() -> PersonaSignals {
    PersonaSignals {
        persona_id: PersonaId::new("alex-thompson"),
        display_name: "Alex Thompson".to_string(),
        raw: RawSignals {
            payment: RawPaymentData {
                on_time_count: 0,
                total_count: 0,
            },
            savings: RawSavingsData {
                growth_percent: 1.5,
                avg_balance: 320.0,
            },
            income: RawIncomeData {
                months_with_income: 2,
                avg_deposit: 1400.0,
                deposit_std_dev: 560.0,
                source_label: "Part-time".to_string(),
            },
            spending: RawSpendingData {
                volatility_percent: 62.0,
            },
        },
        history: history(&[("2025-08", 52), ("2025-09", 55)]),
    }
}
