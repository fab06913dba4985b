use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::debug;

use super::{PersonaId, PersonaSignals, PersonaSummary, SignalSource, SourceError};
use crate::scoring::{RawIncomeData, RawPaymentData, RawSavingsData, RawSignals, RawSpendingData};

/// Signal source backed by a warehouse CSV export, one row per persona.
#[derive(Debug, Clone)]
pub struct CsvSignalSource {
    personas: Vec<PersonaSignals>,
}

impl CsvSignalSource {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SourceError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut seen = HashSet::new();
        let mut personas = Vec::new();

        for row in csv_reader.deserialize::<SignalRow>() {
            let persona = row?.into_persona();
            if !seen.insert(persona.persona_id.clone()) {
                return Err(SourceError::DuplicatePersona(persona.persona_id));
            }
            personas.push(persona);
        }

        debug!(personas = personas.len(), "loaded signal export");
        Ok(Self { personas })
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}

impl SignalSource for CsvSignalSource {
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

#[derive(Debug, Deserialize)]
struct SignalRow {
    persona_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    display_name: Option<String>,
    on_time_count: u32,
    total_count: u32,
    growth_percent: f64,
    avg_balance: f64,
    months_with_income: u32,
    avg_deposit: f64,
    deposit_std_dev: f64,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    income_source: Option<String>,
    volatility_percent: f64,
}

impl SignalRow {
    fn into_persona(self) -> PersonaSignals {
        let display_name = self
            .display_name
            .unwrap_or_else(|| self.persona_id.clone());

        PersonaSignals {
            persona_id: PersonaId(self.persona_id),
            display_name,
            raw: RawSignals {
                payment: RawPaymentData {
                    on_time_count: self.on_time_count,
                    total_count: self.total_count,
                },
                savings: RawSavingsData {
                    growth_percent: self.growth_percent,
                    avg_balance: self.avg_balance,
                },
                income: RawIncomeData {
                    months_with_income: self.months_with_income,
                    avg_deposit: self.avg_deposit,
                    deposit_std_dev: self.deposit_std_dev,
                    source_label: self.income_source.unwrap_or_default(),
                },
                spending: RawSpendingData {
                    volatility_percent: self.volatility_percent,
                },
            },
            history: Vec::new(),
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
