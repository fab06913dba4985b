//! Providers of raw behavioural signals per persona.

mod export;
mod personas;

pub use export::CsvSignalSource;
pub use personas::MockPersonaSource;

use serde::{Deserialize, Serialize};

use crate::scoring::RawSignals;

/// Identifier wrapper for scored subjects.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonaId(pub String);

impl PersonaId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One month of previously computed trust scores, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub month: String,
    pub score: u8,
}

/// Raw inputs and display metadata for one persona.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonaSignals {
    pub persona_id: PersonaId,
    pub display_name: String,
    pub raw: RawSignals,
    pub history: Vec<HistoryPoint>,
}

impl PersonaSignals {
    pub fn summary(&self) -> PersonaSummary {
        PersonaSummary {
            persona_id: self.persona_id.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaSummary {
    pub persona_id: PersonaId,
    pub display_name: String,
}

/// Storage abstraction so the service can run against fixtures or exports.
pub trait SignalSource: Send + Sync {
    fn fetch(&self, persona_id: &PersonaId) -> Result<Option<PersonaSignals>, SourceError>;
    fn list(&self) -> Result<Vec<PersonaSummary>, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read signal export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid signal export: {0}")]
    Csv(#[from] csv::Error),
    #[error("persona '{0}' appears more than once in the export")]
    DuplicatePersona(PersonaId),
    #[error("signal source unavailable: {0}")]
    Unavailable(String),
}
