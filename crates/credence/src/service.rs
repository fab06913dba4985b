use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::passport::{Passport, PassportError, PassportId, PassportStore};
use crate::scoring::{RawSignals, ScoringEngine, ScoringError, SignalSet, TrustAssessment};
use crate::sources::{
    HistoryPoint, PersonaId, PersonaSignals, PersonaSummary, SignalSource, SourceError,
};
use crate::underwriting::BusinessAssessment;

/// Persona id reported for scores computed from caller-supplied inputs.
pub const ADHOC_PERSONA_ID: &str = "adhoc";

/// Service composing the signal source, scoring engine and passport store.
pub struct TrustService<S> {
    source: Arc<S>,
    engine: ScoringEngine,
    passports: PassportStore,
}

impl<S> TrustService<S>
where
    S: SignalSource + 'static,
{
    pub fn new(source: Arc<S>, engine: ScoringEngine, passports: PassportStore) -> Self {
        Self {
            source,
            engine,
            passports,
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn passports(&self) -> &PassportStore {
        &self.passports
    }

    pub fn personas(&self) -> Result<Vec<PersonaSummary>, TrustServiceError> {
        Ok(self.source.list()?)
    }

    fn persona(&self, persona_id: &PersonaId) -> Result<PersonaSignals, TrustServiceError> {
        self.source
            .fetch(persona_id)?
            .ok_or_else(|| TrustServiceError::PersonaNotFound(persona_id.clone()))
    }

    /// Full dashboard score for a known persona.
    pub fn score(&self, persona_id: &PersonaId) -> Result<ScoreReport, TrustServiceError> {
        let persona = self.persona(persona_id)?;
        let assessment = self.engine.assess(&persona.raw);
        debug!(
            persona = %persona_id,
            trust_score = assessment.trust_score,
            "scored persona"
        );

        let history = if persona.history.is_empty() {
            None
        } else {
            Some(persona.history)
        };

        Ok(ScoreReport {
            persona_id: persona.persona_id,
            assessment,
            history,
        })
    }

    pub fn signals(&self, persona_id: &PersonaId) -> Result<SignalSet, TrustServiceError> {
        let persona = self.persona(persona_id)?;
        Ok(crate::scoring::compute_signal_set(&persona.raw))
    }

    /// Score caller-supplied raw signals after validating them.
    pub fn score_raw(&self, raw: &RawSignals) -> Result<ScoreReport, TrustServiceError> {
        raw.validate()?;
        let assessment = self.engine.assess(raw);
        debug!(trust_score = assessment.trust_score, "scored ad-hoc signals");

        Ok(ScoreReport {
            persona_id: PersonaId::new(ADHOC_PERSONA_ID),
            assessment,
            history: None,
        })
    }

    pub fn business_assessment(
        &self,
        persona_id: &PersonaId,
    ) -> Result<BusinessAssessment, TrustServiceError> {
        let persona = self.persona(persona_id)?;
        let assessment = self.engine.assess(&persona.raw);

        Ok(BusinessAssessment::from_assessment(
            persona.persona_id,
            persona.display_name,
            &assessment,
            self.engine.weights(),
        ))
    }

    pub fn issue_passport(
        &self,
        persona_id: &PersonaId,
        now: DateTime<Utc>,
    ) -> Result<Passport, TrustServiceError> {
        let persona = self.persona(persona_id)?;
        let assessment = self.engine.assess(&persona.raw);
        let passport = self.passports.issue(persona.persona_id, &assessment, now)?;

        info!(
            passport = %passport.id,
            persona = %persona_id,
            expires_at = %passport.expires_at,
            "issued trust passport"
        );
        Ok(passport)
    }

    pub fn passport(
        &self,
        id: &PassportId,
        now: DateTime<Utc>,
    ) -> Result<Passport, TrustServiceError> {
        self.passports.fetch(id, now).map_err(|err| {
            if let PassportError::Expired { .. } = err {
                warn!(passport = %id, "expired passport requested");
            }
            err.into()
        })
    }

    pub fn revoke_passport(&self, id: &PassportId) -> Result<(), TrustServiceError> {
        self.passports.revoke(id)?;
        info!(passport = %id, "revoked trust passport");
        Ok(())
    }
}

/// Dashboard payload for one scored subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub persona_id: PersonaId,
    #[serde(flatten)]
    pub assessment: TrustAssessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<HistoryPoint>>,
}

/// Error raised by the trust service.
#[derive(Debug, thiserror::Error)]
pub enum TrustServiceError {
    #[error("persona '{0}' not found")]
    PersonaNotFound(PersonaId),
    #[error(transparent)]
    InvalidInput(#[from] ScoringError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Passport(#[from] PassportError),
}
