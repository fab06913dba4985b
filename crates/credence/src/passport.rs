//! Shareable trust passports held in a volatile, expiring store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scoring::{ConfidenceLevel, Factor, RiskTier, SignalSet, TrustAssessment};
use crate::sources::PersonaId;

pub const DEFAULT_PASSPORT_TTL_DAYS: i64 = 30;
/// Longest lifetime a passport may be issued with.
pub const MAX_PASSPORT_TTL_DAYS: i64 = 3650;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PassportId(pub Uuid);

impl PassportId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for PassportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for PassportId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim()).map(Self)
    }
}

/// Snapshot of one assessment that can be shared by link until it expires.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Passport {
    pub id: PassportId,
    pub persona_id: PersonaId,
    pub trust_score: u8,
    pub confidence_level: ConfidenceLevel,
    pub risk_tier: RiskTier,
    pub signals: SignalSet,
    pub factors: Vec<Factor>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub share_url: String,
}

impl Passport {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Lifetime and link settings for issued passports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassportConfig {
    pub ttl_days: i64,
    pub share_base_url: String,
}

impl Default for PassportConfig {
    fn default() -> Self {
        Self {
            ttl_days: DEFAULT_PASSPORT_TTL_DAYS,
            share_base_url: "http://localhost:5173".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PassportError {
    #[error("passport {0} not found")]
    NotFound(PassportId),
    #[error("passport {id} expired at {expired_at}")]
    Expired {
        id: PassportId,
        expired_at: DateTime<Utc>,
    },
    #[error("passport lifetime of {ttl_days} days cannot be applied to {issued_at}")]
    LifetimeOutOfRange {
        ttl_days: i64,
        issued_at: DateTime<Utc>,
    },
}

/// In-memory passport store shared across request handlers.
///
/// Entries are only removed by revocation, by an expired read, or by `purge_expired`.
#[derive(Debug, Clone, Default)]
pub struct PassportStore {
    config: PassportConfig,
    passports: Arc<Mutex<HashMap<PassportId, Passport>>>,
}

impl PassportStore {
    pub fn new(config: PassportConfig) -> Self {
        Self {
            config,
            passports: Arc::default(),
        }
    }

    pub fn config(&self) -> &PassportConfig {
        &self.config
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<PassportId, Passport>> {
        self.passports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn issue(
        &self,
        persona_id: PersonaId,
        assessment: &TrustAssessment,
        now: DateTime<Utc>,
    ) -> Result<Passport, PassportError> {
        let expires_at = TimeDelta::try_days(self.config.ttl_days)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or(PassportError::LifetimeOutOfRange {
                ttl_days: self.config.ttl_days,
                issued_at: now,
            })?;

        let id = PassportId::generate();
        let share_url = format!(
            "{}/passport/{}",
            self.config.share_base_url.trim_end_matches('/'),
            id
        );

        let passport = Passport {
            id,
            persona_id,
            trust_score: assessment.trust_score,
            confidence_level: assessment.confidence_level,
            risk_tier: assessment.risk_tier,
            signals: assessment.signals.clone(),
            factors: assessment.factors.clone(),
            created_at: now,
            expires_at,
            share_url,
        };

        self.entries().insert(id, passport.clone());
        Ok(passport)
    }

    pub fn fetch(&self, id: &PassportId, now: DateTime<Utc>) -> Result<Passport, PassportError> {
        let mut entries = self.entries();
        let passport = entries.get(id).ok_or(PassportError::NotFound(*id))?;

        if passport.is_expired(now) {
            let expired_at = passport.expires_at;
            entries.remove(id);
            return Err(PassportError::Expired {
                id: *id,
                expired_at,
            });
        }

        Ok(passport.clone())
    }

    pub fn revoke(&self, id: &PassportId) -> Result<(), PassportError> {
        self.entries()
            .remove(id)
            .map(|_| ())
            .ok_or(PassportError::NotFound(*id))
    }

    /// Drop every expired passport, returning how many were removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|_, passport| !passport.is_expired(now));
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
