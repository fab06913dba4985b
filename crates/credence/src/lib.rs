//! Credence trust scoring: a deterministic multi-signal scoring engine plus the thin service
//! layer (signal sources, passports, underwriting view, HTTP router) built around it.

pub mod config;
pub mod error;
pub mod passport;
pub mod router;
pub mod scoring;
pub mod service;
pub mod sources;
pub mod telemetry;
pub mod underwriting;

pub use router::trust_router;
pub use scoring::{
    classify_confidence, classify_risk, compute_signal_set, compute_trust_score,
    generate_factors, recommend_action, ScoringEngine, TrustAssessment,
};
pub use service::{ScoreReport, TrustService, TrustServiceError};
