use crate::infra::{parse_weight_profile, AppSignalSource};
use chrono::Utc;
use clap::Args;
use credence::config::AppConfig;
use credence::error::AppError;
use credence::passport::PassportStore;
use credence::scoring::{FactorKind, Pillar, ScoringEngine, WeightProfile};
use credence::sources::PersonaId;
use credence::telemetry::{self, LogTarget};
use credence::{ScoreReport, TrustService};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Persona to score (e.g. maya-chen)
    #[arg(long)]
    pub(crate) persona: String,
    /// Optional signal export to read personas from instead of the built-in fixtures
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Weight profile: standard or client_preview (defaults to the configured profile)
    #[arg(long, value_parser = parse_weight_profile)]
    pub(crate) weights: Option<WeightProfile>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the passport issuance portion of the demo.
    #[arg(long)]
    pub(crate) skip_passport: bool,
}

type CliService = TrustService<AppSignalSource>;

fn build_service(
    csv: Option<PathBuf>,
    weights: Option<WeightProfile>,
) -> Result<(CliService, WeightProfile), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, LogTarget::Cli)?;

    let profile = weights.unwrap_or(config.scoring.weight_profile);
    let source = AppSignalSource::load(&config.signals, csv)?;
    let service = TrustService::new(
        Arc::new(source),
        ScoringEngine::new(profile.weights()),
        PassportStore::new(config.passport),
    );

    Ok((service, profile))
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        persona,
        csv,
        weights,
    } = args;

    let (service, profile) = build_service(csv, weights)?;
    let report = service.score(&PersonaId::new(persona))?;
    println!("Weight profile: {}", profile.label());
    render_score_report(&report);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let (service, profile) = build_service(None, None)?;
    let now = Utc::now();

    println!("Credence trust scoring demo ({} weights)", profile.label());
    for summary in service.personas()? {
        println!("\n=== {} ({}) ===", summary.display_name, summary.persona_id);
        let report = service.score(&summary.persona_id)?;
        render_score_report(&report);

        let business = service.business_assessment(&summary.persona_id)?;
        println!("\nUnderwriting view");
        println!("  Recommendation: {}", business.assessment.recommendation);
        for indicator in &business.indicators {
            println!(
                "  - {:<20} {:>3} (weight {:.2}) {}",
                indicator.name, indicator.score, indicator.weight, indicator.detail
            );
        }

        if !args.skip_passport {
            let passport = service.issue_passport(&summary.persona_id, now)?;
            println!("\nTrust passport issued");
            println!("  Share link: {}", passport.share_url);
            println!(
                "  Valid until: {}",
                passport.expires_at.format("%Y-%m-%d %H:%M UTC")
            );
        }
    }

    if !args.skip_passport {
        println!(
            "\n{} passport(s) held in memory; they vanish when this process exits.",
            service.passports().len()
        );
    }

    Ok(())
}

fn render_score_report(report: &ScoreReport) {
    let assessment = &report.assessment;
    println!(
        "Trust score: {} ({}, {} confidence)",
        assessment.trust_score,
        assessment.risk_tier.label(),
        assessment.confidence_level.label()
    );

    println!("\nSignals");
    for pillar in Pillar::ALL {
        println!(
            "  - {:<20} {:>3}  {}",
            pillar.label(),
            assessment.signals.score_for(pillar),
            assessment.signals.label_for(pillar).label()
        );
    }

    if assessment.factors.is_empty() {
        println!("\nFactors: none");
    } else {
        println!("\nFactors");
        for factor in &assessment.factors {
            let marker = match factor.kind {
                FactorKind::Positive => '+',
                FactorKind::Negative => '-',
            };
            println!("  {marker} {}", factor.text);
        }
    }

    if let Some(history) = &report.history {
        let trail: Vec<String> = history
            .iter()
            .map(|point| format!("{} {}", point.month, point.score))
            .collect();
        println!("\nHistory: {}", trail.join(" -> "));
    }
}

