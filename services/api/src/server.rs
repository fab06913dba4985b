use crate::cli::ServeArgs;
use crate::infra::{AppSignalSource, AppState};
use crate::routes::with_trust_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use credence::config::AppConfig;
use credence::error::AppError;
use credence::passport::PassportStore;
use credence::scoring::ScoringEngine;
use credence::telemetry::{self, LogTarget};
use credence::TrustService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

const PASSPORT_SWEEP_INTERVAL: Duration = Duration::from_secs(15 * 60);

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, LogTarget::Server)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let source = AppSignalSource::load(&config.signals, None)?;
    let source_label = source.label();
    let engine = ScoringEngine::new(config.scoring.weight_profile.weights());
    let passports = PassportStore::new(config.passport.clone());
    spawn_passport_sweeper(passports.clone());

    let trust_service = Arc::new(TrustService::new(Arc::new(source), engine, passports));

    let app = with_trust_routes(trust_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        weights = %config.scoring.weight_profile,
        signals = source_label,
        "credence trust service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn spawn_passport_sweeper(passports: PassportStore) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PASSPORT_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = passports.purge_expired(Utc::now());
            if removed > 0 {
                debug!(removed, "purged expired passports");
            }
        }
    });
}
