use credence::config::SignalSourceConfig;
use credence::scoring::WeightProfile;
use credence::sources::{
    CsvSignalSource, MockPersonaSource, PersonaId, PersonaSignals, PersonaSummary, SignalSource,
    SourceError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Signal source selected at startup: the built-in fixtures or a warehouse export.
#[derive(Debug, Clone)]
pub(crate) enum AppSignalSource {
    Fixtures(MockPersonaSource),
    Export(CsvSignalSource),
}

impl AppSignalSource {
    pub(crate) fn load(
        config: &SignalSourceConfig,
        csv_override: Option<PathBuf>,
    ) -> Result<Self, SourceError> {
        match csv_override.or_else(|| config.csv_path.clone()) {
            Some(path) => {
                let source = CsvSignalSource::from_path(&path)?;
                info!(path = %path.display(), personas = source.len(), "using signal export");
                Ok(Self::Export(source))
            }
            None => Ok(Self::Fixtures(MockPersonaSource::default())),
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Fixtures(_) => "fixtures",
            Self::Export(_) => "csv export",
        }
    }
}

impl SignalSource for AppSignalSource {
    fn fetch(&self, persona_id: &PersonaId) -> Result<Option<PersonaSignals>, SourceError> {
        match self {
            Self::Fixtures(source) => source.fetch(persona_id),
            Self::Export(source) => source.fetch(persona_id),
        }
    }

    fn list(&self) -> Result<Vec<PersonaSummary>, SourceError> {
        match self {
            Self::Fixtures(source) => source.list(),
            Self::Export(source) => source.list(),
        }
    }
}

pub(crate) fn parse_weight_profile(raw: &str) -> Result<WeightProfile, String> {
    raw.parse::<WeightProfile>().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn fixtures_are_used_without_an_export() {
        let source = AppSignalSource::load(&SignalSourceConfig::default(), None)
            .expect("fixtures load");

        assert_eq!(source.label(), "fixtures");
        assert_eq!(source.list().expect("list").len(), 3);
    }

    #[test]
    fn export_override_takes_precedence() {
        let path = std::env::temp_dir().join(format!("credence-export-{}.csv", std::process::id()));
        let mut file = std::fs::File::create(&path).expect("temp file");
        writeln!(
            file,
            "persona_id,display_name,on_time_count,total_count,growth_percent,avg_balance,months_with_income,avg_deposit,deposit_std_dev,income_source,volatility_percent"
        )
        .expect("header");
        writeln!(file, "p-9,Sam Lee,3,4,1.0,250,3,1800,300,Gig Work,30").expect("row");
        drop(file);

        let source = AppSignalSource::load(&SignalSourceConfig::default(), Some(path.clone()))
            .expect("export loads");
        std::fs::remove_file(&path).ok();

        assert_eq!(source.label(), "csv export");
        let persona = source
            .fetch(&PersonaId::new("p-9"))
            .expect("fetch")
            .expect("persona present");
        assert_eq!(persona.display_name, "Sam Lee");
    }

    #[test]
    fn missing_export_is_an_io_error() {
        let result = AppSignalSource::load(
            &SignalSourceConfig::default(),
            Some(PathBuf::from("/nonexistent/credence.csv")),
        );

        assert!(matches!(result, Err(SourceError::Io(_))));
    }

    #[test]
    fn weight_profiles_parse_for_cli() {
        assert_eq!(
            parse_weight_profile("client_preview"),
            Ok(WeightProfile::ClientPreview)
        );
        assert!(parse_weight_profile("aggressive").is_err());
    }
}
