use crate::application::record_source::RecordSource;
use crate::application::view_composer::{ComposerSettings, DEFAULT_AI_USAGE_THRESHOLD};
use crate::infrastructure::fixtures::FixtureSource;
use crate::infrastructure::json_source::JsonFileSource;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DEFAULT_CONFIG_PATH: &str = "config/dashboard.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub kpi: KpiSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Fixtures,
    Json,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SourceSettings {
    #[serde(default)]
    pub kind: SourceKind,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct KpiSettings {
    pub ai_usage_threshold: u8,
}

impl Default for KpiSettings {
    fn default() -> Self {
        Self {
            ai_usage_threshold: DEFAULT_AI_USAGE_THRESHOLD,
        }
    }
}

impl KpiSettings {
    pub fn composer_settings(&self) -> ComposerSettings {
        ComposerSettings {
            ai_usage_threshold: self.ai_usage_threshold,
        }
    }
}

/// Load `config/dashboard.toml` if present, overlaid by `DASHBOARD__*` variables
/// (e.g. `DASHBOARD__SERVER__BIND`).
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    load_dashboard_config_from(Path::new(DEFAULT_CONFIG_PATH))
}

/// Same as [`load_dashboard_config`] with an explicit file; a missing file
/// falls back to defaults and environment overrides.
pub fn load_dashboard_config_from(path: &Path) -> anyhow::Result<DashboardConfig> {
    let builder = config::Config::builder().add_source(config::File::from(path).required(false));
    finish(builder)
}

fn finish(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> anyhow::Result<DashboardConfig> {
    let settings = builder
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: DashboardConfig = settings.try_deserialize()?;
    if config.kpi.ai_usage_threshold > 100 {
        anyhow::bail!(
            "kpi.ai_usage_threshold must be a percentage, got {}",
            config.kpi.ai_usage_threshold
        );
    }
    Ok(config)
}

pub fn build_record_source(settings: &SourceSettings) -> anyhow::Result<Arc<dyn RecordSource>> {
    match (settings.kind, &settings.path) {
        (SourceKind::Fixtures, _) => Ok(Arc::new(FixtureSource)),
        (SourceKind::Json, Some(path)) => Ok(Arc::new(JsonFileSource::new(path.clone()))),
        (SourceKind::Json, None) => {
            anyhow::bail!("source.path is required when source.kind = \"json\"")
        }
    }
}
