use anyhow::{Context as AnyhowContext, Result};
use codegraph_engine::{AnalyzerConfig, ResolutionSchedule, StrategyKind};
use codegraph_scanner::ScanOptions;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Contents of a `--config` TOML file; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub project_name: Option<String>,
    pub schedule: Option<ResolutionSchedule>,
    pub strategy: Option<StrategyKind>,
    pub scan: ScanOptions,
}

impl FileConfig {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub(crate) fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// File values over the defaults
    pub(crate) fn analyzer(&self) -> AnalyzerConfig {
        let defaults = AnalyzerConfig::default();
        AnalyzerConfig {
            project_name: self
                .project_name
                .clone()
                .unwrap_or(defaults.project_name),
            schedule: self.schedule.unwrap_or(defaults.schedule),
            strategy: self.strategy.unwrap_or(defaults.strategy),
        }
    }
}
