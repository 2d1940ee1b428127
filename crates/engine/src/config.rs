use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for one analysis run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Key of the single entry under `project` in the output
    pub project_name: String,

    /// When function bodies are resolved relative to extraction
    pub schedule: ResolutionSchedule,

    /// Which name lookups a reference may attempt
    pub strategy: StrategyKind,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            project_name: "MyProject".to_string(),
            schedule: ResolutionSchedule::Deferred,
            strategy: StrategyKind::Syntactic,
        }
    }
}

impl AnalyzerConfig {
    /// Resolve bodies as they are visited, plain name matching
    ///
    /// Reproduces the classic single-pass behaviour: a call to a function
    /// declared later (or in a file visited later) produces no edge.
    pub fn reference() -> Self {
        Self {
            schedule: ResolutionSchedule::Interleaved,
            strategy: StrategyKind::Syntactic,
            ..Default::default()
        }
    }

    /// Full registration before resolution, locals shadow declarations
    pub fn precise() -> Self {
        Self {
            schedule: ResolutionSchedule::Deferred,
            strategy: StrategyKind::Scoped,
            ..Default::default()
        }
    }

    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = name.into();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.project_name.trim().is_empty() {
            return Err(EngineError::invalid_config("project_name must not be empty"));
        }
        Ok(())
    }
}

/// When body resolution runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSchedule {
    /// Every unit is extracted and every method bound before any body is
    /// resolved; forward references across files resolve
    #[default]
    Deferred,

    /// Plain function bodies are resolved when the function is visited,
    /// method bodies right after their unit is bound
    Interleaved,
}

/// Resolution strategy selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Bare name matching against the registry, no scope analysis
    #[default]
    Syntactic,

    /// Same lookups, but names bound in an enclosing local scope are skipped
    Scoped,
}
