use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::models::{Preferences, Recipe};
use crate::parser::ParseError;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} has no credentials configured")]
    NotConfigured { provider: &'static str },
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("status={status} body={body}")]
    Status { status: u16, body: String },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Transport(format!("timed out: {e}"))
        } else {
            ProviderError::Transport(e.to_string())
        }
    }
}

/// Position in the generation fallback chain. Declaration order is priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStage {
    NotStarted,
    TryingPrimary,
    TryingSecondary,
    TryingTertiary,
    Synthesizing,
    Done,
}

impl GenerationStage {
    /// Stage entered when the current one fails or is skipped.
    pub fn next(self) -> Self {
        match self {
            GenerationStage::NotStarted => GenerationStage::TryingPrimary,
            GenerationStage::TryingPrimary => GenerationStage::TryingSecondary,
            GenerationStage::TryingSecondary => GenerationStage::TryingTertiary,
            GenerationStage::TryingTertiary => GenerationStage::Synthesizing,
            GenerationStage::Synthesizing | GenerationStage::Done => GenerationStage::Done,
        }
    }
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GenerationStage::NotStarted => "not started",
            GenerationStage::TryingPrimary => "primary",
            GenerationStage::TryingSecondary => "secondary",
            GenerationStage::TryingTertiary => "tertiary",
            GenerationStage::Synthesizing => "synthesizer",
            GenerationStage::Done => "done",
        };
        f.write_str(label)
    }
}

/// One upstream recipe source. Implementations make at most one outbound
/// call per `generate` and never retry.
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Which slot of the fallback chain this provider fills.
    fn stage(&self) -> GenerationStage;

    /// False when credentials are missing; the orchestrator then skips it.
    fn is_configured(&self) -> bool;

    async fn generate(&self, preferences: &Preferences) -> Result<Vec<Recipe>, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_advance_in_priority_order() {
        let mut stage = GenerationStage::NotStarted;
        let mut seen = vec![stage];
        while stage != GenerationStage::Done {
            stage = stage.next();
            seen.push(stage);
        }
        assert_eq!(
            seen,
            vec![
                GenerationStage::NotStarted,
                GenerationStage::TryingPrimary,
                GenerationStage::TryingSecondary,
                GenerationStage::TryingTertiary,
                GenerationStage::Synthesizing,
                GenerationStage::Done,
            ]
        );
        assert!(GenerationStage::TryingPrimary < GenerationStage::TryingTertiary);
    }
}
