//! Recipe generation with an ordered provider fallback chain.
//!
//! Providers are tried one at a time in stage order. The first success wins;
//! failures and unconfigured providers advance the chain. When every provider
//! has been passed over, the deterministic synthesizer produces the result,
//! so generation itself never fails. Whatever stage answers, its recipes go
//! through the dietary filter before they are returned.

use reqwest::Client;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::dietary::filter_recipes_by_dietary_restrictions;
use crate::fallback::synthesize_recipes;
use crate::gemini::GeminiClient;
use crate::huggingface::HuggingFaceClient;
use crate::models::{Preferences, Recipe};
use crate::provider::{GenerationStage, ProviderError, RecipeProvider};

#[derive(Debug)]
pub struct StageFailure {
    pub stage: GenerationStage,
    pub provider: String,
    pub error: ProviderError,
}

/// Full record of one walk down the chain.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub recipes: Vec<Recipe>,
    /// Stage whose output was returned.
    pub resolved_by: GenerationStage,
    pub skipped: Vec<GenerationStage>,
    pub failures: Vec<StageFailure>,
}

#[derive(Clone)]
pub struct RecipeGenerator {
    providers: Vec<Arc<dyn RecipeProvider>>,
}

impl RecipeGenerator {
    /// Providers are ordered by their stage regardless of the order given.
    pub fn new(mut providers: Vec<Arc<dyn RecipeProvider>>) -> Self {
        providers.sort_by_key(|p| p.stage());
        Self { providers }
    }

    /// The standard chain: Gemini primary, Gemini fallback model, Hugging Face.
    /// All three share one HTTP client carrying the provider timeout.
    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.provider_timeout).build()?;
        let providers: Vec<Arc<dyn RecipeProvider>> = vec![
            Arc::new(GeminiClient::primary(client.clone(), config)),
            Arc::new(GeminiClient::secondary(client.clone(), config)),
            Arc::new(HuggingFaceClient::from_config(client, config)),
        ];
        Ok(Self::new(providers))
    }

    pub async fn generate(&self, preferences: &Preferences) -> Vec<Recipe> {
        self.generate_with_outcome(preferences).await.recipes
    }

    pub async fn generate_with_outcome(&self, preferences: &Preferences) -> GenerationOutcome {
        let mut skipped = Vec::new();
        let mut failures = Vec::new();

        for provider in &self.providers {
            let stage = provider.stage();

            if !provider.is_configured() {
                info!("⏭️ Skipping {} stage ({}): not configured", stage, provider.name());
                skipped.push(stage);
                continue;
            }

            info!("🚀 Trying {} stage ({})", stage, provider.name());
            match provider.generate(preferences).await {
                Ok(recipes) => {
                    info!("✅ {} stage produced {} recipes", stage, recipes.len());
                    let recipes = filter_recipes_by_dietary_restrictions(recipes, &preferences.dietary_restrictions);
                    return GenerationOutcome { recipes, resolved_by: stage, skipped, failures };
                }
                Err(error) => {
                    warn!("🔄 {} stage ({}) failed, falling back: {}", stage, provider.name(), error);
                    failures.push(StageFailure { stage, provider: provider.name().to_string(), error });
                }
            }
        }

        info!("📦 All providers exhausted, synthesizing fallback recipes");
        GenerationOutcome {
            recipes: synthesize_recipes(preferences),
            resolved_by: GenerationStage::Synthesizing,
            skipped,
            failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{new_recipe_id, Ingredient, SkillLevel};
    use crate::parser::ParseError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Behaviour {
        Succeed,
        Fail,
        Unconfigured,
    }

    struct StubProvider {
        stage: GenerationStage,
        behaviour: Behaviour,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn new(stage: GenerationStage, behaviour: Behaviour) -> Arc<Self> {
            Arc::new(Self { stage, behaviour, calls: AtomicUsize::new(0) })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RecipeProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        fn stage(&self) -> GenerationStage {
            self.stage
        }

        fn is_configured(&self) -> bool {
            !matches!(self.behaviour, Behaviour::Unconfigured)
        }

        async fn generate(&self, _preferences: &Preferences) -> Result<Vec<Recipe>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behaviour {
                Behaviour::Succeed => Ok(vec![Recipe::new(
                    new_recipe_id("stub"),
                    format!("{} special", self.stage),
                    vec![Ingredient::new("Oats", "1 cup", 0.4)],
                    vec![],
                    "5 minutes".into(),
                    1,
                    "oats".into(),
                    None,
                )]),
                Behaviour::Fail => Err(ProviderError::Parse(ParseError::NoRecipes { fragments: 0 })),
                Behaviour::Unconfigured => unreachable!("unconfigured providers are never called"),
            }
        }
    }

    fn chain(providers: &[&Arc<StubProvider>]) -> RecipeGenerator {
        RecipeGenerator::new(providers.iter().map(|&p| p.clone() as Arc<dyn RecipeProvider>).collect())
    }

    fn preferences() -> Preferences {
        Preferences {
            food_preferences: "oats".into(),
            dietary_restrictions: String::new(),
            skill_level: SkillLevel::Beginner,
            budget: 10.0,
            pantry_items: vec![],
        }
    }

    #[tokio::test]
    async fn first_success_wins() {
        let primary = StubProvider::new(GenerationStage::TryingPrimary, Behaviour::Succeed);
        let secondary = StubProvider::new(GenerationStage::TryingSecondary, Behaviour::Succeed);
        let generator = chain(&[&secondary, &primary]);

        let outcome = generator.generate_with_outcome(&preferences()).await;
        assert_eq!(outcome.resolved_by, GenerationStage::TryingPrimary);
        assert_eq!(outcome.recipes[0].name, "primary special");
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 0);
    }

    #[tokio::test]
    async fn failures_advance_the_chain() {
        let primary = StubProvider::new(GenerationStage::TryingPrimary, Behaviour::Fail);
        let secondary = StubProvider::new(GenerationStage::TryingSecondary, Behaviour::Fail);
        let tertiary = StubProvider::new(GenerationStage::TryingTertiary, Behaviour::Succeed);
        let generator = chain(&[&primary, &secondary, &tertiary]);

        let outcome = generator.generate_with_outcome(&preferences()).await;
        assert_eq!(outcome.resolved_by, GenerationStage::TryingTertiary);
        let failed: Vec<_> = outcome.failures.iter().map(|f| f.stage).collect();
        assert_eq!(failed, vec![GenerationStage::TryingPrimary, GenerationStage::TryingSecondary]);
        assert_eq!((primary.calls(), secondary.calls(), tertiary.calls()), (1, 1, 1));
    }

    #[tokio::test]
    async fn unconfigured_providers_are_skipped_not_failed() {
        let primary = StubProvider::new(GenerationStage::TryingPrimary, Behaviour::Unconfigured);
        let tertiary = StubProvider::new(GenerationStage::TryingTertiary, Behaviour::Succeed);
        let generator = chain(&[&primary, &tertiary]);

        let outcome = generator.generate_with_outcome(&preferences()).await;
        assert_eq!(outcome.skipped, vec![GenerationStage::TryingPrimary]);
        assert!(outcome.failures.is_empty());
        assert_eq!(outcome.resolved_by, GenerationStage::TryingTertiary);
    }

    #[tokio::test]
    async fn exhaustion_synthesizes_three_recipes() {
        let primary = StubProvider::new(GenerationStage::TryingPrimary, Behaviour::Fail);
        let tertiary = StubProvider::new(GenerationStage::TryingTertiary, Behaviour::Fail);
        let generator = chain(&[&primary, &tertiary]);

        let outcome = generator.generate_with_outcome(&preferences()).await;
        assert_eq!(outcome.resolved_by, GenerationStage::Synthesizing);
        assert_eq!(outcome.recipes.len(), 3);
        assert_eq!(outcome.failures.len(), 2);
    }

    #[tokio::test]
    async fn empty_chain_still_returns_recipes() {
        let generator = RecipeGenerator::new(vec![]);
        assert_eq!(generator.generate(&preferences()).await.len(), 3);
    }
}
