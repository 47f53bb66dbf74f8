use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{error, info};

use crate::config::{mask_secret, AppConfig};
use crate::models::{Preferences, Recipe};
use crate::parser::parse_generate_content;
use crate::prompt::build_recipe_prompt;
use crate::provider::{GenerationStage, ProviderError, RecipeProvider};

const LOG_PREVIEW_CHARS: usize = 1000;

// Helper to keep large provider bodies out of the logs
pub(crate) fn truncate_for_log(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...[truncated {} bytes]", &text[..cut], text.len() - cut),
        None => text.to_string(),
    }
}

/// Gemini `generateContent` adapter. The primary and secondary slots of the
/// fallback chain are both this type, pointed at different models.
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    stage: GenerationStage,
    name: String,
}

impl GeminiClient {
    pub fn new(client: Client, api_key: Option<String>, base_url: String, model: String, stage: GenerationStage) -> Self {
        let name = format!("gemini/{model}");
        Self { client, api_key, base_url, model, stage, name }
    }

    pub fn primary(client: Client, config: &AppConfig) -> Self {
        Self::new(
            client,
            config.gemini_api_key.clone(),
            config.gemini_api_base.clone(),
            config.gemini_model.clone(),
            GenerationStage::TryingPrimary,
        )
    }

    pub fn secondary(client: Client, config: &AppConfig) -> Self {
        Self::new(
            client,
            config.gemini_api_key.clone(),
            config.gemini_api_base.clone(),
            config.gemini_fallback_model.clone(),
            GenerationStage::TryingSecondary,
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url.trim_end_matches('/'), self.model)
    }

    async fn perform_api_call(&self, api_key: &str, prompt: &str) -> Result<String, ProviderError> {
        let url = self.endpoint();
        info!("🔗 Making request to: {} (key {})", url, mask_secret(api_key));

        let request_body = json!({
            "contents": [{
                "parts": [{"text": prompt}]
            }]
        });

        let response = self.client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        info!("📥 Response status: {}", status);

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!("❌ API Error response: {}", truncate_for_log(&error_body, LOG_PREVIEW_CHARS));
            return Err(ProviderError::Status { status: status.as_u16(), body: error_body });
        }

        let response_text = response.text().await?;
        info!("📥 Raw Gemini API response: {}", truncate_for_log(&response_text, LOG_PREVIEW_CHARS));
        Ok(response_text)
    }
}

#[async_trait]
impl RecipeProvider for GeminiClient {
    fn name(&self) -> &str {
        &self.name
    }

    fn stage(&self) -> GenerationStage {
        self.stage
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, preferences: &Preferences) -> Result<Vec<Recipe>, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured { provider: "gemini" })?;

        let prompt = build_recipe_prompt(preferences);
        info!("🎯 Generating recipes with {} (prompt {} chars)", self.name, prompt.len());

        let body = self.perform_api_call(api_key, &prompt).await?;
        let recipes = parse_generate_content(&body)?;

        info!("✅ {} returned {} recipes", self.name, recipes.len());
        Ok(recipes)
    }
}
