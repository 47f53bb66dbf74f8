use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::gemini::truncate_for_log;
use crate::models::{Preferences, Recipe};
use crate::parser::parse_unstructured_text;
use crate::prompt::build_recipe_prompt;
use crate::provider::{GenerationStage, ProviderError, RecipeProvider};

/// Hugging Face text-generation adapter, the tertiary slot. Its output is
/// never parsed; a 2xx answer yields the templated recipe set.
pub struct HuggingFaceClient {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl HuggingFaceClient {
    pub fn new(client: Client, url: String, api_key: Option<String>) -> Self {
        Self { client, url, api_key }
    }

    pub fn from_config(client: Client, config: &AppConfig) -> Self {
        Self::new(client, config.hugging_face_api_url.clone(), config.hugging_face_api_key.clone())
    }
}

#[async_trait]
impl RecipeProvider for HuggingFaceClient {
    fn name(&self) -> &str {
        "huggingface"
    }

    fn stage(&self) -> GenerationStage {
        GenerationStage::TryingTertiary
    }

    // the public inference endpoint accepts anonymous calls
    fn is_configured(&self) -> bool {
        true
    }

    async fn generate(&self, preferences: &Preferences) -> Result<Vec<Recipe>, ProviderError> {
        let prompt = build_recipe_prompt(preferences);
        info!("🔗 Making request to: {}", self.url);

        let payload = json!({
            "inputs": prompt,
            "parameters": {
                "max_new_tokens": 1000,
                "temperature": 0.7,
                "top_p": 0.9,
                "do_sample": true
            }
        });

        let mut request = self.client.post(&self.url).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            error!("❌ Hugging Face failed with status {}: {}", status, truncate_for_log(&response_text, 500));
            return Err(ProviderError::Status { status: status.as_u16(), body: response_text });
        }

        info!("📥 Hugging Face responded ({} bytes), shaping recipes from preferences", response_text.len());
        Ok(parse_unstructured_text(&response_text, preferences))
    }
}
