use serde::{Serialize, Deserialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        };
        f.write_str(label)
    }
}

/// What the user asked for. Owned by the caller for one generation request.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub food_preferences: String,
    #[serde(default)]
    pub dietary_restrictions: String,
    #[serde(default)]
    pub skill_level: SkillLevel,
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub pantry_items: Vec<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum PreferencesError {
    #[error("food preferences must not be empty")]
    EmptyFoodPreferences,
    #[error("budget must be a non-negative number, got {0}")]
    InvalidBudget(f64),
}

impl Preferences {
    pub fn validate(&self) -> Result<(), PreferencesError> {
        if self.food_preferences.trim().is_empty() {
            return Err(PreferencesError::EmptyFoodPreferences);
        }
        if !self.budget.is_finite() || self.budget < 0.0 {
            return Err(PreferencesError::InvalidBudget(self.budget));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Ingredient {
    pub name: String,
    pub amount: String,
    pub cost: f64,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, amount: impl Into<String>, cost: f64) -> Self {
        Self { name: name.into(), amount: amount.into(), cost }
    }
}

/// Where a recipe came from. Never required by callers.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Decoded from a generative provider's structured output.
    Generated,
    /// Shaped from preferences after an unstructured provider answered.
    Templated,
    /// Built by the fallback synthesizer.
    Synthesized,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub prep_time: String,
    pub total_cost: f64,
    pub cost_per_serving: f64,
    pub servings: u32,
    #[serde(rename = "youtubeKeywords")]
    pub search_keywords: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
}

impl Recipe {
    /// Builds a recipe whose cost fields are derived from `ingredients`.
    /// `servings` is clamped to at least one.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        name: String,
        ingredients: Vec<Ingredient>,
        instructions: Vec<String>,
        prep_time: String,
        servings: u32,
        search_keywords: String,
        provenance: Option<Provenance>,
    ) -> Self {
        let servings = servings.max(1);
        let total_cost = sum_costs(&ingredients);
        Self {
            id,
            name,
            ingredients,
            instructions,
            prep_time,
            total_cost,
            cost_per_serving: total_cost / servings as f64,
            servings,
            search_keywords,
            provenance,
        }
    }

    /// Returns a new recipe carrying `ingredients`, with both cost fields recomputed.
    pub fn with_ingredients(self, ingredients: Vec<Ingredient>) -> Self {
        let servings = self.servings.max(1);
        let total_cost = sum_costs(&ingredients);
        Self {
            ingredients,
            total_cost,
            cost_per_serving: total_cost / servings as f64,
            servings,
            ..self
        }
    }
}

fn sum_costs(ingredients: &[Ingredient]) -> f64 {
    ingredients.iter().map(|i| i.cost).sum()
}

/// Fresh batch-unique identifier, e.g. `generated-6f1c…`.
pub fn new_recipe_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VideoResult {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
}
