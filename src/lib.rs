//! Struggle Meals: budget recipe generation for students.
//!
//! [`orchestrator::RecipeGenerator`] turns [`models::Preferences`] into three
//! recipes by walking a fallback chain of AI providers, ending in a
//! deterministic synthesizer so a request always gets an answer.
//! [`dietary::filter_recipes_by_dietary_restrictions`] is usable on its own
//! to re-filter any recipe list.

pub mod browse;
pub mod config;
pub mod dietary;
pub mod fallback;
pub mod gemini;
pub mod huggingface;
pub mod models;
pub mod orchestrator;
pub mod parser;
pub mod prompt;
pub mod provider;
pub mod routes;
pub mod shopping;
pub mod usage;
pub mod youtube;

pub use config::AppConfig;
pub use dietary::filter_recipes_by_dietary_restrictions;
pub use models::{Ingredient, Preferences, Provenance, Recipe, SkillLevel};
pub use orchestrator::{GenerationOutcome, RecipeGenerator};
pub use provider::{GenerationStage, ProviderError, RecipeProvider};
