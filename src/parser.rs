//! Turns raw provider output into recipes.
//!
//! Generative providers answer with prose that embeds one JSON object per
//! recipe. [`parse_structured_text`] pulls every balanced `{...}` fragment out
//! of that prose and keeps the ones that decode strictly into a recipe.
//! Providers with no structured-output guarantee go through
//! [`parse_unstructured_text`], which treats a response as a success signal
//! only and shapes recipes from the preferences instead.

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::fallback::templated_recipes;
use crate::models::{new_recipe_id, Ingredient, Preferences, Provenance, Recipe};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("response envelope could not be decoded: {0}")]
    Envelope(String),
    #[error("no text content found in response")]
    MissingText,
    #[error("no valid recipe JSON found in response ({fragments} fragments scanned)")]
    NoRecipes { fragments: usize },
    #[error("response text of {bytes} bytes is too large to scan")]
    TooLarge { bytes: usize },
}

// --- Gemini envelope ---

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    #[allow(dead_code)]
    Other(serde_json::Value),
}

/// Extracts `candidates[0].content.parts[0].text` from a generateContent body.
pub fn extract_candidate_text(body: &str) -> Result<String, ParseError> {
    let parsed: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| ParseError::Envelope(e.to_string()))?;

    match parsed.candidates.first().and_then(|c| c.content.parts.first()) {
        Some(Part::Text { text }) => Ok(text.clone()),
        _ => Err(ParseError::MissingText),
    }
}

/// Parses a full generateContent response body into recipes.
pub fn parse_generate_content(body: &str) -> Result<Vec<Recipe>, ParseError> {
    let text = extract_candidate_text(body)?;
    parse_structured_text(&text)
}

// --- Structured-text variant ---

/// Wire shape of one recipe fragment. Every field is required; the cost
/// totals must be present but are re-derived from the ingredients.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipeFragment {
    name: String,
    ingredients: Vec<IngredientFragment>,
    instructions: Vec<String>,
    prep_time: String,
    #[allow(dead_code)]
    total_cost: f64,
    #[allow(dead_code)]
    cost_per_serving: f64,
    servings: u32,
    youtube_keywords: String,
}

#[derive(Debug, Deserialize)]
struct IngredientFragment {
    name: String,
    amount: String,
    cost: f64,
}

impl RecipeFragment {
    fn into_recipe(self) -> Option<Recipe> {
        if self.name.trim().is_empty() || self.servings == 0 {
            return None;
        }
        if self.ingredients.iter().any(|i| !i.cost.is_finite() || i.cost < 0.0) {
            return None;
        }
        let ingredients = self
            .ingredients
            .into_iter()
            .map(|i| Ingredient::new(i.name, i.amount, i.cost))
            .collect();
        Some(Recipe::new(
            new_recipe_id("generated"),
            self.name,
            ingredients,
            self.instructions,
            self.prep_time,
            self.servings,
            self.youtube_keywords,
            Some(Provenance::Generated),
        ))
    }
}

fn decode_recipe(fragment: &str) -> Option<Recipe> {
    serde_json::from_str::<RecipeFragment>(fragment)
        .ok()
        .and_then(RecipeFragment::into_recipe)
}

/// Texts longer than this are refused before scanning.
pub const MAX_STRUCTURED_TEXT_BYTES: usize = 256 * 1024;
/// Fragments nested deeper than this inside other fragments are not decoded.
const MAX_FRAGMENT_DEPTH: usize = 128;

/// A balanced `{...}` byte range and how many other balanced ranges enclose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fragment {
    start: usize,
    end: usize,
    depth: usize,
}

/// Every balanced `{...}` range in `text`, ordered by start, in one pass.
/// Braces inside JSON string literals do not count. A raw line break ends a
/// string literal. Opening braces that are never closed are dropped and do
/// not add depth.
fn brace_fragments(text: &str) -> Vec<Fragment> {
    let mut open = Vec::new();
    let mut closed = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in text.as_bytes().iter().enumerate() {
        if in_string {
            match b {
                b'\n' => {
                    in_string = false;
                    escaped = false;
                }
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => open.push(i),
            b'}' => {
                if let Some(start) = open.pop() {
                    closed.push((start, i + 1));
                }
            }
            _ => {}
        }
    }

    closed.sort_unstable_by_key(|&(start, _)| start);

    // balanced ranges either nest or are disjoint
    let mut enclosing: Vec<usize> = Vec::new();
    closed
        .into_iter()
        .map(|(start, end)| {
            while enclosing.last().is_some_and(|&outer_end| outer_end <= start) {
                enclosing.pop();
            }
            let depth = enclosing.len();
            enclosing.push(end);
            Fragment { start, end, depth }
        })
        .collect()
}

/// Decodes every recipe fragment in `text`, in order of appearance, each with
/// a fresh identifier. A fragment that is not a recipe is searched for
/// nested recipes; one that is a recipe is not searched further. Fails when
/// nothing decodes.
pub fn parse_structured_text(text: &str) -> Result<Vec<Recipe>, ParseError> {
    if text.len() > MAX_STRUCTURED_TEXT_BYTES {
        warn!("❌ Refusing to scan {} bytes of provider text", text.len());
        return Err(ParseError::TooLarge { bytes: text.len() });
    }

    let mut recipes = Vec::new();
    let mut scanned = 0;
    let mut decoded_until = 0;

    for fragment in brace_fragments(text) {
        if fragment.start < decoded_until || fragment.depth > MAX_FRAGMENT_DEPTH {
            continue;
        }
        scanned += 1;
        match decode_recipe(&text[fragment.start..fragment.end]) {
            Some(recipe) => {
                recipes.push(recipe);
                decoded_until = fragment.end;
            }
            None => debug!(
                len = fragment.end - fragment.start,
                depth = fragment.depth,
                "Fragment is not a recipe"
            ),
        }
    }

    if recipes.is_empty() {
        warn!("❌ No valid recipe JSON in {} scanned fragments", scanned);
        return Err(ParseError::NoRecipes { fragments: scanned });
    }

    info!("🧾 Parsed {} recipes from {} fragments", recipes.len(), scanned);
    Ok(recipes)
}

// --- Unstructured-text variant ---

/// The raw text is never read for data; a response only signals that the
/// provider is up. Recipes are shaped from `preferences`.
pub fn parse_unstructured_text(raw: &str, preferences: &Preferences) -> Vec<Recipe> {
    debug!(len = raw.len(), "Ignoring unstructured provider text");
    templated_recipes(preferences)
}
