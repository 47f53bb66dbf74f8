use crate::models::Preferences;

/// Literal shape each recipe must be echoed back in. Field names match `Recipe`'s JSON.
pub const RECIPE_JSON_TEMPLATE: &str = r#"{
  "name": "Recipe Name",
  "ingredients": [{"name": "ingredient", "amount": "amount", "cost": cost}],
  "instructions": ["step 1", "step 2", ...],
  "prepTime": "XX minutes",
  "totalCost": XX.XX,
  "costPerServing": XX.XX,
  "servings": X,
  "youtubeKeywords": "keywords for searching"
}"#;

pub const RECIPES_PER_REQUEST: usize = 3;

pub fn build_recipe_prompt(preferences: &Preferences) -> String {
    let Preferences { food_preferences, dietary_restrictions, skill_level, budget, pantry_items } = preferences;

    let mut prompt = format!(
        "Generate {RECIPES_PER_REQUEST} budget-friendly \"struggle meal\" recipes for a student with the following preferences:\n\
         - Food preferences: {food_preferences}\n\
         - Dietary restrictions: {dietary_restrictions}\n\
         - Cooking skill level: {skill_level}\n\
         - Weekly budget: ${budget}"
    );

    if !pantry_items.is_empty() {
        prompt.push_str(&format!("\n- Available pantry items: {}", pantry_items.join(", ")));
    }

    prompt.push_str(&format!(
        "\n\nEach recipe should include:\n\
         1. A creative name (something fun like \"Broke but Bougie Burritos\")\n\
         2. List of ingredients with approximate costs\n\
         3. Step-by-step instructions\n\
         4. Prep time\n\
         5. Total cost and cost per serving\n\
         6. Number of servings\n\
         7. Keywords for YouTube search\n\n\
         Format each recipe as JSON with the following structure:\n\
         {RECIPE_JSON_TEMPLATE}\n\n\
         Prioritize cheap, common ingredients suitable for students. Ensure all dietary restrictions are respected."
    ));

    prompt
}
