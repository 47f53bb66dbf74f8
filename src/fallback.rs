use crate::dietary::filter_recipes_by_dietary_restrictions;
use crate::models::{new_recipe_id, Ingredient, Preferences, Provenance, Recipe};

/// Stand-in terms for the three recipe slots when the food preferences run short.
const DEFAULT_TERMS: [&str; 3] = ["Pasta", "Chicken", "Rice"];
const DEFAULT_TEMPLATE_WORD: &str = "Budget";

/// A recipe slot's food term: `name` for titles and ingredients, `phrase`
/// for running text. Only default terms are lower-cased in running text.
struct SlotTerm {
    name: String,
    phrase: String,
}

fn slot_terms(food_preferences: &str) -> [SlotTerm; 3] {
    let tokens: Vec<&str> = food_preferences.split(',').map(str::trim).collect();
    std::array::from_fn(|slot| match tokens.get(slot) {
        Some(token) if !token.is_empty() => SlotTerm {
            name: token.to_string(),
            phrase: token.to_string(),
        },
        _ => SlotTerm {
            name: DEFAULT_TERMS[slot].to_string(),
            phrase: DEFAULT_TERMS[slot].to_lowercase(),
        },
    })
}

fn steps(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}

/// Last stage of the fallback chain. Always returns three recipes built from
/// the first three comma-separated food preferences, already run through the
/// dietary filter.
pub fn synthesize_recipes(preferences: &Preferences) -> Vec<Recipe> {
    let [first, second, third] = slot_terms(&preferences.food_preferences);

    let recipes = vec![
        Recipe::new(
            new_recipe_id("mock"),
            format!("Budget-Friendly {} Bowl", first.name),
            vec![
                Ingredient::new("Rice", "1 cup", 0.50),
                Ingredient::new("Beans", "1 can", 0.99),
                Ingredient::new("Frozen Vegetables", "1 cup", 1.50),
                Ingredient::new("Olive Oil", "2 tbsp", 0.75),
                Ingredient::new(first.name.clone(), "8 oz", 1.20),
            ],
            steps(&[
                "Cook rice according to package instructions.",
                "Heat beans in a small pot.",
                "Microwave frozen vegetables.",
                "Combine all ingredients in a bowl and drizzle with olive oil.",
                "Season with salt and pepper to taste.",
            ]),
            "15 minutes".into(),
            2,
            format!("easy {} bowl recipe student budget", first.phrase),
            Some(Provenance::Synthesized),
        ),
        Recipe::new(
            new_recipe_id("mock"),
            format!("Student-Friendly {} Stir Fry", second.name),
            vec![
                Ingredient::new(second.name.clone(), "8 oz", 2.50),
                Ingredient::new("Rice", "1 cup", 0.50),
                Ingredient::new("Frozen Stir Fry Vegetables", "2 cups", 2.00),
                Ingredient::new("Soy Sauce", "2 tbsp", 0.30),
                Ingredient::new("Garlic", "2 cloves", 0.20),
            ],
            vec![
                "Cook rice according to package instructions.".into(),
                format!("Cook {} in a pan until done.", second.phrase),
                "Add frozen vegetables and garlic to the pan.".into(),
                "Stir fry for 5-7 minutes until vegetables are tender.".into(),
                "Add soy sauce and stir to combine.".into(),
                "Serve over rice.".into(),
            ],
            "20 minutes".into(),
            2,
            format!("quick {} stir fry student recipe", second.phrase),
            Some(Provenance::Synthesized),
        ),
        Recipe::new(
            new_recipe_id("mock"),
            format!("Easy {} and Egg Bowl", third.name),
            vec![
                Ingredient::new("Eggs", "2", 0.50),
                Ingredient::new("Rice", "1 cup", 0.50),
                Ingredient::new("Green Onions", "2", 0.30),
                Ingredient::new("Soy Sauce", "1 tbsp", 0.15),
                Ingredient::new("Vegetable Oil", "1 tbsp", 0.10),
            ],
            steps(&[
                "Cook rice according to package instructions.",
                "Heat oil in a pan over medium heat.",
                "Crack eggs into the pan and cook to your preference.",
                "Place eggs over rice in a bowl.",
                "Drizzle with soy sauce and garnish with chopped green onions.",
            ]),
            "10 minutes".into(),
            1,
            format!("easy {} egg bowl student recipe", third.phrase),
            Some(Provenance::Synthesized),
        ),
    ];

    filter_recipes_by_dietary_restrictions(recipes, &preferences.dietary_restrictions)
}

/// Fixed three-recipe set used when an unstructured provider answers. Names
/// take the first word of the food preferences.
pub fn templated_recipes(preferences: &Preferences) -> Vec<Recipe> {
    let food = preferences.food_preferences.trim();
    let word = food.split_whitespace().next().unwrap_or(DEFAULT_TEMPLATE_WORD);
    let keywords_base = if food.is_empty() { DEFAULT_TEMPLATE_WORD } else { food };

    let recipes = vec![
        Recipe::new(
            new_recipe_id("generated"),
            format!("Broke but Bougie {word} Bowl"),
            vec![
                Ingredient::new("Rice", "1 cup", 0.50),
                Ingredient::new("Beans", "1 can", 0.99),
                Ingredient::new("Frozen Vegetables", "1 cup", 1.50),
                Ingredient::new("Sauce", "2 tbsp", 0.75),
            ],
            steps(&[
                "Cook rice according to package instructions.",
                "Heat beans in a small pot.",
                "Microwave frozen vegetables.",
                "Combine all ingredients in a bowl and top with sauce.",
            ]),
            "15 minutes".into(),
            2,
            format!("easy {keywords_base} bowl recipe student budget"),
            Some(Provenance::Templated),
        ),
        Recipe::new(
            new_recipe_id("generated"),
            format!("Student Survival {word} Pasta"),
            vec![
                Ingredient::new("Pasta", "8 oz", 1.00),
                Ingredient::new("Canned Tomatoes", "1 can", 0.89),
                Ingredient::new("Garlic", "2 cloves", 0.30),
                Ingredient::new("Olive Oil", "1 tbsp", 0.40),
            ],
            steps(&[
                "Boil pasta according to package instructions.",
                "In a pan, sauté garlic in olive oil.",
                "Add canned tomatoes and simmer for 10 minutes.",
                "Drain pasta and combine with sauce.",
            ]),
            "20 minutes".into(),
            2,
            format!("quick {keywords_base} pasta student recipe"),
            Some(Provenance::Templated),
        ),
        Recipe::new(
            new_recipe_id("generated"),
            format!("Dorm Room {word} Delight"),
            vec![
                Ingredient::new("Eggs", "2", 0.50),
                Ingredient::new("Bread", "2 slices", 0.40),
                Ingredient::new("Cheese", "1 slice", 0.30),
                Ingredient::new("Spinach", "handful", 0.75),
            ],
            steps(&[
                "Toast bread.",
                "Scramble eggs in a microwave-safe bowl.",
                "Layer eggs, cheese, and spinach on toast.",
            ]),
            "10 minutes".into(),
            1,
            format!("easy {keywords_base} breakfast student recipe"),
            Some(Provenance::Templated),
        ),
    ];

    filter_recipes_by_dietary_restrictions(recipes, &preferences.dietary_restrictions)
}
