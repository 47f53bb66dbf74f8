use crate::models::Recipe;

/// Restriction categories and the ingredient terms each one excludes.
/// A category applies when its name appears anywhere in the restriction text.
const EXCLUDED_INGREDIENTS: &[(&str, &[&str])] = &[
    ("dairy", &["milk", "cheese", "butter", "cream", "yogurt"]),
    ("gluten", &["wheat", "flour", "pasta", "bread", "cereal", "barley", "rye"]),
    ("nuts", &["peanut", "almond", "cashew", "walnut", "pecan", "hazelnut"]),
    ("vegetarian", &["meat", "chicken", "beef", "pork", "fish", "seafood"]),
    (
        "vegan",
        &[
            "meat", "chicken", "beef", "pork", "fish", "seafood", "egg", "milk", "cheese", "butter",
            "cream", "yogurt", "honey",
        ],
    ),
];

/// Terms excluded by `restrictions`, in category order. Duplicates are harmless.
pub fn excluded_terms(restrictions: &str) -> Vec<&'static str> {
    let restrictions = restrictions.to_lowercase();
    EXCLUDED_INGREDIENTS
        .iter()
        .filter(|(category, _)| restrictions.contains(category))
        .flat_map(|(_, terms)| terms.iter().copied())
        .collect()
}

/// Drops ingredients that clash with the free-text dietary restrictions.
///
/// Matching is a case-insensitive substring test on ingredient names, so
/// "Butternut Squash" is removed under "dairy". Recipes that lose an
/// ingredient come back with recomputed `total_cost` and `cost_per_serving`;
/// untouched recipes are returned as they were. An empty restriction string
/// returns the input list unchanged.
pub fn filter_recipes_by_dietary_restrictions(recipes: Vec<Recipe>, restrictions: &str) -> Vec<Recipe> {
    if restrictions.is_empty() {
        return recipes;
    }

    let excluded = excluded_terms(restrictions);
    if excluded.is_empty() {
        return recipes;
    }

    recipes
        .into_iter()
        .map(|recipe| {
            let original_len = recipe.ingredients.len();
            let kept: Vec<_> = recipe
                .ingredients
                .iter()
                .filter(|ingredient| {
                    let name = ingredient.name.to_lowercase();
                    !excluded.iter().any(|term| name.contains(term))
                })
                .cloned()
                .collect();

            if kept.len() < original_len {
                tracing::debug!(
                    recipe = %recipe.name,
                    removed = original_len - kept.len(),
                    "🥗 Removed ingredients for dietary restrictions"
                );
                recipe.with_ingredients(kept)
            } else {
                recipe
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{new_recipe_id, Ingredient};
    use pretty_assertions::assert_eq;

    fn recipe(ingredients: Vec<Ingredient>, servings: u32) -> Recipe {
        Recipe::new(
            new_recipe_id("test"),
            "Test Bowl".into(),
            ingredients,
            vec!["Cook.".into()],
            "10 minutes".into(),
            servings,
            "test bowl".into(),
            None,
        )
    }

    #[test]
    fn dairy_removes_cheese_and_recomputes_costs() {
        let input = recipe(
            vec![Ingredient::new("Cheese", "1 slice", 1.00), Ingredient::new("Rice", "1 cup", 0.50)],
            2,
        );
        let filtered = filter_recipes_by_dietary_restrictions(vec![input.clone()], "dairy");

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].ingredients, vec![Ingredient::new("Rice", "1 cup", 0.50)]);
        assert!((filtered[0].total_cost - 0.50).abs() < 1e-9);
        assert!((filtered[0].cost_per_serving - 0.25).abs() < 1e-9);
        assert_eq!(filtered[0].id, input.id);
    }

    #[test]
    fn empty_restrictions_is_identity() {
        let input = vec![
            recipe(vec![Ingredient::new("Chicken", "8 oz", 2.5)], 2),
            recipe(vec![Ingredient::new("Milk", "1 cup", 0.4)], 1),
        ];
        assert_eq!(filter_recipes_by_dietary_restrictions(input.clone(), ""), input);
    }

    #[test]
    fn unknown_restrictions_keep_everything() {
        let input = vec![recipe(vec![Ingredient::new("Chicken", "8 oz", 2.5)], 2)];
        assert_eq!(filter_recipes_by_dietary_restrictions(input.clone(), "low sodium"), input);
    }

    #[test]
    fn category_matching_is_case_insensitive_substring() {
        let input = vec![recipe(
            vec![
                Ingredient::new("Whole Wheat Bread", "2 slices", 0.4),
                Ingredient::new("Peanut Butter", "2 tbsp", 0.3),
                Ingredient::new("Banana", "1", 0.2),
            ],
            1,
        )];
        let filtered = filter_recipes_by_dietary_restrictions(input, "No GLUTEN please, and nuts");
        let names: Vec<_> = filtered[0].ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Banana"]);
        assert!((filtered[0].total_cost - 0.2).abs() < 1e-9);
    }

    #[test]
    fn vegan_excludes_animal_products() {
        let input = vec![recipe(
            vec![
                Ingredient::new("Eggs", "2", 0.5),
                Ingredient::new("Honey", "1 tbsp", 0.2),
                Ingredient::new("Greek Yogurt", "1 cup", 0.9),
                Ingredient::new("Oats", "1 cup", 0.3),
            ],
            1,
        )];
        let filtered = filter_recipes_by_dietary_restrictions(input, "vegan");
        let names: Vec<_> = filtered[0].ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Oats"]);
    }

    #[test]
    fn substring_matching_is_coarse() {
        let input = vec![recipe(
            vec![Ingredient::new("Butternut Squash", "1", 1.5), Ingredient::new("Onion", "1", 0.3)],
            1,
        )];
        let filtered = filter_recipes_by_dietary_restrictions(input, "dairy-free");
        assert_eq!(filtered[0].ingredients.len(), 1);
        assert_eq!(filtered[0].ingredients[0].name, "Onion");
    }

    #[test]
    fn filtering_never_adds_ingredients_and_only_lowers_cost_on_removal() {
        let input = vec![
            recipe(vec![Ingredient::new("Beef", "1 lb", 4.0), Ingredient::new("Rice", "1 cup", 0.5)], 2),
            recipe(vec![Ingredient::new("Lentils", "1 cup", 0.8)], 2),
        ];
        let filtered = filter_recipes_by_dietary_restrictions(input.clone(), "vegetarian");

        for (before, after) in input.iter().zip(&filtered) {
            assert!(after.ingredients.len() <= before.ingredients.len());
            let removed = after.ingredients.len() < before.ingredients.len();
            assert_eq!(removed, after.total_cost < before.total_cost);
            let sum: f64 = after.ingredients.iter().map(|i| i.cost).sum();
            assert!((after.total_cost - sum).abs() < 1e-6);
            assert!((after.cost_per_serving - after.total_cost / after.servings as f64).abs() < 1e-6);
        }
        assert_eq!(filtered[1], input[1]);
    }
}
