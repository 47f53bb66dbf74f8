use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::Recipe;

pub const QUICK_RECIPE_MINUTES: u32 = 30;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
    TimeAsc,
}

/// Minutes from a free-text prep time such as "15 minutes" or "about 20 min".
/// Reads the first run of digits; anything without digits is `None`.
pub fn prep_time_minutes(prep_time: &str) -> Option<u32> {
    let start = prep_time.find(|c: char| c.is_ascii_digit())?;
    let digits: String = prep_time[start..].chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

pub fn is_quick(recipe: &Recipe) -> bool {
    prep_time_minutes(&recipe.prep_time).is_some_and(|m| m <= QUICK_RECIPE_MINUTES)
}

pub fn sort_recipes(mut recipes: Vec<Recipe>, order: SortOrder) -> Vec<Recipe> {
    match order {
        SortOrder::PriceAsc => recipes.sort_by(|a, b| a.cost_per_serving.total_cmp(&b.cost_per_serving)),
        SortOrder::PriceDesc => recipes.sort_by(|a, b| b.cost_per_serving.total_cmp(&a.cost_per_serving)),
        SortOrder::TimeAsc => recipes.sort_by(|a, b| {
            match (prep_time_minutes(&a.prep_time), prep_time_minutes(&b.prep_time)) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }),
    }
    recipes
}
