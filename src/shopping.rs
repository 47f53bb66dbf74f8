use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::models::Recipe;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ShoppingItem {
    pub name: String,
    pub amount: String,
    pub cost: f64,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub items: Vec<ShoppingItem>,
    pub total_cost: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum ShoppingListError {
    #[error("item {index} is out of range for a list of {len}")]
    ItemOutOfRange { index: usize, len: usize },
}

/// Merges the ingredients of `recipes` into one list. Ingredients with the
/// same case-insensitive name collapse into a single item: amounts are joined
/// with " + " (no unit arithmetic) and costs summed.
pub fn build_shopping_list(recipes: &[Recipe]) -> ShoppingList {
    let mut items: Vec<ShoppingItem> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for ingredient in recipes.iter().flat_map(|r| &r.ingredients) {
        let key = ingredient.name.to_lowercase();
        match index_by_name.get(&key) {
            Some(&idx) => {
                let item = &mut items[idx];
                item.amount = format!("{} + {}", item.amount, ingredient.amount);
                item.cost += ingredient.cost;
            }
            None => {
                index_by_name.insert(key, items.len());
                items.push(ShoppingItem {
                    name: ingredient.name.clone(),
                    amount: ingredient.amount.clone(),
                    cost: ingredient.cost,
                    completed: false,
                });
            }
        }
    }

    let total_cost = items.iter().map(|i| i.cost).sum();
    ShoppingList { items, total_cost }
}

impl ShoppingList {
    pub fn set_completed(&mut self, index: usize, completed: bool) -> Result<(), ShoppingListError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(ShoppingListError::ItemOutOfRange { index, len })?;
        item.completed = completed;
        Ok(())
    }
}
