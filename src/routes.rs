use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::browse::{is_quick, sort_recipes, SortOrder};
use crate::dietary::filter_recipes_by_dietary_restrictions;
use crate::models::{Preferences, PreferencesError, Recipe, VideoResult};
use crate::orchestrator::RecipeGenerator;
use crate::shopping::{build_shopping_list, ShoppingList, ShoppingListError};
use crate::usage::UsageTracker;
use crate::youtube::YouTubeClient;

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<RecipeGenerator>,
    pub videos: Arc<YouTubeClient>,
    pub usage: Arc<UsageTracker>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/recipes/generate", post(generate_recipes))
        .route("/api/recipes/filter", post(filter_recipes))
        .route("/api/shopping-list", post(create_shopping_list))
        .route("/api/shopping-list/toggle", post(toggle_shopping_item))
        .route("/api/videos", get(find_video))
        .route("/api/usage/:user_id", get(get_usage))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

pub enum ApiError {
    Preferences(PreferencesError),
    ShoppingList(ShoppingListError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match self {
            ApiError::Preferences(e) => e.to_string(),
            ApiError::ShoppingList(e) => e.to_string(),
        };
        (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "error": message }))).into_response()
    }
}

impl From<PreferencesError> for ApiError {
    fn from(e: PreferencesError) -> Self {
        ApiError::Preferences(e)
    }
}

impl From<ShoppingListError> for ApiError {
    fn from(e: ShoppingListError) -> Self {
        ApiError::ShoppingList(e)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(flatten)]
    pub preferences: Preferences,
    #[serde(default)]
    pub user_id: Option<String>,
}

pub async fn generate_recipes(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    body.preferences.validate()?;
    tracing::info!("🚀 Generating recipes for: {}", body.preferences.food_preferences);

    let outcome = state.generator.generate_with_outcome(&body.preferences).await;
    tracing::info!(
        "✅ Returning {} recipes (resolved by {}, {} provider failures)",
        outcome.recipes.len(),
        outcome.resolved_by,
        outcome.failures.len()
    );

    if let Some(user_id) = body.user_id.as_deref().filter(|id| !id.is_empty()) {
        let count = state.usage.record_generation(user_id);
        tracing::info!("📈 Usage for {} is now {}", user_id, count);
    }

    Ok(Json(outcome.recipes))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub dietary_restrictions: String,
    #[serde(default)]
    pub quick_only: bool,
    #[serde(default)]
    pub sort: Option<SortOrder>,
}

pub async fn filter_recipes(Json(body): Json<FilterRequest>) -> Json<Vec<Recipe>> {
    let mut recipes = filter_recipes_by_dietary_restrictions(body.recipes, &body.dietary_restrictions);
    if body.quick_only {
        recipes.retain(is_quick);
    }
    if let Some(order) = body.sort {
        recipes = sort_recipes(recipes, order);
    }
    Json(recipes)
}

#[derive(Debug, Deserialize)]
pub struct ShoppingListRequest {
    pub recipes: Vec<Recipe>,
}

pub async fn create_shopping_list(Json(body): Json<ShoppingListRequest>) -> Json<ShoppingList> {
    let list = build_shopping_list(&body.recipes);
    tracing::info!("🛒 Built shopping list with {} items", list.items.len());
    Json(list)
}

#[derive(Debug, Deserialize)]
pub struct ToggleItemRequest {
    pub list: ShoppingList,
    pub index: usize,
    pub completed: bool,
}

pub async fn toggle_shopping_item(Json(body): Json<ToggleItemRequest>) -> Result<Json<ShoppingList>, ApiError> {
    let mut list = body.list;
    list.set_completed(body.index, body.completed)?;
    tracing::info!("🛒 Item {} marked completed={}", body.index, body.completed);
    Ok(Json(list))
}

#[derive(Debug, Deserialize)]
pub struct VideoQuery {
    pub keywords: String,
}

pub async fn find_video(State(state): State<AppState>, Query(query): Query<VideoQuery>) -> Json<Option<VideoResult>> {
    match state.videos.search(&query.keywords).await {
        Ok(video) => Json(video),
        Err(e) => {
            tracing::error!("❌ Video search failed: {}", e);
            Json(None)
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageResponse {
    pub user_id: String,
    pub recipe_count: u32,
    pub over_free_tier: bool,
}

pub async fn get_usage(Path(user_id): Path<String>, State(state): State<AppState>) -> Json<UsageResponse> {
    let record = state.usage.usage(&user_id);
    Json(UsageResponse {
        recipe_count: record.as_ref().map_or(0, |r| r.recipe_count),
        over_free_tier: record.as_ref().is_some_and(|r| r.over_free_tier()),
        user_id,
    })
}
