use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde_json::Value;

use super::parse_record_id;
use crate::api::{RecipeDetail, RecipeSummary};
use crate::auth::Caller;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /recipes - caller's recipes, summary representation
pub async fn list(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> ApiResult<Vec<RecipeSummary>> {
    let recipes = state.recipes.list(&caller).await?;
    Ok(ApiResponse::success(recipes))
}

/// POST /recipes - create a recipe owned by the caller
pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<RecipeDetail> {
    let Json(payload) = payload?;
    let recipe = state.recipes.create(&caller, &payload).await?;
    Ok(ApiResponse::created(recipe))
}

/// GET /recipes/:id - detail representation
pub async fn get(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> ApiResult<RecipeDetail> {
    let id = parse_record_id(&id)?;
    let recipe = state.recipes.retrieve(&caller, id).await?;
    Ok(ApiResponse::success(recipe))
}

/// PATCH /recipes/:id - update the fields present in the payload
pub async fn patch(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<RecipeDetail> {
    let id = parse_record_id(&id)?;
    let Json(payload) = payload?;
    let recipe = state.recipes.partial_update(&caller, id, &payload).await?;
    Ok(ApiResponse::success(recipe))
}

/// PUT /recipes/:id - update with every required field present
pub async fn put(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<RecipeDetail> {
    let id = parse_record_id(&id)?;
    let Json(payload) = payload?;
    let recipe = state.recipes.full_update(&caller, id, &payload).await?;
    Ok(ApiResponse::success(recipe))
}

/// DELETE /recipes/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_record_id(&id)?;
    state.recipes.delete(&caller, id).await?;
    Ok(ApiResponse::no_content())
}
