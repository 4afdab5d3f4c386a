// Tag and ingredient handlers
//
// Both collections share one set of handlers, selected by a marker type at
// route registration: `get(named::list::<Tags>)`.
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde_json::Value;

use super::parse_record_id;
use crate::api::NamedRepresentation;
use crate::auth::Caller;
use crate::database::models::NamedKind;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// Compile-time selector for a named collection
pub trait NamedCollection: Send + Sync + 'static {
    const KIND: NamedKind;
}

pub struct Tags;

impl NamedCollection for Tags {
    const KIND: NamedKind = NamedKind::Tag;
}

pub struct Ingredients;

impl NamedCollection for Ingredients {
    const KIND: NamedKind = NamedKind::Ingredient;
}

/// GET /tags, GET /ingredients
pub async fn list<C: NamedCollection>(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> ApiResult<Vec<NamedRepresentation>> {
    let records = state.named(C::KIND).list(&caller).await?;
    Ok(ApiResponse::success(records))
}

pub async fn get<C: NamedCollection>(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> ApiResult<NamedRepresentation> {
    let id = parse_record_id(&id)?;
    let record = state.named(C::KIND).retrieve(&caller, id).await?;
    Ok(ApiResponse::success(record))
}

pub async fn patch<C: NamedCollection>(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<NamedRepresentation> {
    let id = parse_record_id(&id)?;
    let Json(payload) = payload?;
    let record = state.named(C::KIND).partial_update(&caller, id, &payload).await?;
    Ok(ApiResponse::success(record))
}

pub async fn put<C: NamedCollection>(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<NamedRepresentation> {
    let id = parse_record_id(&id)?;
    let Json(payload) = payload?;
    let record = state.named(C::KIND).full_update(&caller, id, &payload).await?;
    Ok(ApiResponse::success(record))
}

pub async fn delete<C: NamedCollection>(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_record_id(&id)?;
    state.named(C::KIND).delete(&caller, id).await?;
    Ok(ApiResponse::no_content())
}
