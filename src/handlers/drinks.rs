//! Drink endpoints.
//!
//! - `GET /drinks` - short menu listing (public)
//! - `GET /drinks-detail` - full menu listing (`get:drinks-detail`)
//! - `POST /drinks` - add a drink (`post:drinks`)
//! - `PATCH /drinks/:id` - update a drink (`patch:drinks`)
//! - `DELETE /drinks/:id` - remove a drink (`delete:drinks`)
//!
//! Protected routes are wrapped by the authorization middleware; a handler
//! body only runs once the token is verified and carries the required
//! permission.

use crate::auth::Claims;
use crate::errors::ApiError;
use crate::models::{
    CreateDrinkRequest, DeleteResponse, DrinksResponse, LongDrink, ShortDrink,
    UpdateDrinkRequest,
};
use crate::repositories::DrinksRepository;
use crate::routes::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Extension, Json,
};
use std::sync::Arc;
use tracing::instrument;

/// Decode the `:id` path segment. A non-numeric id matches no drink, so
/// the rejection maps to 404.
fn decode_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    let Path(id) = path.map_err(|_| ApiError::NotFound)?;
    Ok(id)
}

/// Decode a JSON body into a typed request, mapping every failure
/// (wrong content type, malformed JSON, wrong shape) to 422.
fn decode_body<T: serde::de::DeserializeOwned>(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<T, ApiError> {
    let Json(value) = payload.map_err(|_| ApiError::Unprocessable)?;
    serde_json::from_value(value).map_err(|_| ApiError::Unprocessable)
}

/// Handler for GET /drinks
///
/// Returns the short projection of every drink on the menu. Public: no
/// ingredient names are exposed. 404 when the menu is empty.
#[instrument(skip_all, name = "menu.handlers.drinks.list")]
pub async fn list_drinks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DrinksResponse<ShortDrink>>, ApiError> {
    let drinks = DrinksRepository::list_all(&state.pool).await?;

    if drinks.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(DrinksResponse {
        success: true,
        drinks: drinks.iter().map(|d| d.short()).collect(),
    }))
}

/// Handler for GET /drinks-detail
///
/// Returns the long projection of every drink, including ingredient names.
/// Requires the `get:drinks-detail` permission. 404 when the menu is empty.
#[instrument(skip_all, name = "menu.handlers.drinks.list_detail")]
pub async fn list_drinks_detail(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DrinksResponse<LongDrink>>, ApiError> {
    let drinks = DrinksRepository::list_all(&state.pool).await?;

    if drinks.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(DrinksResponse {
        success: true,
        drinks: drinks.iter().map(|d| d.long()).collect(),
    }))
}

/// Handler for POST /drinks
///
/// Adds a new drink to the menu. Requires the `post:drinks` permission.
/// 422 on invalid input or duplicate title.
#[instrument(skip_all, name = "menu.handlers.drinks.create")]
pub async fn create_drink(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<DrinksResponse<LongDrink>>, ApiError> {
    let request: CreateDrinkRequest = decode_body(payload)?;

    request.validate().map_err(|reason| {
        tracing::debug!(target: "menu.handlers.drinks", reason, "Rejected create request");
        ApiError::Unprocessable
    })?;

    let drink = DrinksRepository::create(&state.pool, request.title.trim(), &request.recipe).await?;

    tracing::info!(
        target: "menu.handlers.drinks",
        drink_id = drink.id,
        claims = ?claims,
        "Drink added to the menu"
    );

    Ok(Json(DrinksResponse {
        success: true,
        drinks: vec![drink.long()],
    }))
}

/// Handler for PATCH /drinks/:id
///
/// Updates a drink's title and/or recipe. Requires the `patch:drinks`
/// permission. 404 when the id does not exist, 422 on invalid input.
#[instrument(skip_all, name = "menu.handlers.drinks.update")]
pub async fn update_drink(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<DrinksResponse<LongDrink>>, ApiError> {
    let id = decode_id(path)?;
    let request: UpdateDrinkRequest = decode_body(payload)?;

    request.validate().map_err(|reason| {
        tracing::debug!(target: "menu.handlers.drinks", reason, "Rejected update request");
        ApiError::Unprocessable
    })?;

    let drink = DrinksRepository::update(
        &state.pool,
        id,
        request.title.as_deref().map(str::trim),
        request.recipe.as_deref(),
    )
    .await?;

    Ok(Json(DrinksResponse {
        success: true,
        drinks: vec![drink.long()],
    }))
}

/// Handler for DELETE /drinks/:id
///
/// Removes a drink from the menu. Requires the `delete:drinks` permission.
/// 404 when the id does not exist.
#[instrument(skip_all, name = "menu.handlers.drinks.delete")]
pub async fn delete_drink(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = decode_id(path)?;
    DrinksRepository::delete(&state.pool, id).await?;

    Ok(Json(DeleteResponse {
        success: true,
        delete: id,
    }))
}
