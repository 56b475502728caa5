use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

use super::dto::{CreateDishRequest, CreatedDishResponse};
use super::models::CustomDish;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dishes", get(list_dishes))
        .route("/dishes", post(create_dish))
        .route("/dishes/:id", delete(delete_dish))
}

#[instrument(skip(state))]
async fn list_dishes(State(state): State<AppState>) -> Json<Vec<CustomDish>> {
    Json(state.dishes.all())
}

#[instrument(skip(state, body))]
async fn create_dish(
    State(state): State<AppState>,
    Json(body): Json<CreateDishRequest>,
) -> Result<(StatusCode, Json<CreatedDishResponse>), AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::Validation("dish name must not be empty".into()));
    }
    let dish: CustomDish = body.into();
    let id = dish.id;
    state.dishes.add(dish).await?;
    Ok((StatusCode::CREATED, Json(CreatedDishResponse { id })))
}

#[instrument(skip(state))]
async fn delete_dish(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.dishes.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
