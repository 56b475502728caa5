use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::state::AppState;

use super::models::{MealShoppingGroup, ShoppingCategory};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/shopping/categories", get(categories))
        .route("/shopping/meals", get(meal_groups))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shopping/categories/:name/items/:id/toggle",
            post(toggle_in_category),
        )
        .route(
            "/shopping/meals/:name/items/:id/toggle",
            post(toggle_in_meal),
        )
}

#[instrument(skip(state))]
async fn categories(State(state): State<AppState>) -> Json<Vec<ShoppingCategory>> {
    Json(state.shopping.categories())
}

#[instrument(skip(state))]
async fn meal_groups(State(state): State<AppState>) -> Json<Vec<MealShoppingGroup>> {
    Json(state.shopping.meal_groups())
}

#[instrument(skip(state))]
async fn toggle_in_category(
    State(state): State<AppState>,
    Path((name, id)): Path<(String, Uuid)>,
) -> StatusCode {
    // Unknown category or item is a no-op, mirroring the checklist UI.
    state.shopping.toggle_item_in_category(&name, id);
    StatusCode::NO_CONTENT
}

#[instrument(skip(state))]
async fn toggle_in_meal(
    State(state): State<AppState>,
    Path((name, id)): Path<(String, Uuid)>,
) -> StatusCode {
    state.shopping.toggle_item_in_meal(&name, id);
    StatusCode::NO_CONTENT
}
