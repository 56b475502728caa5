use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;

use super::dto::{DayResponse, SlotMeal, SyncStatus};
use super::models::MealSlot;
use super::summary::DailySummary;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/diary/sync", get(sync_status))
        .route("/diary/:date", get(day))
        .route("/diary/:date/summary", get(day_summary))
        .route("/diary/:date/:slot", get(slot_meal))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/diary/sync", post(start_sync))
        .route("/diary/:date/:slot/toggle", post(toggle_eaten))
}

pub(crate) fn parse_date(raw: &str) -> Result<Date, AppError> {
    Date::parse(raw, DATE_FORMAT)
        .map_err(|_| AppError::Validation(format!("invalid date: {raw}, expected YYYY-MM-DD")))
}

fn parse_slot(raw: &str) -> Result<MealSlot, AppError> {
    raw.parse::<MealSlot>().map_err(AppError::Validation)
}

#[instrument(skip(state))]
async fn day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DayResponse>, AppError> {
    let date = parse_date(&date)?;
    Ok(Json(state.ledger.day_on(date).into()))
}

#[instrument(skip(state))]
async fn day_summary(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DailySummary>, AppError> {
    let date = parse_date(&date)?;
    Ok(Json(state.ledger.summary_on(date)))
}

#[instrument(skip(state))]
async fn slot_meal(
    State(state): State<AppState>,
    Path((date, slot)): Path<(String, String)>,
) -> Result<Json<SlotMeal>, AppError> {
    let date = parse_date(&date)?;
    let slot = parse_slot(&slot)?;
    let day: DayResponse = state.ledger.day_on(date).into();
    day.meals
        .into_iter()
        .find(|m| m.slot == slot)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no meal planned for {slot:?}")))
}

#[instrument(skip(state))]
async fn toggle_eaten(
    State(state): State<AppState>,
    Path((date, slot)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let date = parse_date(&date)?;
    let slot = parse_slot(&slot)?;
    // Toggling an empty slot is deliberately tolerated.
    state.ledger.toggle_eaten_on(date, slot);
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
async fn start_sync(State(state): State<AppState>) -> StatusCode {
    state.ledger.sync();
    StatusCode::ACCEPTED
}

#[instrument(skip(state))]
async fn sync_status(State(state): State<AppState>) -> Json<SyncStatus> {
    Json(SyncStatus {
        syncing: state.ledger.is_syncing(),
    })
}
