use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;

use super::document::PdfDocument;
use super::service::ImportReport;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/import", get(import_status))
        .route("/import", post(import_pdf))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

#[derive(Debug, Serialize)]
struct ImportStatus {
    loading: bool,
}

#[instrument(skip(state))]
async fn import_status(State(state): State<AppState>) -> Json<ImportStatus> {
    Json(ImportStatus {
        loading: state.importer.is_loading(),
    })
}

/// POST /import (multipart): field `file` carries the PDF; the optional
/// `date` field (YYYY-MM-DD) is the target day for meals without a date line
/// in the plan, defaulting to today.
#[instrument(skip(state, mp))]
async fn import_pdf(
    State(state): State<AppState>,
    mut mp: Multipart,
) -> Result<(StatusCode, Json<ImportReport>), AppError> {
    let mut file: Option<bytes::Bytes> = None;
    let mut date: Option<String> = None;
    while let Ok(Some(field)) = mp.next_field().await {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("file") => {
                file = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("invalid upload: {e}")))?,
                );
            }
            Some("date") => {
                date = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("invalid date field: {e}")))?,
                );
            }
            _ => {}
        }
    }
    let bytes = file.ok_or_else(|| AppError::Validation("file field is required".into()))?;
    let default_date = target_date(date.as_deref())?;

    // PDF text extraction is CPU-bound; keep it off the async workers.
    let doc = tokio::task::spawn_blocking(move || PdfDocument::from_bytes(&bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("import task failed: {e}")))??;

    let report = state.importer.import(&doc, default_date)?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// Target day for the import: the `date` field when present, today otherwise.
fn target_date(raw: Option<&str>) -> Result<time::Date, AppError> {
    match raw {
        Some(raw) => crate::diary::handlers::parse_date(raw),
        None => Ok(OffsetDateTime::now_utc().date()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn explicit_date_field_overrides_today() {
        let parsed = target_date(Some("2025-05-12")).expect("valid date");
        assert_eq!(parsed, date!(2025 - 05 - 12));
    }

    #[test]
    fn absent_date_field_falls_back_to_today() {
        let parsed = target_date(None).expect("today");
        assert_eq!(parsed, OffsetDateTime::now_utc().date());
    }

    #[test]
    fn malformed_date_field_is_rejected() {
        let err = target_date(Some("12.05.2025")).expect_err("wrong format");
        assert!(matches!(err, AppError::Validation(_)));
    }
}
