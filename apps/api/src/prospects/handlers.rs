use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Local;

use super::intake::intake;
use super::models::{IntakeResponse, Prospect, ProspectPatch, ProspectSubmission};
use super::validation::{validate_presence, validate_submission};
use crate::auth::Staff;
use crate::errors::AppError;
use crate::state::AppState;

fn prospect_not_found() -> AppError {
    AppError::NotFound("Prospect not found".to_string())
}

/// GET /api/prospects
pub async fn handle_list_prospects(
    _staff: Staff,
    State(state): State<AppState>,
) -> Result<Json<Vec<Prospect>>, AppError> {
    let prospects = state.store.list_prospects().await?;
    Ok(Json(prospects))
}

/// GET /api/prospects/:id
pub async fn handle_get_prospect(
    _staff: Staff,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Prospect>, AppError> {
    let prospect = state
        .store
        .find_prospect_by_id(id)
        .await?
        .ok_or_else(prospect_not_found)?;
    Ok(Json(prospect))
}

/// POST /api/prospects
/// Public intake; answers with the minimal projection plus the notification
/// message id on a true creation.
pub async fn handle_create_prospect(
    State(state): State<AppState>,
    Json(submission): Json<ProspectSubmission>,
) -> Result<Json<IntakeResponse>, AppError> {
    let validated = validate_submission(submission)?;
    let today = Local::now().date_naive();
    let outcome = intake(
        state.store.as_ref(),
        state.notifier.as_ref(),
        validated,
        today,
    )
    .await?;
    Ok(Json(outcome.to_minimal()))
}

/// POST /api/prospects/form
/// Public intake for the embedded form; same workflow, full-row projection.
pub async fn handle_create_prospect_form(
    State(state): State<AppState>,
    Json(submission): Json<ProspectSubmission>,
) -> Result<Json<Prospect>, AppError> {
    let validated = validate_submission(submission)?;
    let today = Local::now().date_naive();
    let outcome = intake(
        state.store.as_ref(),
        state.notifier.as_ref(),
        validated,
        today,
    )
    .await?;
    Ok(Json(outcome.into_prospect()))
}

/// PUT /api/prospects/:id
pub async fn handle_update_prospect(
    _staff: Staff,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(submission): Json<ProspectSubmission>,
) -> Result<Json<Prospect>, AppError> {
    validate_presence(&submission)?;

    let patch = ProspectPatch::from(submission);
    let affected = state.store.update_prospect_fields(id, &patch).await?;
    if affected == 0 {
        return Err(prospect_not_found());
    }

    let updated = state
        .store
        .find_prospect_by_id(id)
        .await?
        .ok_or_else(prospect_not_found)?;
    Ok(Json(updated))
}

/// DELETE /api/prospects/:id
pub async fn handle_delete_prospect(
    _staff: Staff,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let affected = state.store.delete_prospect(id).await?;
    if affected == 0 {
        return Err(prospect_not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}
