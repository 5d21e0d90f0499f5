//! Cause endpoints, including activity recording, purchases and cause leaderboards.

use super::{LeaderboardEntry, to_entries};
use crate::{
    api::{
        AppState,
        auth::CurrentUser,
        extract::{Json, Path},
    },
    core::{
        buyer,
        cause::{self, CauseChanges, NewCause},
        leaderboard,
        runner::{self, RecordActivity, Settlement},
    },
    entities::{cause::Model, cause_buyer, cause_runner},
    errors::{Error, Result},
};
use axum::{extract::State, http::StatusCode};
use serde::Deserialize;

/// Body of `POST /causes/{id}/buyers`.
#[derive(Debug, Deserialize)]
pub struct BuyRequest {
    /// Amount paid
    pub amount: f64,
}

/// Body of `PUT /runners/{id}/complete`.
#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    /// Elapsed time of the finished activity
    pub duration: String,
}

/// `POST /challenges/{id}/causes`
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(challenge_id): Path<String>,
    Json(body): Json<NewCause>,
) -> Result<(StatusCode, Json<Model>)> {
    let created = cause::create_cause(&*state.database, &challenge_id, &caller, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /challenges/{id}/causes`
pub async fn list_by_challenge(
    State(state): State<AppState>,
    Path(challenge_id): Path<String>,
) -> Result<Json<Vec<Model>>> {
    Ok(Json(
        cause::get_causes_by_challenge(&*state.database, &challenge_id).await?,
    ))
}

/// `GET /causes/{id}`
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Model>> {
    Ok(Json(cause::require_cause(&*state.database, &id).await?))
}

/// `GET /causes/slug/{slug}`
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Model>> {
    cause::get_cause_by_slug(&*state.database, &slug)
        .await?
        .map(Json)
        .ok_or_else(|| Error::not_found("cause", slug))
}

/// `PUT /causes/{id}`
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<String>,
    Json(body): Json<CauseChanges>,
) -> Result<Json<Model>> {
    Ok(Json(
        cause::update_cause(&*state.database, &id, &caller, body).await?,
    ))
}

/// `DELETE /causes/{id}`
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    cause::delete_cause(&*state.database, &id, &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /causes/{id}/runners` - records the caller's activity against the cause.
pub async fn record_activity(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(cause_id): Path<String>,
    Json(body): Json<RecordActivity>,
) -> Result<(StatusCode, Json<Settlement>)> {
    let settlement = runner::record_activity(&*state.database, &cause_id, &caller, body).await?;
    Ok((StatusCode::CREATED, Json(settlement)))
}

/// `GET /causes/{id}/runners`
pub async fn list_runners(
    State(state): State<AppState>,
    Path(cause_id): Path<String>,
) -> Result<Json<Vec<cause_runner::Model>>> {
    Ok(Json(
        runner::get_runners_by_cause(&*state.database, &cause_id).await?,
    ))
}

/// `PUT /runners/{id}/complete`
pub async fn complete_runner(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(runner_id): Path<String>,
    Json(body): Json<CompleteRequest>,
) -> Result<Json<cause_runner::Model>> {
    Ok(Json(
        runner::complete_runner(&*state.database, &runner_id, &caller, &body.duration).await?,
    ))
}

/// `GET /causes/{id}/leaderboard`
pub async fn leaderboard(
    State(state): State<AppState>,
    Path(cause_id): Path<String>,
) -> Result<Json<Vec<LeaderboardEntry>>> {
    let board = leaderboard::get_cause_leaderboard(&*state.database, &cause_id).await?;
    Ok(Json(to_entries(board, state.leaderboard_limit)))
}

/// `GET /leaderboard`
pub async fn global_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardEntry>>> {
    let board = leaderboard::get_leaderboard(&*state.database).await?;
    Ok(Json(to_entries(board, state.leaderboard_limit)))
}

/// `POST /causes/{id}/buyers`
pub async fn buy(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(cause_id): Path<String>,
    Json(body): Json<BuyRequest>,
) -> Result<(StatusCode, Json<cause_buyer::Model>)> {
    let purchase = buyer::buy_cause(&*state.database, &cause_id, &caller, body.amount).await?;
    Ok((StatusCode::CREATED, Json(purchase)))
}

/// `GET /causes/{id}/buyers`
pub async fn list_buyers(
    State(state): State<AppState>,
    Path(cause_id): Path<String>,
) -> Result<Json<Vec<cause_buyer::Model>>> {
    Ok(Json(
        buyer::get_buyers_by_cause(&*state.database, &cause_id).await?,
    ))
}
