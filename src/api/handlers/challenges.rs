//! Challenge endpoints.

use super::{LeaderboardEntry, to_entries};
use crate::{
    api::{
        AppState,
        auth::CurrentUser,
        extract::{Json, Path, Query},
    },
    core::{
        challenge::{self, ChallengeChanges, NewChallenge},
        leaderboard,
        report::{self, ChallengeReport},
    },
    entities::challenge::Model,
    errors::{Error, Result},
};
use axum::{extract::State, http::StatusCode};
use serde::Deserialize;

/// Query string of `GET /challenges`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Only challenges created by this user
    pub owner: Option<String>,
    /// Only challenges whose name contains this text
    pub q: Option<String>,
}

/// `POST /challenges`
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Json(body): Json<NewChallenge>,
) -> Result<(StatusCode, Json<Model>)> {
    let created = challenge::create_challenge(&*state.database, &caller, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /challenges`
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Model>>> {
    let db = &*state.database;
    let challenges = match (query.owner, query.q) {
        (Some(owner), _) => challenge::list_challenges_by_owner(db, &owner).await?,
        (None, Some(term)) => challenge::search_challenges(db, &term).await?,
        (None, None) => challenge::list_challenges(db).await?,
    };
    Ok(Json(challenges))
}

/// `GET /challenges/{id}`
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Model>> {
    Ok(Json(challenge::require_challenge(&*state.database, &id).await?))
}

/// `GET /challenges/slug/{slug}`
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Model>> {
    challenge::get_challenge_by_slug(&*state.database, &slug)
        .await?
        .map(Json)
        .ok_or_else(|| Error::not_found("challenge", slug))
}

/// `PUT /challenges/{id}`
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<String>,
    Json(body): Json<ChallengeChanges>,
) -> Result<Json<Model>> {
    Ok(Json(
        challenge::update_challenge(&*state.database, &id, &caller, body).await?,
    ))
}

/// `DELETE /challenges/{id}`
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    challenge::delete_challenge(&*state.database, &id, &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /challenges/{id}/report`
pub async fn report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ChallengeReport>> {
    Ok(Json(
        report::generate_challenge_report(&*state.database, &id).await?,
    ))
}

/// `GET /challenges/{id}/leaderboard`
pub async fn leaderboard(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<LeaderboardEntry>>> {
    challenge::require_challenge(&*state.database, &id).await?;
    let board = leaderboard::get_challenge_leaderboard(&*state.database, &id).await?;
    Ok(Json(to_entries(board, state.leaderboard_limit)))
}

/// `GET /challenges/{id}/winners`
pub async fn winners(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<LeaderboardEntry>>> {
    let winners = leaderboard::get_challenge_winners(&*state.database, &id).await?;
    Ok(Json(to_entries(winners, usize::MAX)))
}
