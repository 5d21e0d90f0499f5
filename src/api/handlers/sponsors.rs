//! Sponsor pledge endpoints.

use crate::{
    api::{
        AppState,
        auth::CurrentUser,
        extract::{Json, Path},
    },
    core::sponsor::{self, PledgeChanges, PledgeTerms},
    entities::{sponsor_cause, sponsor_challenge},
    errors::Result,
};
use axum::{extract::State, http::StatusCode};

/// `POST /challenges/{id}/sponsors`
pub async fn create_for_challenge(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(challenge_id): Path<String>,
    Json(terms): Json<PledgeTerms>,
) -> Result<(StatusCode, Json<sponsor_challenge::Model>)> {
    let pledge =
        sponsor::create_challenge_pledge(&*state.database, &challenge_id, &caller, terms).await?;
    Ok((StatusCode::CREATED, Json(pledge)))
}

/// `GET /challenges/{id}/sponsors`
pub async fn list_for_challenge(
    State(state): State<AppState>,
    Path(challenge_id): Path<String>,
) -> Result<Json<Vec<sponsor_challenge::Model>>> {
    Ok(Json(
        sponsor::list_challenge_pledges(&*state.database, &challenge_id).await?,
    ))
}

/// `POST /causes/{id}/sponsors`
pub async fn create_for_cause(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(cause_id): Path<String>,
    Json(terms): Json<PledgeTerms>,
) -> Result<(StatusCode, Json<sponsor_cause::Model>)> {
    let pledge = sponsor::create_cause_pledge(&*state.database, &cause_id, &caller, terms).await?;
    Ok((StatusCode::CREATED, Json(pledge)))
}

/// `GET /causes/{id}/sponsors`
pub async fn list_for_cause(
    State(state): State<AppState>,
    Path(cause_id): Path<String>,
) -> Result<Json<Vec<sponsor_cause::Model>>> {
    Ok(Json(
        sponsor::list_cause_pledges(&*state.database, &cause_id).await?,
    ))
}

/// `PUT /sponsors/challenges/{id}`
pub async fn update_challenge_pledge(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(pledge_id): Path<String>,
    Json(changes): Json<PledgeChanges>,
) -> Result<Json<sponsor_challenge::Model>> {
    Ok(Json(
        sponsor::update_challenge_pledge(&*state.database, &pledge_id, &caller, changes).await?,
    ))
}

/// `DELETE /sponsors/challenges/{id}`
pub async fn delete_challenge_pledge(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(pledge_id): Path<String>,
) -> Result<StatusCode> {
    sponsor::delete_challenge_pledge(&*state.database, &pledge_id, &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /sponsors/causes/{id}`
pub async fn update_cause_pledge(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(pledge_id): Path<String>,
    Json(changes): Json<PledgeChanges>,
) -> Result<Json<sponsor_cause::Model>> {
    Ok(Json(
        sponsor::update_cause_pledge(&*state.database, &pledge_id, &caller, changes).await?,
    ))
}

/// `DELETE /sponsors/causes/{id}`
pub async fn delete_cause_pledge(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(pledge_id): Path<String>,
) -> Result<StatusCode> {
    sponsor::delete_cause_pledge(&*state.database, &pledge_id, &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}
