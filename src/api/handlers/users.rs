//! User endpoints.

use crate::{
    api::{
        AppState,
        extract::{Json, Path},
    },
    core::{runner, user},
    entities::{cause_runner, user::Model},
    errors::{Error, Result},
};
use axum::{extract::State, http::StatusCode};
use serde::Deserialize;

/// Body of `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// Unique handle
    pub username: String,
    /// Contact address
    pub email: String,
    /// Name shown publicly; defaults to the username
    #[serde(default)]
    pub display_name: String,
}

/// `POST /users`
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<Model>)> {
    let created = user::create_user(
        &*state.database,
        &body.username,
        &body.email,
        &body.display_name,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /users`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Model>>> {
    Ok(Json(user::list_users(&*state.database).await?))
}

/// `GET /users/{id}`
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Model>> {
    user::get_user_by_id(&*state.database, &id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::not_found("user", id))
}

/// `GET /users/{id}/runners` - every activity the user has recorded, newest first.
pub async fn list_runners(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<cause_runner::Model>>> {
    Ok(Json(
        runner::get_runners_by_owner(&*state.database, &id).await?,
    ))
}
