//! Post and comment endpoints.

use crate::{
    api::{
        AppState,
        auth::CurrentUser,
        extract::{Json, Path},
    },
    core::post,
    entities::{comment, post::Model},
    errors::{Error, Result},
};
use axum::{extract::State, http::StatusCode};
use serde::Deserialize;

/// Body of `POST /posts`.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    /// Title, also the slug source
    pub title: String,
    /// Post content
    pub body: String,
}

/// Body of `PUT /posts/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePostRequest {
    /// New title
    pub title: Option<String>,
    /// New content
    pub body: Option<String>,
}

/// Body of comment create and update requests.
#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    /// Comment text
    pub body: String,
}

/// `POST /posts`
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Json(body): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Model>)> {
    let created = post::create_post(&*state.database, &caller, &body.title, &body.body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /posts`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Model>>> {
    Ok(Json(post::list_posts(&*state.database).await?))
}

/// `GET /posts/{id}`
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Model>> {
    Ok(Json(post::get_post(&*state.database, &id).await?))
}

/// `GET /posts/slug/{slug}`
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Model>> {
    post::get_post_by_slug(&*state.database, &slug)
        .await?
        .map(Json)
        .ok_or_else(|| Error::not_found("post", slug))
}

/// `PUT /posts/{id}`
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<String>,
    Json(body): Json<UpdatePostRequest>,
) -> Result<Json<Model>> {
    let updated = post::update_post(
        &*state.database,
        &id,
        &caller,
        body.title.as_deref(),
        body.body.as_deref(),
    )
    .await?;
    Ok(Json(updated))
}

/// `DELETE /posts/{id}`
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    post::delete_post(&*state.database, &id, &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /posts/{id}/comments`
pub async fn add_comment(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(post_id): Path<String>,
    Json(body): Json<CommentRequest>,
) -> Result<(StatusCode, Json<comment::Model>)> {
    let created = post::add_comment(&*state.database, &post_id, &caller, &body.body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /posts/{id}/comments`
pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<Vec<comment::Model>>> {
    Ok(Json(
        post::get_comments_by_post(&*state.database, &post_id).await?,
    ))
}

/// `PUT /comments/{id}`
pub async fn update_comment(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(comment_id): Path<String>,
    Json(body): Json<CommentRequest>,
) -> Result<Json<comment::Model>> {
    Ok(Json(
        post::update_comment(&*state.database, &comment_id, &caller, &body.body).await?,
    ))
}

/// `DELETE /comments/{id}`
pub async fn delete_comment(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(comment_id): Path<String>,
) -> Result<StatusCode> {
    post::delete_comment(&*state.database, &comment_id, &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}
