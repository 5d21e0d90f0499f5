//! HTTP layer - axum router, handlers, and request context.
//!
//! Handlers translate requests into calls on [`crate::core`] and serialize the results.
//! Caller identity comes from an upstream auth component via the `x-user-id` header.

/// Caller identity extraction
pub mod auth;
/// Error to HTTP response mapping
pub mod error;
/// Extractors that reject with the crate error type
pub mod extract;
/// Route handlers grouped by resource
pub mod handlers;

use axum::{
    Router,
    routing::{get, post, put},
};
use extract::Json;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared data available to all handlers.
/// This structure holds the database connection and the settings handlers need.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all database operations
    pub database: Arc<DatabaseConnection>,
    /// Maximum number of entries returned by leaderboard endpoints
    pub leaderboard_limit: usize,
}

impl AppState {
    /// Creates a new `AppState` with the given database connection.
    #[must_use]
    pub fn new(database: DatabaseConnection, leaderboard_limit: usize) -> Self {
        Self {
            database: Arc::new(database),
            leaderboard_limit,
        }
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Builds the application router with every route mounted.
pub fn create_router(state: AppState) -> Router {
    use handlers::{causes, challenges, posts, sponsors, users};

    Router::new()
        .route("/health", get(health))
        .route("/users", post(users::create).get(users::list))
        .route("/users/{id}", get(users::get))
        .route("/users/{id}/runners", get(users::list_runners))
        .route(
            "/challenges",
            post(challenges::create).get(challenges::list),
        )
        .route("/challenges/slug/{slug}", get(challenges::get_by_slug))
        .route(
            "/challenges/{id}",
            get(challenges::get)
                .put(challenges::update)
                .delete(challenges::delete),
        )
        .route("/challenges/{id}/report", get(challenges::report))
        .route("/challenges/{id}/leaderboard", get(challenges::leaderboard))
        .route("/challenges/{id}/winners", get(challenges::winners))
        .route(
            "/challenges/{id}/causes",
            post(causes::create).get(causes::list_by_challenge),
        )
        .route(
            "/challenges/{id}/sponsors",
            post(sponsors::create_for_challenge).get(sponsors::list_for_challenge),
        )
        .route("/causes/slug/{slug}", get(causes::get_by_slug))
        .route(
            "/causes/{id}",
            get(causes::get).put(causes::update).delete(causes::delete),
        )
        .route(
            "/causes/{id}/runners",
            post(causes::record_activity).get(causes::list_runners),
        )
        .route("/causes/{id}/leaderboard", get(causes::leaderboard))
        .route(
            "/causes/{id}/buyers",
            post(causes::buy).get(causes::list_buyers),
        )
        .route(
            "/causes/{id}/sponsors",
            post(sponsors::create_for_cause).get(sponsors::list_for_cause),
        )
        .route("/runners/{id}/complete", put(causes::complete_runner))
        .route("/leaderboard", get(causes::global_leaderboard))
        .route(
            "/sponsors/challenges/{id}",
            put(sponsors::update_challenge_pledge).delete(sponsors::delete_challenge_pledge),
        )
        .route(
            "/sponsors/causes/{id}",
            put(sponsors::update_cause_pledge).delete(sponsors::delete_cause_pledge),
        )
        .route("/posts", post(posts::create).get(posts::list))
        .route("/posts/slug/{slug}", get(posts::get_by_slug))
        .route(
            "/posts/{id}",
            get(posts::get).put(posts::update).delete(posts::delete),
        )
        .route(
            "/posts/{id}/comments",
            post(posts::add_comment).get(posts::list_comments),
        )
        .route(
            "/comments/{id}",
            put(posts::update_comment).delete(posts::delete_comment),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::Result, test_utils::setup_test_db};

    #[tokio::test]
    async fn test_state_clones_share_connection() -> Result<()> {
        let state = AppState::new(setup_test_db().await?, 25);
        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.database, &cloned.database));
        assert_eq!(cloned.leaderboard_limit, 25);
        Ok(())
    }
}
