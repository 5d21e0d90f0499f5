//! User business logic - profile records for callers identified upstream.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, SqlErr, prelude::*};
use tracing::instrument;

/// Creates a user with a unique, non-empty username.
///
/// # Errors
/// Returns [`Error::Validation`] for blank fields and [`Error::Conflict`] when the
/// username is taken.
#[instrument(skip(db))]
pub async fn create_user(
    db: &DatabaseConnection,
    username: &str,
    email: &str,
    display_name: &str,
) -> Result<user::Model> {
    let username = super::require_text("username", username)?;
    let email = super::require_text("email", email)?;
    if !email.contains('@') {
        return Err(Error::validation("email must contain '@'"));
    }
    let display_name = match display_name.trim() {
        "" => username.clone(),
        name => name.to_string(),
    };

    if get_user_by_username(db, &username).await?.is_some() {
        return Err(username_taken(&username));
    }

    let now = chrono::Utc::now();
    let user = user::ActiveModel {
        id: Set(super::new_id()),
        username: Set(username.clone()),
        email: Set(email),
        display_name: Set(display_name),
        created_at: Set(now),
        updated_at: Set(now),
    };
    // A concurrent create can pass the lookup above and hit the unique index instead
    user.insert(db).await.map_err(|err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => username_taken(&username),
        _ => err.into(),
    })
}

fn username_taken(username: &str) -> Error {
    Error::Conflict {
        message: format!("username '{username}' is already taken"),
    }
}

/// Finds a user by id.
pub async fn get_user_by_id(db: &DatabaseConnection, user_id: &str) -> Result<Option<user::Model>> {
    User::find_by_id(user_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a user by username.
pub async fn get_user_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists every user alphabetically by username.
pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<user::Model>> {
    User::find()
        .order_by_asc(user::Column::Username)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_and_get_user() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_user(&db, " ada ", "ada@example.com", "").await?;

        assert_eq!(user.username, "ada");
        assert_eq!(user.display_name, "ada");

        let found = get_user_by_id(&db, &user.id).await?.unwrap();
        assert_eq!(found, user);
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() -> Result<()> {
        let db = setup_test_db().await?;
        create_user(&db, "ada", "ada@example.com", "Ada").await?;

        let result = create_user(&db, "ada", "other@example.com", "Other").await;
        assert!(matches!(result, Err(Error::Conflict { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_username_conflicts() -> Result<()> {
        let db = setup_test_db().await?;
        let (first, second) = tokio::join!(
            create_user(&db, "grace", "grace@example.com", ""),
            create_user(&db, "grace", "hopper@example.com", ""),
        );

        let results = [first, second];
        assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
        assert!(
            results
                .iter()
                .any(|result| matches!(result, Err(Error::Conflict { .. })))
        );
        assert_eq!(list_users(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_user_validation() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(matches!(
            create_user(&db, "  ", "a@b.c", "").await,
            Err(Error::Validation { .. })
        ));
        assert!(matches!(
            create_user(&db, "bob", "not-an-email", "").await,
            Err(Error::Validation { .. })
        ));
        assert!(list_users(&db).await?.is_empty());
        Ok(())
    }
}
