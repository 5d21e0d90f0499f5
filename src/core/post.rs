//! Posts and comments.
//!
//! Posts are addressed by slug. Only a post's author may edit or delete it, and the
//! same holds for comments; anyone else gets [`Error::Forbidden`].

use crate::{
    entities::{Comment, Post, comment, post},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Publishes a post by `author_id`.
#[instrument(skip(db, body))]
pub async fn create_post(
    db: &DatabaseConnection,
    author_id: &str,
    title: &str,
    body: &str,
) -> Result<post::Model> {
    let title = super::require_text("title", title)?;
    let body = super::require_text("body", body)?;

    let now = chrono::Utc::now();
    let post = post::ActiveModel {
        id: Set(super::new_id()),
        author_id: Set(author_id.to_string()),
        slug: Set(super::slug::generate(&title)),
        title: Set(title),
        body: Set(body),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    info!(post_id = %post.id, slug = %post.slug, "Post created");
    Ok(post)
}

/// Finds a post by id, failing with [`Error::NotFound`] on a miss.
pub async fn get_post(db: &DatabaseConnection, post_id: &str) -> Result<post::Model> {
    Post::find_by_id(post_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("post", post_id))
}

/// Finds a post by slug.
pub async fn get_post_by_slug(db: &DatabaseConnection, slug: &str) -> Result<Option<post::Model>> {
    Post::find()
        .filter(post::Column::Slug.eq(slug))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists posts, newest first.
pub async fn list_posts(db: &DatabaseConnection) -> Result<Vec<post::Model>> {
    Post::find()
        .order_by_desc(post::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Changes title and/or body of a post written by `caller_id`. The slug is kept.
#[instrument(skip(db, body))]
pub async fn update_post(
    db: &DatabaseConnection,
    post_id: &str,
    caller_id: &str,
    title: Option<&str>,
    body: Option<&str>,
) -> Result<post::Model> {
    let existing = get_post(db, post_id).await?;
    super::require_owner(&existing.author_id, caller_id, "post")?;
    let title = title.map(|t| super::require_text("title", t)).transpose()?;
    let body = body.map(|b| super::require_text("body", b)).transpose()?;

    let mut model: post::ActiveModel = existing.into();
    if let Some(title) = title {
        model.title = Set(title);
    }
    if let Some(body) = body {
        model.body = Set(body);
    }
    model.updated_at = Set(chrono::Utc::now());
    model.update(db).await.map_err(Into::into)
}

/// Deletes a post written by `caller_id`. Its comments are left in place.
pub async fn delete_post(db: &DatabaseConnection, post_id: &str, caller_id: &str) -> Result<()> {
    let existing = get_post(db, post_id).await?;
    super::require_owner(&existing.author_id, caller_id, "post")?;
    existing.delete(db).await?;
    Ok(())
}

/// Adds a comment by `author_id` to an existing post.
#[instrument(skip(db, body))]
pub async fn add_comment(
    db: &DatabaseConnection,
    post_id: &str,
    author_id: &str,
    body: &str,
) -> Result<comment::Model> {
    let body = super::require_text("body", body)?;
    get_post(db, post_id).await?;

    let now = chrono::Utc::now();
    comment::ActiveModel {
        id: Set(super::new_id()),
        post_id: Set(post_id.to_string()),
        author_id: Set(author_id.to_string()),
        body: Set(body),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Lists a post's comments in the order they were written.
pub async fn get_comments_by_post(
    db: &DatabaseConnection,
    post_id: &str,
) -> Result<Vec<comment::Model>> {
    Comment::find()
        .filter(comment::Column::PostId.eq(post_id))
        .order_by_asc(comment::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

async fn get_comment(db: &DatabaseConnection, comment_id: &str) -> Result<comment::Model> {
    Comment::find_by_id(comment_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("comment", comment_id))
}

/// Rewrites a comment; only its author may do so.
pub async fn update_comment(
    db: &DatabaseConnection,
    comment_id: &str,
    caller_id: &str,
    body: &str,
) -> Result<comment::Model> {
    let existing = get_comment(db, comment_id).await?;
    super::require_owner(&existing.author_id, caller_id, "comment")?;
    let body = super::require_text("body", body)?;

    let mut model: comment::ActiveModel = existing.into();
    model.body = Set(body);
    model.updated_at = Set(chrono::Utc::now());
    model.update(db).await.map_err(Into::into)
}

/// Deletes a comment; only its author may do so.
pub async fn delete_comment(
    db: &DatabaseConnection,
    comment_id: &str,
    caller_id: &str,
) -> Result<()> {
    let existing = get_comment(db, comment_id).await?;
    super::require_owner(&existing.author_id, caller_id, "comment")?;
    existing.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_post_lifecycle() -> Result<()> {
        let db = setup_test_db().await?;
        let post = create_post(&db, "author", "My First 10K!", "It hurt.").await?;
        assert!(post.slug.starts_with("my-first-10k-"));

        let by_slug = get_post_by_slug(&db, &post.slug).await?.unwrap();
        assert_eq!(by_slug, post);

        assert!(matches!(
            update_post(&db, &post.id, "other", Some("Hijacked"), None).await,
            Err(Error::Forbidden { .. })
        ));
        let updated = update_post(&db, &post.id, "author", None, Some("It hurt a lot.")).await?;
        assert_eq!(updated.title, "My First 10K!");
        assert_eq!(updated.body, "It hurt a lot.");

        delete_post(&db, &post.id, "author").await?;
        assert!(list_posts(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_comment_ownership() -> Result<()> {
        let db = setup_test_db().await?;
        let post = create_post(&db, "author", "Race day", "Results inside").await?;
        let comment = add_comment(&db, &post.id, "fan", "Congrats!").await?;

        assert!(matches!(
            update_comment(&db, &comment.id, "author", "edited").await,
            Err(Error::Forbidden { .. })
        ));
        assert!(matches!(
            delete_comment(&db, &comment.id, "author").await,
            Err(Error::Forbidden { .. })
        ));

        let edited = update_comment(&db, &comment.id, "fan", "Congrats, well run!").await?;
        assert_eq!(edited.body, "Congrats, well run!");
        assert_eq!(get_comments_by_post(&db, &post.id).await?, vec![edited]);

        delete_comment(&db, &comment.id, "fan").await?;
        assert!(get_comments_by_post(&db, &post.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_comment_on_missing_post() -> Result<()> {
        let db = setup_test_db().await?;
        let result = add_comment(&db, "missing", "fan", "Hello?").await;
        assert!(matches!(result, Err(Error::NotFound { entity: "post", .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_post_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(matches!(
            create_post(&db, "author", " ", "body").await,
            Err(Error::Validation { .. })
        ));
        Ok(())
    }
}
