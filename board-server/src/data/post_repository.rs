use crate::domain::post::{NewPost, PostChanges};
use crate::domain::{DomainError, Post};
use crate::infrastructure::database::begin_repeatable_read;
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Row};

/// Data access for the `posts` table.
///
/// Every call is one atomic unit: it either fully applies or leaves storage
/// untouched.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Newest first: `created_at` descending, ties broken by `id` descending.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Post>, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError>;
    /// Stores the row under a freshly generated id and returns it as read back.
    async fn insert(&self, post: NewPost) -> Result<Post, DomainError>;
    /// Returns `None` when no row has the given id.
    async fn update_by_id(&self, id: i64, changes: PostChanges)
        -> Result<Option<Post>, DomainError>;
    /// Returns the number of removed rows.
    async fn delete_by_id(&self, id: i64) -> Result<u64, DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
}

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn post_from_row(row: &PgRow) -> Result<Post, sqlx::Error> {
    Ok(Post {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        author: row.try_get("author")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

async fn select_by_id(conn: &mut PgConnection, id: i64) -> Result<Option<Post>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, title, content, author, created_at, updated_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    row.as_ref().map(post_from_row).transpose()
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Post>, DomainError> {
        let mut tx = begin_repeatable_read(&self.pool).await?;

        let rows = sqlx::query(
            r#"
            SELECT id, title, content, author, created_at, updated_at
            FROM posts
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *tx)
        .await?;

        let posts = rows
            .iter()
            .map(post_from_row)
            .collect::<Result<Vec<Post>, sqlx::Error>>()?;

        tx.commit().await?;
        Ok(posts)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let mut tx = begin_repeatable_read(&self.pool).await?;
        let post = select_by_id(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(post)
    }

    async fn insert(&self, post: NewPost) -> Result<Post, DomainError> {
        let mut tx = begin_repeatable_read(&self.pool).await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO posts (title, content, author, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.author)
        .bind(post.created_at)
        .bind(post.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert post: {}", e);
            DomainError::from(e)
        })?;

        let stored = select_by_id(&mut *tx, id).await?.ok_or_else(|| {
            DomainError::InternalError(format!("Post {} vanished right after insert", id))
        })?;

        tx.commit().await?;
        Ok(stored)
    }

    async fn update_by_id(
        &self,
        id: i64,
        changes: PostChanges,
    ) -> Result<Option<Post>, DomainError> {
        let mut tx = begin_repeatable_read(&self.pool).await?;

        // GREATEST keeps updated_at monotonic if the wall clock steps back.
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET
                title = COALESCE($1, title),
                content = COALESCE($2, content),
                updated_at = GREATEST(updated_at, $3)
            WHERE id = $4
            "#,
        )
        .bind(changes.title)
        .bind(changes.content)
        .bind(changes.updated_at)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let post = select_by_id(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(post)
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, DomainError> {
        let mut tx = begin_repeatable_read(&self.pool).await?;

        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        let mut tx = begin_repeatable_read(&self.pool).await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(total)
    }
}
