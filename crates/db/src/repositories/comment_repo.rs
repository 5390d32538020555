//! Repository for the `comments` and `comment_file_durations` tables.

use sqlx::{PgConnection, PgPool};
use track1_core::types::DbId;

use crate::models::comment::{Comment, CommentSummaryRow, CreateComment, DeletedCommentRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, beat_id, vocal_id, comment_file, content, created_at";

/// Provides CRUD operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a comment and its duration record.
    ///
    /// Takes a connection so the caller can append related rows (the vocal
    /// order entry) in the same transaction.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateComment,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (beat_id, vocal_id, comment_file, content) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let comment = sqlx::query_as::<_, Comment>(&query)
            .bind(input.beat_id)
            .bind(input.vocal_id)
            .bind(&input.comment_file)
            .bind(&input.content)
            .fetch_optional(&mut *conn)
            .await?;

        let Some(comment) = comment else {
            return Ok(None);
        };

        sqlx::query("INSERT INTO comment_file_durations (comment_id, duration) VALUES ($1, $2)")
            .bind(comment.id)
            .bind(input.duration)
            .execute(&mut *conn)
            .await?;

        Ok(Some(comment))
    }

    /// Find a comment by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a beat's comments newest first, joined with the vocal's name,
    /// profile image and cached duration.
    pub async fn list_for_beat(
        pool: &PgPool,
        beat_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CommentSummaryRow>, sqlx::Error> {
        sqlx::query_as::<_, CommentSummaryRow>(
            "SELECT c.id, c.vocal_id, c.comment_file, c.content, \
                    v.name AS vocal_name, v.profile_image AS vocal_profile_image, \
                    d.duration \
             FROM comments c \
             JOIN vocals v ON v.id = c.vocal_id \
             LEFT JOIN comment_file_durations d ON d.comment_id = c.id \
             WHERE c.beat_id = $1 \
             ORDER BY c.created_at DESC, c.id DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(beat_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Delete a comment only if it belongs to `vocal_id`, returning its parent
    /// beat and stored file reference.
    pub async fn delete_owned(
        conn: &mut PgConnection,
        id: DbId,
        vocal_id: DbId,
    ) -> Result<Option<DeletedCommentRow>, sqlx::Error> {
        sqlx::query_as::<_, DeletedCommentRow>(
            "DELETE FROM comments WHERE vocal_id = $1 AND id = $2 \
             RETURNING beat_id, comment_file",
        )
        .bind(vocal_id)
        .bind(id)
        .fetch_optional(conn)
        .await
    }
}
