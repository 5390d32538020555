//! Comment entity model and DTOs.
//!
//! A comment is a vocal's audio response to a beat.

use serde::Serialize;
use sqlx::FromRow;
use track1_core::types::{DbId, Timestamp};

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: DbId,
    pub beat_id: DbId,
    pub vocal_id: DbId,
    pub comment_file: String,
    pub content: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a comment together with its duration record.
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub beat_id: DbId,
    pub vocal_id: DbId,
    pub comment_file: String,
    pub content: Option<String>,
    pub duration: f64,
}

/// A comment joined with its vocal's name, profile image and cached duration.
#[derive(Debug, Clone, FromRow)]
pub struct CommentSummaryRow {
    pub id: DbId,
    pub vocal_id: DbId,
    pub comment_file: String,
    pub content: Option<String>,
    pub vocal_name: String,
    pub vocal_profile_image: String,
    pub duration: Option<f64>,
}

/// What remains of a comment after its row is deleted.
#[derive(Debug, Clone, FromRow)]
pub struct DeletedCommentRow {
    pub beat_id: DbId,
    pub comment_file: String,
}
