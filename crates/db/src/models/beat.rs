//! Beat entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use track1_core::types::{DbId, Timestamp};

/// A row from the `beats` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Beat {
    pub id: DbId,
    pub title: String,
    pub category: Vec<String>,
    pub introduce: Option<String>,
    pub keyword: Vec<String>,
    pub beat_file: String,
    pub beat_image: String,
    pub producer_id: DbId,
    pub is_closed: bool,
    pub created_at: Timestamp,
}

/// DTO for inserting a beat together with its duration record.
///
/// `is_closed` is always `false` on insert.
#[derive(Debug, Clone)]
pub struct CreateBeat {
    pub producer_id: DbId,
    pub title: String,
    pub category: Vec<String>,
    pub introduce: Option<String>,
    pub keyword: Vec<String>,
    pub beat_file: String,
    pub beat_image: String,
    pub duration: f64,
}

/// Explicit field set for an owner's beat edit. `None` leaves a column as is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBeat {
    pub title: Option<String>,
    pub introduce: Option<String>,
    pub category: Option<Vec<String>>,
    pub keyword: Option<Vec<String>>,
}

impl UpdateBeat {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.introduce.is_none()
            && self.category.is_none()
            && self.keyword.is_none()
    }
}

/// The stored audio location of a beat.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeatLocation {
    pub id: DbId,
    pub beat_file: String,
}

/// A beat joined with its producer's name and cached duration, as used by
/// the listing queries.
#[derive(Debug, Clone, FromRow)]
pub struct BeatSummaryRow {
    pub id: DbId,
    pub beat_image: String,
    pub beat_file: String,
    pub title: String,
    pub keyword: Vec<String>,
    pub category: Vec<String>,
    pub producer_id: DbId,
    pub producer_name: String,
    pub duration: Option<f64>,
    pub is_closed: bool,
    pub created_at: Timestamp,
}
