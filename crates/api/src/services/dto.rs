//! Request inputs and response shapes of the track service.
//!
//! Response DTOs serialize in camelCase, the wire format the clients expect.

use serde::Serialize;
use track1_core::tags::primary_category;
use track1_core::types::DbId;
use track1_db::models::account::Producer;
use track1_db::models::beat::{Beat, BeatSummaryRow};
use track1_db::models::comment::CommentSummaryRow;

/// Text fields of a beat upload. File locations are passed separately once
/// the objects have been stored.
#[derive(Debug, Clone, Default)]
pub struct NewBeat {
    pub title: String,
    pub category: Vec<String>,
    pub introduce: Option<String>,
    pub keyword: Vec<String>,
}

/// One entry of the beat listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeatSummary {
    pub beat_id: DbId,
    pub jacket_image: String,
    pub wav_file: String,
    pub title: String,
    pub producer_id: DbId,
    pub producer_name: String,
    pub keyword: Vec<String>,
    /// Primary category only.
    pub category: String,
    pub wav_file_length: Option<f64>,
}

impl From<BeatSummaryRow> for BeatSummary {
    fn from(row: BeatSummaryRow) -> Self {
        Self {
            beat_id: row.id,
            jacket_image: row.beat_image,
            wav_file: row.beat_file,
            title: row.title,
            producer_id: row.producer_id,
            producer_name: row.producer_name,
            category: primary_category(&row.category),
            keyword: row.keyword,
            wav_file_length: row.duration,
        }
    }
}

/// Full view of one beat, as shown on its detail page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeatDetail {
    pub beat_id: DbId,
    pub jacket_image: String,
    pub beat_wav_file: String,
    pub title: String,
    pub producer_id: DbId,
    pub producer_name: String,
    pub producer_profile_image: String,
    /// `""` when the beat has no description.
    pub introduce: String,
    pub keyword: Vec<String>,
    /// Primary category only.
    pub category: String,
    pub is_me: bool,
    pub wav_file_length: f64,
    pub is_closed: bool,
}

impl BeatDetail {
    pub fn new(beat: Beat, producer: Producer, viewer_id: DbId, wav_file_length: f64) -> Self {
        Self {
            beat_id: beat.id,
            jacket_image: beat.beat_image,
            beat_wav_file: beat.beat_file,
            title: beat.title,
            producer_id: producer.id,
            producer_name: producer.name,
            producer_profile_image: producer.profile_image,
            introduce: beat.introduce.unwrap_or_default(),
            category: primary_category(&beat.category),
            keyword: beat.keyword,
            is_me: viewer_id == producer.id,
            wav_file_length,
            is_closed: beat.is_closed,
        }
    }
}

/// One entry of a beat's comment listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSummary {
    pub comment_id: DbId,
    pub vocal_wav_file: String,
    pub vocal_name: String,
    pub vocal_profile_image: String,
    /// `""` when the comment has no text.
    pub comment: String,
    pub is_me: bool,
    pub vocal_wav_file_length: Option<f64>,
}

impl CommentSummary {
    pub fn new(row: CommentSummaryRow, viewer_id: DbId) -> Self {
        Self {
            comment_id: row.id,
            is_me: viewer_id == row.vocal_id,
            vocal_wav_file: row.comment_file,
            vocal_name: row.vocal_name,
            vocal_profile_image: row.vocal_profile_image,
            comment: row.content.unwrap_or_default(),
            vocal_wav_file_length: row.duration,
        }
    }
}

/// Result of a beat deletion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedBeat {
    pub producer_id: DbId,
}

/// Result of a comment deletion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedComment {
    pub vocal_id: DbId,
    pub beat_id: DbId,
}
