//! Beat and comment operations.
//!
//! [`TrackService`] owns every rule that spans more than one repository
//! call: tag validation, duration probing, ownership-gated writes, and
//! keeping storage objects in step with their rows.

use std::sync::Arc;

use sqlx::PgPool;
use track1_core::error::CoreError;
use track1_core::ffprobe::DurationProbe;
use track1_core::messages;
use track1_core::pagination::Page;
use track1_core::tags::validate_tags;
use track1_core::types::DbId;
use track1_db::models::beat::{Beat, BeatLocation, CreateBeat, UpdateBeat};
use track1_db::models::comment::{Comment, CreateComment};
use track1_db::models::vocal_order::{CreateVocalOrder, ORDER_TABLE_COMMENT};
use track1_db::repositories::{BeatRepo, CommentRepo, ProducerRepo, VocalOrderRepo};
use track1_storage::{object_key_from_location, MediaStore, StorageError};

use crate::config::MediaConfig;
use crate::error::{AppError, AppResult};
use crate::services::dto::{
    BeatDetail, BeatSummary, CommentSummary, DeletedBeat, DeletedComment, NewBeat,
};

const BEAT: &str = "Beat";
const COMMENT: &str = "Comment";
const PRODUCER: &str = "Producer";

/// Beat and comment business logic.
///
/// Cheap to share: every collaborator is behind an `Arc` or is a pool handle.
pub struct TrackService {
    pool: PgPool,
    store: Arc<dyn MediaStore>,
    probe: Arc<dyn DurationProbe>,
    media: MediaConfig,
}

impl TrackService {
    pub fn new(
        pool: PgPool,
        store: Arc<dyn MediaStore>,
        probe: Arc<dyn DurationProbe>,
        media: MediaConfig,
    ) -> Self {
        Self {
            pool,
            store,
            probe,
            media,
        }
    }

    pub fn media(&self) -> &MediaConfig {
        &self.media
    }

    // -----------------------------------------------------------------------
    // Beats
    // -----------------------------------------------------------------------

    /// Create a beat from already-stored files.
    ///
    /// The audio duration is probed from `audio_location` and stored with
    /// the beat in the same transaction.
    pub async fn create_beat(
        &self,
        owner_id: DbId,
        input: NewBeat,
        image_location: String,
        audio_location: String,
    ) -> AppResult<Beat> {
        validate_title(&input.title)?;
        validate_tags("category", &input.category)?;
        validate_tags("keyword", &input.keyword)?;

        let duration = self.probe.duration_secs(&audio_location).await?;

        let create = CreateBeat {
            producer_id: owner_id,
            title: input.title,
            category: input.category,
            introduce: input.introduce,
            keyword: input.keyword,
            beat_file: audio_location,
            beat_image: image_location,
            duration,
        };
        let beat = BeatRepo::create(&self.pool, &create)
            .await?
            .ok_or_else(|| CoreError::Persistence(messages::BEAT_UPLOAD_FAIL.into()))?;

        tracing::info!(beat_id = beat.id, producer_id = owner_id, duration, "Beat created");
        Ok(beat)
    }

    /// Stored audio location of a beat.
    pub async fn get_beat_location(&self, beat_id: DbId) -> AppResult<BeatLocation> {
        BeatRepo::find_location(&self.pool, beat_id)
            .await?
            .ok_or_else(|| not_found(BEAT, beat_id))
    }

    /// All beats, newest first.
    pub async fn list_beats(&self, page: Page) -> AppResult<Vec<BeatSummary>> {
        let rows = BeatRepo::list_summaries(&self.pool, page.limit, page.offset()).await?;
        Ok(rows.into_iter().map(BeatSummary::from).collect())
    }

    /// Open beats sharing at least one category with `categories`, newest
    /// first.
    pub async fn list_filtered_beats(
        &self,
        categories: &[String],
        page: Page,
    ) -> AppResult<Vec<BeatSummary>> {
        if categories.is_empty() {
            return Err(CoreError::Validation(messages::EMPTY_CATEGORY_FILTER.into()).into());
        }
        let rows =
            BeatRepo::list_open_by_categories(&self.pool, categories, page.limit, page.offset())
                .await?;
        Ok(rows.into_iter().map(BeatSummary::from).collect())
    }

    /// Detail view of a beat for `viewer_id`.
    ///
    /// The duration is probed live from the stored file rather than read
    /// from the cached record.
    pub async fn get_beat_detail(&self, beat_id: DbId, viewer_id: DbId) -> AppResult<BeatDetail> {
        let beat = BeatRepo::find_by_id(&self.pool, beat_id)
            .await?
            .ok_or_else(|| not_found(BEAT, beat_id))?;
        let producer = ProducerRepo::find_by_id(&self.pool, beat.producer_id)
            .await?
            .ok_or_else(|| not_found(PRODUCER, beat.producer_id))?;

        let duration = self.probe.duration_secs(&beat.beat_file).await?;
        Ok(BeatDetail::new(beat, producer, viewer_id, duration))
    }

    /// Flip a beat between open and closed.
    pub async fn toggle_beat_closed(&self, beat_id: DbId) -> AppResult<Beat> {
        let beat = BeatRepo::toggle_closed(&self.pool, beat_id)
            .await?
            .ok_or_else(|| not_found(BEAT, beat_id))?;

        tracing::info!(beat_id, is_closed = beat.is_closed, "Beat closed state toggled");
        Ok(beat)
    }

    /// Apply an owner's edit. Fields left `None` are unchanged; an empty
    /// edit only checks ownership and returns the current beat.
    pub async fn update_beat_info(
        &self,
        beat_id: DbId,
        owner_id: DbId,
        patch: UpdateBeat,
    ) -> AppResult<Beat> {
        if let Some(title) = &patch.title {
            validate_title(title)?;
        }
        if let Some(category) = &patch.category {
            validate_tags("category", category)?;
        }
        if let Some(keyword) = &patch.keyword {
            validate_tags("keyword", keyword)?;
        }

        let beat = if patch.is_empty() {
            BeatRepo::find_owned(&self.pool, beat_id, owner_id).await?
        } else {
            BeatRepo::update_owned(&self.pool, beat_id, owner_id, &patch).await?
        };
        let beat = beat.ok_or_else(|| ownership_mismatch(BEAT, beat_id))?;

        tracing::info!(beat_id, producer_id = owner_id, "Beat updated");
        Ok(beat)
    }

    /// Delete an owned beat together with its stored audio and jacket image.
    ///
    /// The row delete stays uncommitted until storage has confirmed the
    /// object deletes; a storage failure rolls it back. The shared default
    /// jacket image is never deleted.
    pub async fn delete_beat(&self, beat_id: DbId, owner_id: DbId) -> AppResult<DeletedBeat> {
        let mut tx = self.pool.begin().await?;

        let beat = BeatRepo::delete_owned(&mut tx, beat_id, owner_id)
            .await?
            .ok_or_else(|| ownership_mismatch(BEAT, beat_id))?;

        let bucket = &self.media.beat_bucket;
        let mut keys = Vec::with_capacity(2);
        keys.extend(self.object_key(&beat.beat_file, bucket));
        if beat.beat_image != self.media.default_jacket_image {
            keys.extend(self.object_key(&beat.beat_image, bucket));
        }

        // Dropping `tx` on error rolls the delete back.
        self.store.delete_many(bucket, &keys).await?;
        tx.commit().await?;

        tracing::info!(beat_id, producer_id = owner_id, objects = keys.len(), "Beat deleted");
        Ok(DeletedBeat {
            producer_id: beat.producer_id,
        })
    }

    // -----------------------------------------------------------------------
    // Comments
    // -----------------------------------------------------------------------

    /// Attach a vocal's recording to a beat and log it in the vocal's
    /// order history.
    pub async fn post_comment(
        &self,
        beat_id: DbId,
        vocal_id: DbId,
        content: Option<String>,
        audio_location: String,
    ) -> AppResult<Comment> {
        if !BeatRepo::exists(&self.pool, beat_id).await? {
            return Err(not_found(BEAT, beat_id));
        }

        let duration = self.probe.duration_secs(&audio_location).await?;

        let mut tx = self.pool.begin().await?;
        let create = CreateComment {
            beat_id,
            vocal_id,
            comment_file: audio_location,
            content,
            duration,
        };
        let comment = CommentRepo::create(&mut tx, &create)
            .await?
            .ok_or_else(|| CoreError::Persistence(messages::COMMENT_UPLOAD_FAIL.into()))?;

        VocalOrderRepo::create(
            &mut tx,
            &CreateVocalOrder {
                vocal_id,
                order_standard_table_name: ORDER_TABLE_COMMENT.to_string(),
                order_standard_table_id: comment.id,
            },
        )
        .await?;
        tx.commit().await?;

        tracing::info!(comment_id = comment.id, beat_id, vocal_id, duration, "Comment posted");
        Ok(comment)
    }

    /// Comments on a beat, newest first, marked with whether `viewer_id`
    /// wrote them.
    pub async fn list_comments(
        &self,
        beat_id: DbId,
        viewer_id: DbId,
        page: Page,
    ) -> AppResult<Vec<CommentSummary>> {
        if !BeatRepo::exists(&self.pool, beat_id).await? {
            return Err(CoreError::InvalidBeatId(beat_id).into());
        }

        let rows =
            CommentRepo::list_for_beat(&self.pool, beat_id, page.limit, page.offset()).await?;
        Ok(rows
            .into_iter()
            .map(|row| CommentSummary::new(row, viewer_id))
            .collect())
    }

    /// Delete an owned comment and its stored recording.
    ///
    /// A recording that is already gone from storage is skipped; any other
    /// storage failure rolls the row delete back.
    pub async fn delete_comment(
        &self,
        comment_id: DbId,
        vocal_id: DbId,
    ) -> AppResult<DeletedComment> {
        let mut tx = self.pool.begin().await?;

        let deleted = CommentRepo::delete_owned(&mut tx, comment_id, vocal_id)
            .await?
            .ok_or_else(|| ownership_mismatch(COMMENT, comment_id))?;

        let bucket = &self.media.wav_bucket;
        if let Some(key) = self.object_key(&deleted.comment_file, bucket) {
            // HeadObject may answer 403 for a missing key; report as a failed delete.
            let present = self.store.exists(bucket, &key).await.map_err(|err| {
                StorageError::Delete {
                    bucket: bucket.clone(),
                    message: err.to_string(),
                }
            })?;
            if present {
                self.store.delete(bucket, &key).await?;
            } else {
                tracing::warn!(comment_id, bucket = %bucket, key = %key, "Comment file already missing from storage");
            }
        }
        tx.commit().await?;

        tracing::info!(comment_id, beat_id = deleted.beat_id, vocal_id, "Comment deleted");
        Ok(DeletedComment {
            vocal_id,
            beat_id: deleted.beat_id,
        })
    }

    /// Storage key behind a persisted location, or `None` (logged) when the
    /// location points somewhere other than `bucket`.
    fn object_key(&self, location: &str, bucket: &str) -> Option<String> {
        let key = object_key_from_location(location, bucket);
        if key.is_none() {
            tracing::warn!(location, bucket, "Stored location is outside the bucket, skipping");
        }
        key
    }
}

fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("'title' must not be blank".into()));
    }
    Ok(())
}

fn not_found(entity: &'static str, id: DbId) -> AppError {
    CoreError::NotFound { entity, id }.into()
}

fn ownership_mismatch(entity: &'static str, id: DbId) -> AppError {
    CoreError::OwnershipMismatch { entity, id }.into()
}
