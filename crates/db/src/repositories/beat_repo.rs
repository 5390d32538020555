//! Repository for the `beats` and `beat_file_durations` tables.

use sqlx::{PgConnection, PgPool};
use track1_core::types::DbId;

use crate::models::beat::{Beat, BeatLocation, BeatSummaryRow, CreateBeat, UpdateBeat};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, category, introduce, keyword, beat_file, beat_image, \
                       producer_id, is_closed, created_at";

/// Select list for the listing joins. Durations are 1:1 with beats and
/// producers are 1:1 per beat, so the join never duplicates a beat.
const SUMMARY_SELECT: &str = "SELECT b.id, b.beat_image, b.beat_file, b.title, b.keyword, \
                              b.category, b.producer_id, p.name AS producer_name, \
                              d.duration, b.is_closed, b.created_at \
                              FROM beats b \
                              JOIN producers p ON p.id = b.producer_id \
                              LEFT JOIN beat_file_durations d ON d.beat_id = b.id";

/// Provides CRUD operations for beats.
pub struct BeatRepo;

impl BeatRepo {
    /// Insert a beat and its duration record in one transaction, returning
    /// the created beat.
    pub async fn create(pool: &PgPool, input: &CreateBeat) -> Result<Option<Beat>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO beats \
                (title, category, introduce, keyword, beat_file, beat_image, producer_id, is_closed) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, false) \
             RETURNING {COLUMNS}"
        );
        let beat = sqlx::query_as::<_, Beat>(&query)
            .bind(&input.title)
            .bind(&input.category)
            .bind(&input.introduce)
            .bind(&input.keyword)
            .bind(&input.beat_file)
            .bind(&input.beat_image)
            .bind(input.producer_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(beat) = beat else {
            return Ok(None);
        };

        sqlx::query("INSERT INTO beat_file_durations (beat_id, duration) VALUES ($1, $2)")
            .bind(beat.id)
            .bind(input.duration)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(beat))
    }

    /// Find a beat by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Beat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM beats WHERE id = $1");
        sqlx::query_as::<_, Beat>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a beat only if it belongs to `producer_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        producer_id: DbId,
    ) -> Result<Option<Beat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM beats WHERE id = $1 AND producer_id = $2");
        sqlx::query_as::<_, Beat>(&query)
            .bind(id)
            .bind(producer_id)
            .fetch_optional(pool)
            .await
    }

    /// Look up just the stored audio location of a beat.
    pub async fn find_location(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BeatLocation>, sqlx::Error> {
        sqlx::query_as::<_, BeatLocation>("SELECT id, beat_file FROM beats WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Check whether a beat exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM beats WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// List beats newest first with producer name and cached duration.
    pub async fn list_summaries(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BeatSummaryRow>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT} \
             ORDER BY b.created_at DESC, b.id DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, BeatSummaryRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List open beats whose categories overlap `categories`, newest first.
    pub async fn list_open_by_categories(
        pool: &PgPool,
        categories: &[String],
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BeatSummaryRow>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT} \
             WHERE b.category && $1 AND b.is_closed = false \
             ORDER BY b.created_at DESC, b.id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, BeatSummaryRow>(&query)
            .bind(categories)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Flip `is_closed`. Returns `None` if no row with the given `id` exists.
    pub async fn toggle_closed(pool: &PgPool, id: DbId) -> Result<Option<Beat>, sqlx::Error> {
        let query = format!(
            "UPDATE beats SET is_closed = NOT is_closed WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Beat>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Apply an owner's edit. Only non-`None` fields are applied.
    ///
    /// Returns `None` if the beat does not exist or belongs to another
    /// producer; the ownership check and the write are one statement.
    pub async fn update_owned(
        pool: &PgPool,
        id: DbId,
        producer_id: DbId,
        input: &UpdateBeat,
    ) -> Result<Option<Beat>, sqlx::Error> {
        let query = format!(
            "UPDATE beats SET \
                title = COALESCE($3, title), \
                introduce = COALESCE($4, introduce), \
                category = COALESCE($5, category), \
                keyword = COALESCE($6, keyword) \
             WHERE id = $1 AND producer_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Beat>(&query)
            .bind(id)
            .bind(producer_id)
            .bind(&input.title)
            .bind(&input.introduce)
            .bind(&input.category)
            .bind(&input.keyword)
            .fetch_optional(pool)
            .await
    }

    /// Delete a beat only if it belongs to `producer_id`, returning the
    /// deleted row so its stored files can be cleaned up.
    ///
    /// Takes a connection so callers can hold the delete open in a
    /// transaction while removing storage objects.
    pub async fn delete_owned(
        conn: &mut PgConnection,
        id: DbId,
        producer_id: DbId,
    ) -> Result<Option<Beat>, sqlx::Error> {
        let query =
            format!("DELETE FROM beats WHERE id = $1 AND producer_id = $2 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Beat>(&query)
            .bind(id)
            .bind(producer_id)
            .fetch_optional(conn)
            .await
    }

    /// Cached duration recorded at upload time.
    pub async fn find_duration(pool: &PgPool, beat_id: DbId) -> Result<Option<f64>, sqlx::Error> {
        let row: Option<(f64,)> =
            sqlx::query_as("SELECT duration FROM beat_file_durations WHERE beat_id = $1")
                .bind(beat_id)
                .fetch_optional(pool)
                .await?;
        Ok(row.map(|r| r.0))
    }
}
