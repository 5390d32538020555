//! Repositories for the `producers` and `vocals` tables.

use sqlx::PgPool;
use track1_core::types::DbId;

use crate::models::account::{CreateAccount, Producer, Vocal};

/// Column list shared by both account tables.
const COLUMNS: &str = "id, login_id, name, profile_image, created_at";

/// Provides lookups for producer accounts.
pub struct ProducerRepo;

impl ProducerRepo {
    /// Insert a new producer, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAccount) -> Result<Producer, sqlx::Error> {
        let query = format!(
            "INSERT INTO producers (login_id, name, profile_image) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Producer>(&query)
            .bind(&input.login_id)
            .bind(&input.name)
            .bind(&input.profile_image)
            .fetch_one(pool)
            .await
    }

    /// Find a producer by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Producer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM producers WHERE id = $1");
        sqlx::query_as::<_, Producer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

/// Provides lookups for vocal accounts.
pub struct VocalRepo;

impl VocalRepo {
    /// Insert a new vocal, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAccount) -> Result<Vocal, sqlx::Error> {
        let query = format!(
            "INSERT INTO vocals (login_id, name, profile_image) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vocal>(&query)
            .bind(&input.login_id)
            .bind(&input.name)
            .bind(&input.profile_image)
            .fetch_one(pool)
            .await
    }

    /// Find a vocal by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Vocal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vocals WHERE id = $1");
        sqlx::query_as::<_, Vocal>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
