//! Repository for the append-only `vocal_orders` log.

use sqlx::{PgConnection, PgPool};
use track1_core::types::DbId;

use crate::models::vocal_order::{CreateVocalOrder, VocalOrder};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, vocal_id, order_standard_table_name, order_standard_table_id, created_at";

/// Appends and reads vocal order entries. Entries are never updated.
pub struct VocalOrderRepo;

impl VocalOrderRepo {
    /// Append an entry inside the caller's transaction.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateVocalOrder,
    ) -> Result<VocalOrder, sqlx::Error> {
        let query = format!(
            "INSERT INTO vocal_orders (vocal_id, order_standard_table_name, order_standard_table_id) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VocalOrder>(&query)
            .bind(input.vocal_id)
            .bind(&input.order_standard_table_name)
            .bind(input.order_standard_table_id)
            .fetch_one(conn)
            .await
    }

    /// List a vocal's entries, newest first.
    pub async fn list_for_vocal(
        pool: &PgPool,
        vocal_id: DbId,
    ) -> Result<Vec<VocalOrder>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vocal_orders WHERE vocal_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, VocalOrder>(&query)
            .bind(vocal_id)
            .fetch_all(pool)
            .await
    }
}
