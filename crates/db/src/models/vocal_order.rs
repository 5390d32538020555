//! Vocal order log entries.

use serde::Serialize;
use sqlx::FromRow;
use track1_core::types::{DbId, Timestamp};

/// Table name recorded when a vocal posts a comment.
pub const ORDER_TABLE_COMMENT: &str = "comment";

/// A row from the `vocal_orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocalOrder {
    pub id: DbId,
    pub vocal_id: DbId,
    pub order_standard_table_name: String,
    pub order_standard_table_id: DbId,
    pub created_at: Timestamp,
}

/// DTO for appending a vocal order entry.
#[derive(Debug, Clone)]
pub struct CreateVocalOrder {
    pub vocal_id: DbId,
    pub order_standard_table_name: String,
    pub order_standard_table_id: DbId,
}
