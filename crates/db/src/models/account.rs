//! Producer and vocal accounts.
//!
//! Both tables share one shape. Accounts are created by the identity layer;
//! this crate only reads them, apart from test seeding.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use track1_core::types::{DbId, Timestamp};

/// A row from the `producers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Producer {
    pub id: DbId,
    pub login_id: String,
    pub name: String,
    pub profile_image: String,
    pub created_at: Timestamp,
}

/// A row from the `vocals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vocal {
    pub id: DbId,
    pub login_id: String,
    pub name: String,
    pub profile_image: String,
    pub created_at: Timestamp,
}

/// DTO for creating a producer or vocal account.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccount {
    pub login_id: String,
    pub name: String,
    pub profile_image: String,
}
