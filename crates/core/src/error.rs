use crate::types::DbId;

/// The single domain error taxonomy shared by every crate.
///
/// Each variant maps to exactly one HTTP status in the api crate; messages
/// are taken from [`crate::messages`] where a fixed wording exists.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Invalid beat id: {0}")]
    InvalidBeatId(DbId),

    #[error("{entity} {id} does not belong to the acting user")]
    OwnershipMismatch { entity: &'static str, id: DbId },

    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("Storage delete failed: {0}")]
    StorageDelete(String),

    #[error("User not found: {0}")]
    UserNotFound(DbId),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
