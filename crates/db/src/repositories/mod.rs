//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Writes that must share a
//! transaction with other work take `&mut PgConnection` instead.

pub mod account_repo;
pub mod beat_repo;
pub mod comment_repo;
pub mod vocal_order_repo;

pub use account_repo::{ProducerRepo, VocalRepo};
pub use beat_repo::BeatRepo;
pub use comment_repo::CommentRepo;
pub use vocal_order_repo::VocalOrderRepo;
