//! Request handlers for beats and comments.
//!
//! Handlers authenticate, read the request, and delegate to
//! [`crate::services::TrackService`]; errors map via [`crate::error::AppError`].

pub mod comments;
pub mod tracks;
pub mod upload;
