//! Business logic sitting between the HTTP handlers and the repositories.

pub mod dto;
pub mod track_service;

pub use track_service::TrackService;
