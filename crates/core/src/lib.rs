//! Shared building blocks for the Track-1 backend.
//!
//! Everything here is free of I/O except the ffprobe wrapper, so the db,
//! storage and api crates can all depend on it.

pub mod error;
pub mod ffprobe;
pub mod messages;
pub mod pagination;
pub mod roles;
pub mod tags;
pub mod types;
