//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - Input DTOs for inserts and patches
//! - Join rows used by the listing queries

pub mod account;
pub mod beat;
pub mod comment;
pub mod vocal_order;
