//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireProducer`] -- Requires the `producer` role and an existing producer row.
//! - [`rbac::RequireVocal`] -- Requires the `vocal` role and an existing vocal row.

pub mod auth;
pub mod rbac;
