//! Access-token handling.
//!
//! Accounts and sign-in live in the identity service; this server only
//! validates the tokens it issues.

pub mod jwt;
