//! Well-known role name constants carried in the `role` claim of access tokens.

pub const ROLE_PRODUCER: &str = "producer";
pub const ROLE_VOCAL: &str = "vocal";
