//! Auth domain - bearer token issuing and verification
//!
//! Tokens are HS256 JWTs carrying the caller's user id and email. The email
//! is the owner key for stored verification records.

pub mod jwt;

pub use jwt::{Claims, Identity, JwtService};
