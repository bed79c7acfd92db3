//! Profiles backing author names on reports and comments.
//!
//! A profile is upserted from the token's claims whenever a signed-in
//! user writes something, so list queries can join on it.

mod repository;

pub use repository::{PgProfileRepository, ProfileRepository};
