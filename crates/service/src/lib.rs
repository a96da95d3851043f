//! Service layer for liked songs.
//! - Separates business logic from data access behind `LikedSongsRepository`.
//! - Reuses the entity and codec from the `models` crate.

pub mod errors;
pub mod likes;
#[cfg(test)]
pub mod test_support;
