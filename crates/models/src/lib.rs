//! Persistence models for the liked songs service.
//!
//! - `liked_songs`: SeaORM entity plus lookup/insert/update helpers.
//! - `song_ids`: codec between the in-memory id list and its stored text.
//! - `db`: connection and migration helpers.

pub mod errors;
pub mod db;
pub mod song_ids;
pub mod liked_songs;
