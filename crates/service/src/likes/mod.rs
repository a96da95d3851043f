//! Likes module: three-layer architecture (domain, repository, service).

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{LikeOutcome, LikedSongsRecord};
pub use repository::LikedSongsRepository;
pub use service::LikesService;
