pub mod seaorm;

pub use seaorm::SeaOrmLikedSongsRepository;
