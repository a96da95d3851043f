use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::likes::domain::LikedSongsRecord;
use crate::likes::repository::LikedSongsRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmLikedSongsRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmLikedSongsRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn to_record(m: models::liked_songs::Model) -> Result<LikedSongsRecord, ServiceError> {
    let liked_song_ids = m.song_ids()?;
    Ok(LikedSongsRecord { id: Some(m.id), user_id: m.user_id, liked_song_ids })
}

#[async_trait::async_trait]
impl LikedSongsRepository for SeaOrmLikedSongsRepository {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<LikedSongsRecord>, ServiceError> {
        models::liked_songs::find_by_user(&self.db, user_id)
            .await?
            .map(to_record)
            .transpose()
    }

    async fn save(&self, record: LikedSongsRecord) -> Result<LikedSongsRecord, ServiceError> {
        let saved = match record.id {
            None => models::liked_songs::create(&self.db, &record.user_id, &record.liked_song_ids).await?,
            Some(id) => {
                models::liked_songs::update(&self.db, id, &record.user_id, &record.liked_song_ids).await?
            }
        };
        to_record(saved)
    }
}
