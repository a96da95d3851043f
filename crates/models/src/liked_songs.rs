use sea_orm::{entity::prelude::*, ActiveValue::NotSet, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::song_ids::SongIdsCodec;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "liked_songs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: String,
    #[sea_orm(column_type = "Text")]
    pub liked_song_ids: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Decoded song id list.
    pub fn song_ids(&self) -> Result<Vec<String>, ModelError> {
        SongIdsCodec::new().decode(&self.liked_song_ids)
    }
}

/// First row for the user; the lowest id wins when several exist.
pub async fn find_by_user(db: &DatabaseConnection, user_id: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_asc(Column::Id)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn create(db: &DatabaseConnection, user_id: &str, song_ids: &[String]) -> Result<Model, ModelError> {
    if user_id.trim().is_empty() {
        return Err(ModelError::Validation("user_id must not be blank".into()));
    }
    let encoded = SongIdsCodec::new().encode(Some(song_ids))?;
    let am = ActiveModel {
        id: NotSet,
        user_id: Set(user_id.to_string()),
        liked_song_ids: Set(encoded),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

/// Overwrite both columns of an existing row.
pub async fn update(db: &DatabaseConnection, id: i32, user_id: &str, song_ids: &[String]) -> Result<Model, ModelError> {
    let encoded = SongIdsCodec::new().encode(Some(song_ids))?;
    let mut found: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?
        .ok_or_else(|| ModelError::NotFound(format!("liked_songs record {id}")))?
        .into();
    found.user_id = Set(user_id.to_string());
    found.liked_song_ids = Set(encoded);
    found.update(db).await.map_err(|e| ModelError::Db(e.to_string()))
}
