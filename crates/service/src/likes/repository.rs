use async_trait::async_trait;

use super::domain::LikedSongsRecord;
use crate::errors::ServiceError;

/// Repository abstraction for liked songs persistence.
#[async_trait]
pub trait LikedSongsRepository: Send + Sync {
    /// Exact match on `user_id`; the earliest stored record wins.
    async fn find_by_user(&self, user_id: &str) -> Result<Option<LikedSongsRecord>, ServiceError>;

    /// Insert when `record.id` is `None`, otherwise overwrite the stored record
    /// with that id, `user_id` included. Inserting a blank `user_id` fails
    /// with `ModelError::Validation`.
    async fn save(&self, record: LikedSongsRecord) -> Result<LikedSongsRecord, ServiceError>;
}

/// Process-local repository, used by tests and when no database is configured.
pub mod memory {
    use super::*;
    use models::errors::ModelError;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct State {
        rows: Vec<LikedSongsRecord>,
        last_id: i32,
    }

    #[derive(Default)]
    pub struct InMemoryLikedSongsRepository {
        state: Mutex<State>,
    }

    impl InMemoryLikedSongsRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of stored records.
        pub async fn len(&self) -> usize {
            self.state.lock().await.rows.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.len().await == 0
        }
    }

    #[async_trait]
    impl LikedSongsRepository for InMemoryLikedSongsRepository {
        async fn find_by_user(&self, user_id: &str) -> Result<Option<LikedSongsRecord>, ServiceError> {
            let state = self.state.lock().await;
            // rows are kept in id order
            Ok(state.rows.iter().find(|r| r.user_id == user_id).cloned())
        }

        async fn save(&self, mut record: LikedSongsRecord) -> Result<LikedSongsRecord, ServiceError> {
            let mut state = self.state.lock().await;
            match record.id {
                None => {
                    if record.user_id.trim().is_empty() {
                        return Err(ModelError::Validation("user_id must not be blank".into()).into());
                    }
                    state.last_id += 1;
                    record.id = Some(state.last_id);
                    state.rows.push(record.clone());
                }
                Some(id) => {
                    let slot = state
                        .rows
                        .iter_mut()
                        .find(|r| r.id == Some(id))
                        .ok_or_else(|| ServiceError::not_found("liked_songs record"))?;
                    *slot = record.clone();
                }
            }
            Ok(record)
        }
    }

}
