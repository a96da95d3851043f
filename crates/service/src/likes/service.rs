use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use super::domain::{LikeOutcome, LikedSongsRecord};
use super::repository::LikedSongsRepository;
use crate::errors::ServiceError;

/// Application service for liking and unliking songs.
///
/// Mutations for one user run under that user's lock so concurrent
/// read-modify-write cycles cannot drop each other's changes. The lock only
/// spans this process.
pub struct LikesService<R: LikedSongsRepository + ?Sized = dyn LikedSongsRepository> {
    repo: Arc<R>,
    user_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl<R: LikedSongsRepository + ?Sized> LikesService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo, user_locks: DashMap::new() }
    }

    #[instrument(skip(self))]
    pub async fn get_liked_songs(&self, user_id: &str) -> Result<Option<LikedSongsRecord>, ServiceError> {
        self.repo.find_by_user(user_id).await
    }

    /// Like a song. Creates the user's record on first use; liking an
    /// already-liked song writes nothing.
    #[instrument(skip(self))]
    pub async fn add_liked_song(&self, user_id: &str, song_id: &str) -> Result<LikeOutcome, ServiceError> {
        let slot = self.user_lock(user_id);
        let res = {
            let _held = slot.lock.lock().await;
            self.add_locked(user_id, song_id).await
        };
        drop(slot);

        if let Ok(outcome) = &res {
            info!(user_id, song_id, outcome = outcome.as_str(), "add_liked_song");
        }
        res
    }

    /// Unlike a song. Never deletes the record, even when the list becomes empty.
    #[instrument(skip(self))]
    pub async fn remove_liked_song(&self, user_id: &str, song_id: &str) -> Result<LikeOutcome, ServiceError> {
        let slot = self.user_lock(user_id);
        let res = {
            let _held = slot.lock.lock().await;
            self.remove_locked(user_id, song_id).await
        };
        drop(slot);

        if let Ok(outcome) = &res {
            info!(user_id, song_id, outcome = outcome.as_str(), "remove_liked_song");
        }
        res
    }

    async fn add_locked(&self, user_id: &str, song_id: &str) -> Result<LikeOutcome, ServiceError> {
        let outcome = match self.repo.find_by_user(user_id).await? {
            None => {
                self.repo.save(LikedSongsRecord::new(user_id, vec![song_id.to_string()])).await?;
                LikeOutcome::Created
            }
            Some(mut record) => {
                if !record.like(song_id) {
                    debug!(user_id, song_id, "song already liked; skipping save");
                    return Ok(LikeOutcome::NoOp);
                }
                self.repo.save(record).await?;
                LikeOutcome::Appended
            }
        };
        Ok(outcome)
    }

    async fn remove_locked(&self, user_id: &str, song_id: &str) -> Result<LikeOutcome, ServiceError> {
        let Some(mut record) = self.repo.find_by_user(user_id).await? else {
            return Ok(LikeOutcome::NoRecord);
        };
        if !record.unlike(song_id) {
            return Ok(LikeOutcome::NotFound);
        }
        self.repo.save(record).await?;
        Ok(LikeOutcome::Removed)
    }

    fn user_lock<'a>(&'a self, user_id: &'a str) -> UserLockSlot<'a> {
        let lock = self.user_locks.entry(user_id.to_string()).or_default().clone();
        UserLockSlot { locks: &self.user_locks, user_id, lock }
    }
}

/// A task's claim on one user's lock. Dropping it, on completion or when the
/// request future is cancelled, removes the map entry once nobody else holds
/// or waits on it.
struct UserLockSlot<'a> {
    locks: &'a DashMap<String, Arc<Mutex<()>>>,
    user_id: &'a str,
    lock: Arc<Mutex<()>>,
}

impl Drop for UserLockSlot<'_> {
    fn drop(&mut self) {
        // the map's handle plus ours
        self.locks
            .remove_if(self.user_id, |_, l| Arc::ptr_eq(l, &self.lock) && Arc::strong_count(l) == 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::likes::repository::memory::InMemoryLikedSongsRepository;

    fn service() -> (Arc<InMemoryLikedSongsRepository>, LikesService<InMemoryLikedSongsRepository>) {
        let repo = Arc::new(InMemoryLikedSongsRepository::new());
        (repo.clone(), LikesService::new(repo))
    }

    #[tokio::test]
    async fn unknown_user_has_no_record() {
        let (_, svc) = service();
        assert!(svc.get_liked_songs("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn like_unlike_scenario() {
        let (_, svc) = service();

        assert_eq!(svc.add_liked_song("u1", "s1").await.unwrap(), LikeOutcome::Created);
        let rec = svc.get_liked_songs("u1").await.unwrap().unwrap();
        assert_eq!(rec.user_id, "u1");
        assert_eq!(rec.liked_song_ids, vec!["s1"]);

        assert_eq!(svc.add_liked_song("u1", "s2").await.unwrap(), LikeOutcome::Appended);
        assert_eq!(svc.get_liked_songs("u1").await.unwrap().unwrap().liked_song_ids, vec!["s1", "s2"]);

        assert_eq!(svc.remove_liked_song("u1", "s1").await.unwrap(), LikeOutcome::Removed);
        assert_eq!(svc.get_liked_songs("u1").await.unwrap().unwrap().liked_song_ids, vec!["s2"]);

        let again = svc.remove_liked_song("u1", "s1").await.unwrap();
        assert_eq!(again, LikeOutcome::NotFound);
        assert_eq!(again.message(), "Song not found in liked list");
        assert_eq!(svc.get_liked_songs("u1").await.unwrap().unwrap().liked_song_ids, vec!["s2"]);
    }

    #[tokio::test]
    async fn duplicate_like_is_stored_once() {
        let (_, svc) = service();
        assert_eq!(svc.add_liked_song("u1", "s1").await.unwrap(), LikeOutcome::Created);
        assert_eq!(svc.add_liked_song("u1", "s1").await.unwrap(), LikeOutcome::NoOp);
        assert_eq!(svc.get_liked_songs("u1").await.unwrap().unwrap().liked_song_ids, vec!["s1"]);
    }

    #[tokio::test]
    async fn remove_for_unknown_user_creates_nothing() {
        let (repo, svc) = service();
        let outcome = svc.remove_liked_song("unknown", "s1").await.unwrap();
        assert_eq!(outcome, LikeOutcome::NoRecord);
        assert_eq!(outcome.message(), "No liked songs for user");
        assert!(repo.is_empty().await);
        assert!(svc.get_liked_songs("unknown").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn removing_last_song_keeps_empty_record() {
        let (repo, svc) = service();
        svc.add_liked_song("u1", "s1").await.unwrap();
        assert_eq!(svc.remove_liked_song("u1", "s1").await.unwrap(), LikeOutcome::Removed);

        let rec = svc.get_liked_songs("u1").await.unwrap().expect("record survives");
        assert!(rec.liked_song_ids.is_empty());
        assert_eq!(repo.len().await, 1);

        // liking again reuses the existing record
        assert_eq!(svc.add_liked_song("u1", "s3").await.unwrap(), LikeOutcome::Appended);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn repeated_remove_of_absent_song_is_idempotent() {
        let (_, svc) = service();
        svc.add_liked_song("u1", "a").await.unwrap();
        svc.add_liked_song("u1", "b").await.unwrap();
        for _ in 0..3 {
            assert_eq!(svc.remove_liked_song("u1", "zzz").await.unwrap(), LikeOutcome::NotFound);
            assert_eq!(svc.get_liked_songs("u1").await.unwrap().unwrap().liked_song_ids, vec!["a", "b"]);
        }
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let (_, svc) = service();
        svc.add_liked_song("u1", "s1").await.unwrap();
        svc.add_liked_song("u2", "s9").await.unwrap();
        assert_eq!(svc.remove_liked_song("u2", "s1").await.unwrap(), LikeOutcome::NotFound);
        assert_eq!(svc.get_liked_songs("u1").await.unwrap().unwrap().liked_song_ids, vec!["s1"]);
        assert_eq!(svc.get_liked_songs("u2").await.unwrap().unwrap().liked_song_ids, vec!["s9"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_likes_for_one_user_all_land() {
        let (repo, svc) = service();
        let svc = Arc::new(svc);

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let svc = Arc::clone(&svc);
                tokio::spawn(async move { svc.add_liked_song("busy", &format!("s{i}")).await })
            })
            .collect();
        for h in handles {
            h.await.unwrap().unwrap();
        }

        let mut ids = svc.get_liked_songs("busy").await.unwrap().unwrap().liked_song_ids;
        ids.sort();
        let mut expected: Vec<String> = (0..32).map(|i| format!("s{i}")).collect();
        expected.sort();
        assert_eq!(ids, expected);
        assert_eq!(repo.len().await, 1);
        assert!(svc.user_locks.is_empty());
    }

    #[tokio::test]
    async fn cancelled_mutation_releases_user_lock() {
        let (_, svc) = service();

        let held = svc.user_lock("u1");
        let guard = held.lock.lock().await;
        // waits on the held lock until the timeout drops it
        let waited = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            svc.add_liked_song("u1", "s1"),
        )
        .await;
        assert!(waited.is_err());
        assert_eq!(svc.user_locks.len(), 1);

        drop(guard);
        drop(held);
        assert!(svc.user_locks.is_empty());
        assert!(svc.get_liked_songs("u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn works_behind_a_trait_object() {
        let repo: Arc<dyn LikedSongsRepository> = Arc::new(InMemoryLikedSongsRepository::new());
        let svc: LikesService = LikesService::new(repo);
        assert_eq!(svc.add_liked_song("u", "s").await.unwrap(), LikeOutcome::Created);
    }
}
