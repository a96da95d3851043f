use serde::{Deserialize, Serialize};

/// A user's liked songs in insertion order.
///
/// `id` is assigned by the store on first save and is `None` until then.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikedSongsRecord {
    pub id: Option<i32>,
    pub user_id: String,
    pub liked_song_ids: Vec<String>,
}

impl LikedSongsRecord {
    /// Unsaved record holding the given songs.
    pub fn new(user_id: impl Into<String>, liked_song_ids: Vec<String>) -> Self {
        Self { id: None, user_id: user_id.into(), liked_song_ids }
    }

    pub fn contains(&self, song_id: &str) -> bool {
        self.liked_song_ids.iter().any(|s| s == song_id)
    }

    /// Append `song_id` unless already present. Returns whether the list changed.
    pub fn like(&mut self, song_id: &str) -> bool {
        if self.contains(song_id) {
            return false;
        }
        self.liked_song_ids.push(song_id.to_string());
        true
    }

    /// Remove the first occurrence of `song_id`. Returns whether the list changed.
    pub fn unlike(&mut self, song_id: &str) -> bool {
        match self.liked_song_ids.iter().position(|s| s == song_id) {
            Some(idx) => {
                self.liked_song_ids.remove(idx);
                true
            }
            None => false,
        }
    }
}

/// Result of a like/unlike request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LikeOutcome {
    /// First like for the user; the record was created.
    Created,
    Appended,
    /// Song was already liked.
    NoOp,
    Removed,
    /// Song was not in the user's list.
    NotFound,
    /// User has no record at all.
    NoRecord,
}

impl LikeOutcome {
    /// User-facing message returned over HTTP.
    pub fn message(self) -> &'static str {
        match self {
            LikeOutcome::Created | LikeOutcome::Appended | LikeOutcome::NoOp => "Song added to liked list!",
            LikeOutcome::Removed => "Song removed from liked list!",
            LikeOutcome::NotFound => "Song not found in liked list",
            LikeOutcome::NoRecord => "No liked songs for user",
        }
    }

    /// Stable label for logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            LikeOutcome::Created => "created",
            LikeOutcome::Appended => "appended",
            LikeOutcome::NoOp => "no_op",
            LikeOutcome::Removed => "removed",
            LikeOutcome::NotFound => "not_found",
            LikeOutcome::NoRecord => "no_record",
        }
    }

    /// Whether the stored list was written.
    pub fn changed(self) -> bool {
        matches!(self, LikeOutcome::Created | LikeOutcome::Appended | LikeOutcome::Removed)
    }
}
