//! Codec for the `liked_song_ids` column.
//!
//! The list is stored as JSON array text. The codec is a stateless value; build
//! one wherever it is needed.

use crate::errors::ModelError;

/// Textual form of an empty list.
pub const EMPTY_LIST: &str = "[]";

#[derive(Debug, Clone, Copy, Default)]
pub struct SongIdsCodec;

impl SongIdsCodec {
    pub fn new() -> Self {
        Self
    }

    /// Encode ids as JSON array text; an absent list encodes as `[]`.
    pub fn encode(&self, ids: Option<&[String]>) -> Result<String, ModelError> {
        match ids {
            None => Ok(EMPTY_LIST.to_string()),
            Some(ids) => serde_json::to_string(ids)
                .map_err(|e| ModelError::Serialization(format!("failed to encode song ids: {e}"))),
        }
    }

    /// Decode stored text. Blank text is an empty list; anything other than a
    /// JSON array of strings is an error.
    pub fn decode(&self, text: &str) -> Result<Vec<String>, ModelError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(text)
            .map_err(|e| ModelError::Serialization(format!("failed to decode song ids: {e}")))
    }
}
