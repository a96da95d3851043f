use std::sync::Arc;

use axum::{extract::{Path, State}, Json};
use serde::Serialize;
use service::likes::{LikeOutcome, LikedSongsRecord, LikesService};
use tracing::{error, info};

use crate::{errors::JsonApiError, metrics};

#[derive(Clone)]
pub struct ServerState {
    pub likes: Arc<LikesService>,
}

/// Like/unlike response. Every domain outcome is a 200; `outcome` lets clients
/// tell them apart without parsing `message`.
#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub message: String,
    pub outcome: String,
}

impl From<LikeOutcome> for LikeResponse {
    fn from(o: LikeOutcome) -> Self {
        Self { message: o.message().to_string(), outcome: o.as_str().to_string() }
    }
}

#[utoipa::path(
    post, path = "/api/likes/add/{user_id}/{song_id}", tag = "likes",
    params(
        ("user_id" = String, Path, description = "User ID"),
        ("song_id" = String, Path, description = "Song ID")
    ),
    responses(
        (status = 200, description = "Liked (or already liked)", body = crate::openapi::LikeResponseDoc),
        (status = 500, description = "Like Failed", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn like_song(
    State(state): State<ServerState>,
    Path((user_id, song_id)): Path<(String, String)>,
) -> Result<Json<LikeResponse>, JsonApiError> {
    match state.likes.add_liked_song(&user_id, &song_id).await {
        Ok(outcome) => {
            metrics::record_outcome("add", outcome);
            Ok(Json(outcome.into()))
        }
        Err(e) => {
            metrics::record_error("add");
            error!(err = %e, %user_id, %song_id, "like song failed");
            Err(JsonApiError::from_service("Like Failed", &e))
        }
    }
}

#[utoipa::path(
    delete, path = "/api/likes/remove/{user_id}/{song_id}", tag = "likes",
    params(
        ("user_id" = String, Path, description = "User ID"),
        ("song_id" = String, Path, description = "Song ID")
    ),
    responses(
        (status = 200, description = "Removed, not found, or no record", body = crate::openapi::LikeResponseDoc),
        (status = 500, description = "Unlike Failed", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn unlike_song(
    State(state): State<ServerState>,
    Path((user_id, song_id)): Path<(String, String)>,
) -> Result<Json<LikeResponse>, JsonApiError> {
    match state.likes.remove_liked_song(&user_id, &song_id).await {
        Ok(outcome) => {
            metrics::record_outcome("remove", outcome);
            Ok(Json(outcome.into()))
        }
        Err(e) => {
            metrics::record_error("remove");
            error!(err = %e, %user_id, %song_id, "unlike song failed");
            Err(JsonApiError::from_service("Unlike Failed", &e))
        }
    }
}

/// Unknown users yield `null`, not an empty list.
#[utoipa::path(
    get, path = "/api/likes/{user_id}", tag = "likes",
    params(("user_id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Record, or null when the user has none", body = crate::openapi::LikedSongsRecordDoc),
        (status = 500, description = "Lookup Failed", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn get_liked_songs(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> Result<Json<Option<LikedSongsRecord>>, JsonApiError> {
    match state.likes.get_liked_songs(&user_id).await {
        Ok(record) => {
            info!(%user_id, count = record.as_ref().map_or(0, |r| r.liked_song_ids.len()), "get liked songs");
            Ok(Json(record))
        }
        Err(e) => {
            metrics::record_error("get");
            error!(err = %e, %user_id, "get liked songs failed");
            Err(JsonApiError::from_service("Lookup Failed", &e))
        }
    }
}
