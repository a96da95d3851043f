use axum::Json;
use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Body of like/unlike responses.
#[derive(ToSchema)]
pub struct LikeResponseDoc {
    pub message: String,
    /// One of `created`, `appended`, `no_op`, `removed`, `not_found`, `no_record`.
    pub outcome: String,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikedSongsRecordDoc {
    pub id: Option<i32>,
    pub user_id: String,
    pub liked_song_ids: Vec<String>,
}

#[derive(ToSchema)]
pub struct ErrorBodyDoc { pub error: String, pub detail: Option<String> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::likes::like_song,
        crate::routes::likes::unlike_song,
        crate::routes::likes::get_liked_songs,
    ),
    components(
        schemas(
            HealthResponse,
            LikeResponseDoc,
            LikedSongsRecordDoc,
            ErrorBodyDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "likes")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
