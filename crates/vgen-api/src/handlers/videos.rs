//! Job polling and gallery handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use vgen_models::{VideoGallery, VideoId, VideoJob};
use vgen_store::StoreError;

use crate::error::{ApiError, ApiResult};
use crate::extract::AppQuery;
use crate::state::AppState;

const DEFAULT_PAGE_LIMIT: usize = 20;

/// Fetch a single job.
pub async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> ApiResult<Json<VideoJob>> {
    let id = VideoId::from_string(video_id);
    match state.store.get(&id).await {
        Ok(job) => Ok(Json(job)),
        Err(StoreError::NotFound(_)) => Err(ApiError::not_found("Video not found")),
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Deserialize)]
pub struct ListVideosQuery {
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
}

/// List jobs newest first.
pub async fn list_videos(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListVideosQuery>,
) -> ApiResult<Json<VideoGallery>> {
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    let offset = query.offset.unwrap_or(0);

    let gallery = state.store.list(limit, offset).await?;
    Ok(Json(gallery))
}
