//! Generation submission handlers.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use tracing::{info, warn};

use vgen_models::{ImageToVideoParams, TextToVideoRequest, VideoId, VideoJob};
use vgen_storage::upload_filename;

use crate::error::{ApiError, ApiResult};
use crate::extract::AppJson;
use crate::metrics;
use crate::state::AppState;

/// Submit a text-to-video job.
pub async fn generate_text_to_video(
    State(state): State<AppState>,
    AppJson(request): AppJson<TextToVideoRequest>,
) -> ApiResult<Json<VideoJob>> {
    let duration = request.checked_duration().map_err(ApiError::bad_request)?;

    let job = VideoJob::text(request.prompt, request.style, duration, request.nsfw_enabled);
    submit(&state, job).await
}

/// Uploaded file part of the image-to-video form.
struct ImageUpload {
    file_name: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

/// Submit an image-to-video job from a multipart form.
///
/// Fields: `file` (required, `image/*`), `style` (required), `duration`
/// and `nsfw_enabled` (optional). Nothing is stored unless every field is
/// valid.
pub async fn generate_image_to_video(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<VideoJob>> {
    let mut multipart = multipart?;
    let mut upload: Option<ImageUpload> = None;
    let mut style: Option<String> = None;
    let mut duration: Option<String> = None;
    let mut nsfw_enabled: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read file: {}", e)))?;
                upload = Some(ImageUpload {
                    file_name,
                    content_type,
                    data: data.to_vec(),
                });
            }
            "style" => style = Some(read_text(field).await?),
            "duration" => duration = Some(read_text(field).await?),
            "nsfw_enabled" => nsfw_enabled = Some(read_text(field).await?),
            other => warn!(field = other, "Ignoring unknown form field"),
        }
    }

    let upload = upload.ok_or_else(|| ApiError::bad_request("Missing file field"))?;
    let is_image = upload
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("image/"));
    if !is_image {
        return Err(ApiError::bad_request("File must be an image"));
    }

    let style = style.ok_or_else(|| ApiError::bad_request("Missing style field"))?;
    let mut params = ImageToVideoParams::new(style);
    if let Some(raw) = duration {
        params.duration = raw
            .trim()
            .parse()
            .map_err(|_| ApiError::bad_request("duration must be an integer"))?;
    }
    if let Some(raw) = nsfw_enabled {
        params.nsfw_enabled = parse_form_bool(&raw)
            .ok_or_else(|| ApiError::bad_request("nsfw_enabled must be a boolean"))?;
    }
    let duration = params.checked_duration().map_err(ApiError::bad_request)?;

    let id = VideoId::new();
    let filename = upload_filename(&id, upload.file_name.as_deref());
    state.uploads.upload_bytes(&filename, &upload.data).await?;
    metrics::record_upload_bytes(upload.data.len());

    let job = VideoJob::image(id, filename.clone(), params.style, duration, params.nsfw_enabled);
    match submit(&state, job).await {
        Ok(job) => Ok(job),
        Err(e) => {
            // The job was never recorded, so nothing will reference the file
            if let Err(cleanup) = state.uploads.remove(&filename).await {
                warn!(filename = %filename, "Failed to remove orphaned upload: {}", cleanup);
            }
            Err(e)
        }
    }
}

/// Persist a new job and schedule its completion.
async fn submit(state: &AppState, job: VideoJob) -> ApiResult<Json<VideoJob>> {
    state.store.insert(job.clone()).await?;
    state.simulator.schedule(job.id.clone(), job.style.clone());
    metrics::record_job_submitted(job.kind().as_str());

    info!(
        video_id = %job.id,
        kind = %job.kind(),
        style = %job.style,
        duration = job.duration,
        "Video generation started"
    );

    Ok(Json(job))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> ApiResult<String> {
    let name = field.name().unwrap_or_default().to_string();
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid {} field: {}", name, e)))
}

/// Parse an HTML form boolean.
fn parse_form_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
