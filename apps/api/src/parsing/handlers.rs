//! Axum route handler for resume uploads.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::StructuredResume;
use crate::parsing::{extract::DocumentFormat, parse_upload};
use crate::state::AppState;

const FILE_FIELD: &str = "resume";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub data: StructuredResume,
}

/// POST /api/v1/resumes/upload
///
/// Accepts a multipart form with a `resume` file field (pdf, doc, docx or txt),
/// extracts its text and returns the structured resume.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let too_large = || {
        AppError::Validation(format!(
            "File size too large. Please upload files smaller than {}MB.",
            state.config.max_upload_megabytes()
        ))
    };

    let mut upload: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, &too_large))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, &too_large))?;
        upload = Some((file_name, data));
        break;
    }

    let Some((file_name, data)) = upload else {
        return Err(AppError::Validation("No file uploaded".to_string()));
    };
    if data.len() > state.config.max_upload_bytes {
        return Err(too_large());
    }
    DocumentFormat::from_file_name(&file_name)?;

    info!(file_name = %file_name, bytes = data.len(), "Resume upload received");

    let pdf_extraction = state.config.enable_pdf_extraction;
    let resume = tokio::task::spawn_blocking(move || {
        parse_upload(&file_name, &data, pdf_extraction)
    })
    .await
    .map_err(|e| AppError::Upload(format!("parse task failed: {e}")))??;

    Ok(Json(UploadResponse {
        success: true,
        data: resume,
    }))
}

/// A body cut off by the request limit is reported as an oversized upload.
fn multipart_error(err: MultipartError, too_large: &impl Fn() -> AppError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        too_large()
    } else {
        AppError::Upload(err.body_text())
    }
}
