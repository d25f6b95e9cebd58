//! Axum route handlers for document export.

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::StructuredResume;
use crate::render::{plan_document, render_docx, render_pdf};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub resume_data: Option<StructuredResume>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Pdf,
    Word,
}

impl ExportFormat {
    fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Word => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Word => "docx",
        }
    }
}

/// POST /api/v1/resumes/export/pdf
pub async fn handle_export_pdf(
    body: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    export(body, ExportFormat::Pdf).await
}

/// POST /api/v1/resumes/export/word
pub async fn handle_export_word(
    body: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    export(body, ExportFormat::Word).await
}

async fn export(
    body: Result<Json<ExportRequest>, JsonRejection>,
    format: ExportFormat,
) -> Result<Response, AppError> {
    let Json(request) = body.map_err(|e| AppError::Generation(e.body_text()))?;
    let resume = request
        .resume_data
        .ok_or_else(|| AppError::Validation("Resume data is required".to_string()))?;

    let file_name = format!(
        "{}_optimized.{}",
        header_safe(resume.display_name()),
        format.extension()
    );
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\""))
        .map_err(|e| AppError::Generation(e.to_string()))?;

    let bytes = tokio::task::spawn_blocking(move || {
        let plan = plan_document(&resume);
        match format {
            ExportFormat::Pdf => render_pdf(resume.display_name(), &plan),
            ExportFormat::Word => render_docx(&plan),
        }
    })
    .await
    .map_err(|e| AppError::Generation(format!("export task failed: {e}")))??;

    info!(file_name = %file_name, bytes = bytes.len(), "Resume exported");

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(format.content_type())),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// Header values must be visible ASCII; anything else in a name becomes `_`.
fn header_safe(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c == ' ' || (c.is_ascii_graphic() && c != '"' && c != '\\') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
