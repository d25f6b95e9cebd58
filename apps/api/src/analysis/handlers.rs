//! Axum route handler for the Analyze boundary.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::analyze_job_description;
use crate::errors::AppError;
use crate::models::{AtsAnalysis, StructuredJobDescription, StructuredResume};
use crate::state::AppState;
use crate::text::normalize::utf16_len;

const MIN_JOB_DESCRIPTION_LEN: usize = 50;
const DEFAULT_JOB_TITLE: &str = "Position";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub resume_data: Option<StructuredResume>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub job_analysis: StructuredJobDescription,
    pub ats_analysis: AtsAnalysis,
    pub optimized_resume: StructuredResume,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub data: AnalysisResult,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/analyze
///
/// Analyzes the job description, scores the resume against it and returns an
/// optimized copy of the resume. The pipeline is CPU-bound and runs on the
/// blocking pool.
pub async fn handle_analyze(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(request) = body.map_err(|e| AppError::Analysis(e.body_text()))?;
    let (resume, job_description) = match (request.resume_data, request.job_description) {
        (Some(resume), Some(jd)) if !jd.trim().is_empty() => (resume, jd),
        _ => {
            return Err(AppError::Validation(
                "Resume data and job description are required".to_string(),
            ))
        }
    };
    if utf16_len(&job_description) < MIN_JOB_DESCRIPTION_LEN {
        return Err(AppError::Validation(
            "Job description must be at least 50 characters long".to_string(),
        ));
    }

    let title = request
        .job_title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_JOB_TITLE.to_string());
    let company = request.company.unwrap_or_default();

    let result = tokio::task::spawn_blocking(move || {
        let job_analysis =
            analyze_job_description(&state.vocabulary, &title, &company, &job_description);
        let ats_analysis = state.ats_scorer.analyze(&resume, &job_analysis);
        let optimized_resume = state.optimizer.optimize(&resume, &job_analysis);
        AnalysisResult {
            job_analysis,
            ats_analysis,
            optimized_resume,
        }
    })
    .await
    .map_err(|e| AppError::Analysis(format!("analysis task failed: {e}")))?;

    info!(
        resume_id = %result.optimized_resume.id,
        score = result.ats_analysis.score,
        missing = result.ats_analysis.missing_keywords.len(),
        "Resume analyzed"
    );

    Ok(Json(AnalyzeResponse {
        success: true,
        data: result,
    }))
}
