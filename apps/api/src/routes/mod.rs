pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::parsing::handlers as parsing;
use crate::render::handlers as render;
use crate::state::AppState;

/// Room for multipart framing on top of the file size ceiling, so an oversized
/// file reaches the upload handler's own size check.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes/upload", post(parsing::handle_upload))
        .route("/api/v1/resumes/analyze", post(analysis::handle_analyze))
        .route("/api/v1/resumes/export/pdf", post(render::handle_export_pdf))
        .route("/api/v1/resumes/export/word", post(render::handle_export_word))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
