// Document export: the layout plan built from the line classifier, and its PDF
// and Word encodings.

pub mod docx;
pub mod handlers;
pub mod pdf;
pub mod style;

use thiserror::Error;

pub use docx::render_docx;
pub use pdf::render_pdf;
pub use style::plan_document;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("pdf encoding failed: {0}")]
    Pdf(#[from] printpdf::Error),

    #[error("word package could not be written: {0}")]
    Package(#[from] zip::result::ZipError),

    #[error("word document body could not be written: {0}")]
    Io(#[from] std::io::Error),
}
