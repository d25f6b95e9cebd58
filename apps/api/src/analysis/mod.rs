// Job description analysis, ATS scoring and content optimization.
// Pure functions over in-memory records; handlers run them on the blocking pool.

pub mod ats_scoring;
pub mod handlers;
pub mod jd_analyzer;
pub mod optimizer;
pub mod vocabulary;

pub use ats_scoring::{AtsScorer, KeywordAtsScorer};
pub use jd_analyzer::analyze_job_description;
pub use optimizer::ContentOptimizer;
pub use vocabulary::Vocabulary;
