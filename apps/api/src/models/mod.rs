// Wire and domain records shared by parsing, analysis and export.

pub mod analysis;
pub mod job;
pub mod resume;

pub use analysis::{AtsAnalysis, Importance, Improvement, KeywordMatch};
pub use job::StructuredJobDescription;
pub use resume::{EducationEntry, ExperienceEntry, PersonalInfo, ResumeSections, StructuredResume};
