// Text primitives: line normalization and the Line Classifier.
// Everything here is a pure function of its input.

pub mod line_role;
pub mod normalize;

pub use line_role::{classify_document, LineRole};
