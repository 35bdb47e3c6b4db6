//! Natural-language interpretation: confidence values, interpretations,
//! and the parsing of model responses into them.

pub mod entities;
pub mod parsing;

pub use entities::{Confidence, ConfidenceThreshold, Interpretation};
pub use parsing::{parse_interpretation, strip_code_fences};
