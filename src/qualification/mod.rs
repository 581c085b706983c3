pub mod config;
pub mod frameworks;

pub use config::{
    validate_qualification, CustomCriterion, CustomRubric, FrameworkKind, QualificationConfig,
};
pub use frameworks::{qualified_leads, qualify_leads, Framework, QualificationOutcome, Rubric};
