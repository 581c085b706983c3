use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScoringError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error("thresholds not configured")]
    ThresholdsNotConfigured,

    #[error("custom framework selected but no custom rubric is configured")]
    MissingCustomRubric,
}
