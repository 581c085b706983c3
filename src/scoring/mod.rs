pub mod config;
pub mod factors;
pub mod engine;
pub mod validation;

pub use config::*;
pub use factors::{FactorContribution, FitCategory, SubScore};
pub use engine::{categorize, BucketCounts, IcpScorer, ScoreResult};
pub use validation::validate_scoring;
