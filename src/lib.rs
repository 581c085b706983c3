//! Lead-fit scoring against an Ideal Customer Profile.
//!
//! Parse an [`icp::IcpDefinition`] once, then score any number of
//! [`lead::LeadRecord`]s with an [`scoring::IcpScorer`]. Scores are weighted
//! 0-100 totals that map to hot/warm/cold buckets.

pub mod config;
pub mod error;
pub mod icp;
pub mod lead;
pub mod output;
pub mod qualification;
pub mod scoring;

pub use error::ScoringError;
