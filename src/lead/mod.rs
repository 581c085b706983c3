pub mod storage;
pub mod types;

pub use storage::{load_leads, save_scored_batch, ScoredBatch};
pub use types::{
    Bucket, CompanyProfile, ContactProfile, IntentSignals, LeadRecord, QualificationData,
    TimingSignals,
};
