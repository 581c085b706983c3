use super::types::LeadRecord;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const BATCH_VERSION: u32 = 1;

/// Scored leads as written for downstream consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredBatch {
    pub version: u32,
    pub scored_at: DateTime<Utc>,
    pub leads: Vec<LeadRecord>,
}

impl ScoredBatch {
    pub fn new(leads: Vec<LeadRecord>) -> Self {
        Self {
            version: BATCH_VERSION,
            scored_at: Utc::now(),
            leads,
        }
    }
}

/// Load leads from a JSON file.
///
/// Accepts either a bare array of leads or a previously written
/// [`ScoredBatch`], so scored output can be fed back in. A record that does
/// not deserialize is skipped with a warning; the rest still load.
pub fn load_leads(path: &Path) -> Result<Vec<LeadRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open leads file at {}", path.display()))?;

    let parsed: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse leads: invalid JSON in {}", path.display()))?;

    let records = match parsed {
        Value::Array(records) => records,
        Value::Object(mut batch) if batch.contains_key("leads") => {
            let version = batch.get("version").and_then(Value::as_u64);
            if version != Some(u64::from(BATCH_VERSION)) {
                anyhow::bail!(
                    "Unsupported scored batch version: {}",
                    batch.get("version").unwrap_or(&Value::Null)
                );
            }
            match batch.remove("leads") {
                Some(Value::Array(records)) => records,
                _ => anyhow::bail!(
                    "Failed to parse leads: 'leads' is not an array in {}",
                    path.display()
                ),
            }
        }
        _ => anyhow::bail!(
            "Failed to parse leads: expected an array of leads or a scored batch in {}",
            path.display()
        ),
    };

    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match LeadRecord::deserialize(record) {
            Ok(lead) => Some(lead),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed lead record");
                None
            }
        })
        .collect())
}

/// Write a scored batch to a JSON file atomically.
///
/// The file is never left half-written if serialization fails.
pub fn save_scored_batch(path: &Path, batch: &ScoredBatch) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, batch).context("Failed to serialize scored leads")?;

    file.commit()
        .with_context(|| format!("Failed to save scored leads to {}", path.display()))?;

    tracing::info!(path = %path.display(), leads = batch.leads.len(), "wrote scored leads");
    Ok(())
}
