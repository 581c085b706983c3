use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::qualification::QualificationConfig;
use crate::scoring::ScoringConfig;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// ICP definition file used when no --icp or --template is given
    #[serde(default)]
    pub icp_path: Option<PathBuf>,

    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    #[serde(default)]
    pub qualification: Option<QualificationConfig>,
}
