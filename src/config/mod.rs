mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::icp::IcpDefinition;

/// Get the config directory path (~/.config/icp-scorer/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("icp-scorer"))
}

/// Get the default config file path (~/.config/icp-scorer/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/icp-scorer/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
///
/// A missing file at the default path is not an error; defaults are used.
/// A relative `icp_path` is resolved against the config file's directory.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let mut config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    // Relative icp_path is relative to the config file, not the working directory
    if let (Some(icp_path), Some(dir)) = (config.icp_path.as_mut(), config_path.parent()) {
        if icp_path.is_relative() {
            *icp_path = dir.join(&*icp_path);
        }
    }

    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok(config)
}

const ICP_GROUPS: [&str; 3] = ["company_characteristics", "buyer_persona", "engagement_signals"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IcpFormat {
    Json,
    Csv,
    Yaml,
}

impl IcpFormat {
    fn from_path(path: &Path) -> Self {
        let ext = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
        if ext.eq_ignore_ascii_case("json") {
            IcpFormat::Json
        } else if ext.eq_ignore_ascii_case("csv") {
            IcpFormat::Csv
        } else {
            IcpFormat::Yaml
        }
    }
}

/// Load an ICP definition from a JSON, CSV or YAML file.
///
/// `.json` is read as JSON and `.csv` as a flattened export (see
/// [`save_icp`]); anything else as YAML.
pub fn load_icp(path: &Path) -> Result<IcpDefinition> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read ICP file at {}", path.display()))?;

    let definition = match IcpFormat::from_path(path) {
        IcpFormat::Json => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse ICP: invalid JSON in {}", path.display()))?,
        IcpFormat::Csv => icp_from_csv(&content)
            .with_context(|| format!("Failed to parse ICP: invalid CSV in {}", path.display()))?,
        IcpFormat::Yaml => serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse ICP: invalid YAML in {}", path.display()))?,
    };

    Ok(definition)
}

/// Write an ICP definition atomically, picking the format from the
/// extension the same way [`load_icp`] does.
///
/// CSV is one header row of `group.criterion` columns and one value row.
pub fn save_icp(path: &Path, definition: &IcpDefinition) -> Result<()> {
    let content = match IcpFormat::from_path(path) {
        IcpFormat::Json => {
            serde_json::to_string_pretty(definition).context("Failed to serialize ICP as JSON")?
        }
        IcpFormat::Csv => icp_to_csv(definition)?,
        IcpFormat::Yaml => {
            serde_saphyr::to_string(definition).context("Failed to serialize ICP as YAML")?
        }
    };

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write ICP to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save ICP to {}", path.display()))?;

    tracing::info!(path = %path.display(), "exported ICP");
    Ok(())
}

fn icp_from_csv(content: &str) -> Result<IcpDefinition> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let headers = reader.headers().context("Missing header row")?.clone();
    let values = match reader.records().next() {
        Some(record) => record.context("Malformed value row")?,
        None => csv::StringRecord::new(),
    };

    let mut definition = IcpDefinition::default();
    for (index, header) in headers.iter().enumerate() {
        let value = values.get(index).unwrap_or("");
        let group = match header.split_once('.') {
            Some(("company_characteristics", key)) => Some((&mut definition.company_characteristics, key)),
            Some(("buyer_persona", key)) => Some((&mut definition.buyer_persona, key)),
            Some(("engagement_signals", key)) => Some((&mut definition.engagement_signals, key)),
            _ => None,
        };
        match group {
            Some((group, key)) => {
                group.insert(key.to_string(), value.to_string());
            }
            None => tracing::debug!(column = header, "ignoring unknown ICP column"),
        }
    }
    Ok(definition)
}

fn icp_to_csv(definition: &IcpDefinition) -> Result<String> {
    let groups = [
        &definition.company_characteristics,
        &definition.buyer_persona,
        &definition.engagement_signals,
    ];

    let mut headers = Vec::new();
    let mut values = Vec::new();
    for (name, group) in ICP_GROUPS.iter().zip(groups) {
        for (key, value) in group {
            headers.push(format!("{}.{}", name, key));
            values.push(value.as_str());
        }
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&headers).context("Failed to write CSV header")?;
    writer.write_record(&values).context("Failed to write CSV values")?;
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e))?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}
