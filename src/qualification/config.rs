use serde::{Deserialize, Serialize};

/// Qualification configuration.
///
/// Example YAML:
/// ```yaml
/// qualification:
///   framework: custom
///   custom:
///     pass_score: 60
///     criteria:
///       - { flag: "security_review_passed", points: 40 }
///       - { flag: "pilot_requested", points: 30 }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QualificationConfig {
    #[serde(default)]
    pub framework: FrameworkKind,

    /// Required when `framework` is `custom`
    #[serde(default)]
    pub custom: Option<CustomRubric>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FrameworkKind {
    #[default]
    Bant,
    Meddic,
    Champ,
    Custom,
}

/// User-defined rubric over the lead's `qualification.custom` flags.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CustomRubric {
    pub pass_score: u32,
    pub criteria: Vec<CustomCriterion>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CustomCriterion {
    /// Key in the lead's `qualification.custom` map
    pub flag: String,
    pub points: u32,
}

/// Validate qualification configuration at startup.
/// Returns all validation errors at once.
pub fn validate_qualification(config: &QualificationConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.framework == FrameworkKind::Custom && config.custom.is_none() {
        errors.push("qualification.custom: required when framework is 'custom'".to_string());
    }

    if let Some(ref rubric) = config.custom {
        if rubric.criteria.is_empty() {
            errors.push("qualification.custom.criteria: must not be empty".to_string());
        }
        for (i, criterion) in rubric.criteria.iter().enumerate() {
            if criterion.flag.trim().is_empty() {
                errors.push(format!(
                    "qualification.custom.criteria[{}].flag: must not be empty",
                    i
                ));
            }
        }
        let reachable: u32 = rubric.criteria.iter().map(|c| c.points).sum();
        if rubric.pass_score > reachable {
            errors.push(format!(
                "qualification.custom.pass_score: {} exceeds the {} points the criteria can award",
                rubric.pass_score, reachable
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
