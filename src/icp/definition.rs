use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Free-text criteria for one ICP group, keyed by criterion name.
pub type CriteriaGroup = BTreeMap<String, String>;

/// Raw Ideal Customer Profile as produced by a template, wizard or file.
///
/// Example YAML:
/// ```yaml
/// company_characteristics:
///   industry_vertical: "B2B SaaS, Project Management"
///   company_size: "10-50 employees, $1M-$10M revenue"
/// buyer_persona:
///   decision_maker_profile: "VP Operations, Director"
/// engagement_signals:
///   intent_signals: "job postings, funding announcements"
/// ```
///
/// Deserialization never rejects a definition for its shape: a missing group,
/// a group that is not a map, or a criterion that is not a string is dropped.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct IcpDefinition {
    #[serde(default, deserialize_with = "lenient_group")]
    pub company_characteristics: CriteriaGroup,

    #[serde(default, deserialize_with = "lenient_group")]
    pub buyer_persona: CriteriaGroup,

    #[serde(default, deserialize_with = "lenient_group")]
    pub engagement_signals: CriteriaGroup,
}

impl IcpDefinition {
    /// Look up a criterion's text, treating a missing key as empty.
    pub fn company(&self, key: &str) -> &str {
        self.company_characteristics.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn persona(&self, key: &str) -> &str {
        self.buyer_persona.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn signals(&self, key: &str) -> &str {
        self.engagement_signals.get(key).map(String::as_str).unwrap_or("")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientText {
    Text(String),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientGroup {
    Map(BTreeMap<String, LenientText>),
    Other(IgnoredAny),
}

fn lenient_group<'de, D>(deserializer: D) -> Result<CriteriaGroup, D::Error>
where
    D: Deserializer<'de>,
{
    let group = match Option::<LenientGroup>::deserialize(deserializer)? {
        Some(LenientGroup::Map(map)) => map,
        Some(LenientGroup::Other(_)) | None => return Ok(CriteriaGroup::new()),
    };

    Ok(group
        .into_iter()
        .filter_map(|(key, value)| match value {
            LenientText::Text(text) => Some((key, text)),
            LenientText::Other(_) => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_definition_yaml() {
        let yaml = r#"
company_characteristics:
  industry_vertical: "B2B SaaS"
  company_size: "10-50 employees"
buyer_persona:
  decision_maker_profile: "VP Sales, CRO"
engagement_signals:
  intent_signals: "job postings"
"#;
        let def: IcpDefinition = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(def.company("industry_vertical"), "B2B SaaS");
        assert_eq!(def.persona("decision_maker_profile"), "VP Sales, CRO");
        assert_eq!(def.signals("intent_signals"), "job postings");
    }

    #[test]
    fn test_missing_groups_default_to_empty() {
        let def: IcpDefinition = serde_json::from_str(r#"{"buyer_persona": {}}"#).unwrap();
        assert!(def.company_characteristics.is_empty());
        assert!(def.buyer_persona.is_empty());
        assert!(def.engagement_signals.is_empty());
    }

    #[test]
    fn test_non_string_values_are_dropped() {
        let json = r#"{
            "company_characteristics": {
                "industry_vertical": "Fintech",
                "company_size": 42,
                "geography": ["US", "EU"]
            },
            "buyer_persona": "not a map"
        }"#;
        let def: IcpDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.company("industry_vertical"), "Fintech");
        assert_eq!(def.company("company_size"), "");
        assert_eq!(def.company("geography"), "");
        assert!(def.buyer_persona.is_empty());
    }

    #[test]
    fn test_null_group_is_empty() {
        let def: IcpDefinition =
            serde_json::from_str(r#"{"engagement_signals": null}"#).unwrap();
        assert!(def.engagement_signals.is_empty());
    }
}
