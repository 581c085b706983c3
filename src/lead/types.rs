use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A candidate prospect: company, contact and observed signals.
///
/// All groups default to empty so partially enriched leads still score.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct LeadRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub company: CompanyProfile,
    #[serde(default)]
    pub contact: ContactProfile,
    #[serde(default)]
    pub signals: IntentSignals,
    #[serde(default)]
    pub timing: TimingSignals,
    #[serde(default)]
    pub qualification: QualificationData,

    // Attached by scoring and qualification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icp_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_bucket: Option<Bucket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualification_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualified: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct CompanyProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub employee_count: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub revenue_estimate: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geography: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub growth_indicators: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ContactProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seniority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority_level: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct IntentSignals {
    #[serde(default)]
    pub recent_funding: bool,
    #[serde(default)]
    pub hiring_relevant_roles: bool,
    #[serde(default)]
    pub tech_stack_changes: bool,
    #[serde(default)]
    pub competitor_mentions: bool,
    #[serde(default)]
    pub product_launches: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct TimingSignals {
    #[serde(default)]
    pub fiscal_calendar_alignment: bool,
    #[serde(default)]
    pub recent_trigger_events: bool,
    #[serde(default)]
    pub seasonal_factors: bool,
}

/// Inputs for the BANT, MEDDIC, CHAMP and custom qualification rubrics.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct QualificationData {
    #[serde(default)]
    pub budget_indicated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_authority: Option<String>,
    #[serde(default)]
    pub identified_need: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_timeline: Option<String>,

    #[serde(default)]
    pub business_metrics: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_role: Option<String>,
    #[serde(default)]
    pub decision_criteria: bool,
    #[serde(default)]
    pub decision_process: bool,
    #[serde(default)]
    pub identified_pain: bool,
    #[serde(default)]
    pub internal_champion: bool,

    #[serde(default)]
    pub identified_challenges: bool,
    #[serde(default)]
    pub budget_approved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initiative_priority: Option<String>,

    /// Free-form flags referenced by custom rubrics
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Hot,
    Warm,
    Cold,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Bucket::Hot => "hot",
            Bucket::Warm => "warm",
            Bucket::Cold => "cold",
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientCount {
    Whole(u64),
    Fractional(f64),
    Other(IgnoredAny),
}

/// Accept integer or float counts; anything else reads as absent.
/// Fractions are truncated.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LenientCount>::deserialize(deserializer)? {
        Some(LenientCount::Whole(n)) => Some(n),
        Some(LenientCount::Fractional(x)) if x.is_finite() && x >= 0.0 => Some(x as u64),
        Some(LenientCount::Fractional(x)) => {
            tracing::warn!(value = x, "ignoring out-of-range count");
            None
        }
        Some(LenientCount::Other(_)) => {
            tracing::warn!("ignoring non-numeric count");
            None
        }
        None => None,
    })
}

impl LeadRecord {
    /// Display name: company name, then contact name, then id.
    pub fn display_name(&self) -> String {
        self.company
            .name
            .as_deref()
            .or(self.contact.name.as_deref())
            .or(self.id.as_deref())
            .unwrap_or("(unnamed lead)")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_lead() {
        let lead: LeadRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(lead, LeadRecord::default());
    }

    #[test]
    fn test_parse_nested_lead() {
        let json = r#"{
            "id": "lead-1",
            "company": {
                "name": "Acme",
                "industry": "B2B SaaS Tools",
                "employee_count": 30,
                "revenue_estimate": 5000000,
                "tech_stack": ["Salesforce"]
            },
            "contact": { "title": "VP Operations" },
            "signals": { "recent_funding": true },
            "timing": { "seasonal_factors": true },
            "qualification": { "budget_indicated": true, "custom": { "security_review": true } }
        }"#;
        let lead: LeadRecord = serde_json::from_str(json).unwrap();
        assert_eq!(lead.company.employee_count, Some(30));
        assert_eq!(lead.company.revenue_estimate, Some(5_000_000));
        assert_eq!(lead.contact.title.as_deref(), Some("VP Operations"));
        assert!(lead.signals.recent_funding);
        assert!(!lead.signals.product_launches);
        assert!(lead.timing.seasonal_factors);
        assert_eq!(lead.qualification.custom.get("security_review"), Some(&true));
    }

    #[test]
    fn test_attached_fields_serialize_only_when_set() {
        let mut lead = LeadRecord::default();
        let json = serde_json::to_string(&lead).unwrap();
        assert!(!json.contains("icp_score"));

        lead.icp_score = Some(42.5);
        lead.lead_bucket = Some(Bucket::Warm);
        let json = serde_json::to_string(&lead).unwrap();
        assert!(json.contains("\"icp_score\":42.5"));
        assert!(json.contains("\"lead_bucket\":\"warm\""));
    }

    #[test]
    fn test_counts_accept_floats_and_drop_junk() {
        let json = r#"{"company": {"employee_count": 30.0, "revenue_estimate": 5000000.7}}"#;
        let lead: LeadRecord = serde_json::from_str(json).unwrap();
        assert_eq!(lead.company.employee_count, Some(30));
        assert_eq!(lead.company.revenue_estimate, Some(5_000_000));

        let json = r#"{"company": {"employee_count": "thirty", "revenue_estimate": -5}}"#;
        let lead: LeadRecord = serde_json::from_str(json).unwrap();
        assert_eq!(lead.company.employee_count, None);
        assert_eq!(lead.company.revenue_estimate, None);

        let json = r#"{"company": {"employee_count": null}}"#;
        let lead: LeadRecord = serde_json::from_str(json).unwrap();
        assert_eq!(lead.company.employee_count, None);
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut lead = LeadRecord::default();
        assert_eq!(lead.display_name(), "(unnamed lead)");
        lead.id = Some("lead-7".to_string());
        assert_eq!(lead.display_name(), "lead-7");
        lead.contact.name = Some("Dana".to_string());
        assert_eq!(lead.display_name(), "Dana");
        lead.company.name = Some("Acme".to_string());
        assert_eq!(lead.display_name(), "Acme");
    }

    #[test]
    fn test_bucket_display() {
        assert_eq!(Bucket::Hot.to_string(), "hot");
        assert_eq!(Bucket::Cold.to_string(), "cold");
    }
}
