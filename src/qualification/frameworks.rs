use serde::Serialize;
use std::fmt;

use super::config::{CustomRubric, FrameworkKind, QualificationConfig};
use crate::error::{Result, ScoringError};
use crate::lead::{LeadRecord, QualificationData};

/// A sales qualification rubric. Each variant yields its own [`Rubric`].
#[derive(Debug, Clone, PartialEq)]
pub enum Framework {
    /// Budget, Authority, Need, Timeline
    Bant,
    /// Metrics, Economic buyer, Decision criteria, Decision process,
    /// Identify pain, Champion
    Meddic,
    /// Challenges, Authority, Money, Prioritization
    Champ,
    Custom(CustomRubric),
}

type Check<'a> = Box<dyn Fn(&QualificationData) -> bool + Send + Sync + 'a>;

pub struct Criterion<'a> {
    pub label: &'a str,
    pub points: u32,
    check: Check<'a>,
}

impl<'a> Criterion<'a> {
    fn new(
        label: &'a str,
        points: u32,
        check: impl Fn(&QualificationData) -> bool + Send + Sync + 'a,
    ) -> Self {
        Self {
            label,
            points,
            check: Box::new(check),
        }
    }
}

/// Weighted checklist with a pass mark.
pub struct Rubric<'a> {
    pub criteria: Vec<Criterion<'a>>,
    pub pass_score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualificationOutcome {
    pub score: u32,
    pub qualified: bool,
    pub matched: Vec<String>,
}

impl Rubric<'_> {
    pub fn evaluate(&self, data: &QualificationData) -> QualificationOutcome {
        let matched: Vec<&Criterion<'_>> =
            self.criteria.iter().filter(|c| (c.check)(data)).collect();
        let score: u32 = matched.iter().map(|c| c.points).sum();

        QualificationOutcome {
            score,
            qualified: score >= self.pass_score,
            matched: matched.iter().map(|c| c.label.to_string()).collect(),
        }
    }
}

impl Framework {
    pub fn from_config(config: &QualificationConfig) -> Result<Self> {
        match config.framework {
            FrameworkKind::Bant => Ok(Framework::Bant),
            FrameworkKind::Meddic => Ok(Framework::Meddic),
            FrameworkKind::Champ => Ok(Framework::Champ),
            FrameworkKind::Custom => config
                .custom
                .clone()
                .map(Framework::Custom)
                .ok_or(ScoringError::MissingCustomRubric),
        }
    }

    pub fn rubric(&self) -> Rubric<'_> {
        match self {
            Framework::Bant => Rubric {
                criteria: vec![
                    Criterion::new("Budget", 30, |d| d.budget_indicated),
                    Criterion::new("Authority", 30, |d| {
                        is_one_of(&d.contact_authority, &["Decision Maker", "Influencer"])
                    }),
                    Criterion::new("Need", 25, |d| d.identified_need),
                    Criterion::new("Timeline", 15, |d| {
                        is_one_of(&d.purchase_timeline, &["0-3 months", "3-6 months"])
                    }),
                ],
                pass_score: 70,
            },
            Framework::Meddic => Rubric {
                criteria: vec![
                    Criterion::new("Metrics", 20, |d| d.business_metrics),
                    Criterion::new("Economic buyer", 20, |d| {
                        is_one_of(&d.contact_role, &["Economic Buyer"])
                    }),
                    Criterion::new("Decision criteria", 15, |d| d.decision_criteria),
                    Criterion::new("Decision process", 15, |d| d.decision_process),
                    Criterion::new("Identified pain", 15, |d| d.identified_pain),
                    Criterion::new("Champion", 15, |d| d.internal_champion),
                ],
                pass_score: 80,
            },
            Framework::Champ => Rubric {
                criteria: vec![
                    Criterion::new("Challenges", 30, |d| d.identified_challenges),
                    Criterion::new("Authority", 30, |d| {
                        is_one_of(&d.contact_authority, &["Decision Maker"])
                    }),
                    Criterion::new("Money", 25, |d| d.budget_approved),
                    Criterion::new("Prioritization", 15, |d| {
                        is_one_of(&d.initiative_priority, &["High"])
                    }),
                ],
                pass_score: 75,
            },
            Framework::Custom(rubric) => Rubric {
                criteria: rubric
                    .criteria
                    .iter()
                    .map(|c| {
                        let flag = c.flag.as_str();
                        Criterion::new(flag, c.points, move |d| {
                            d.custom.get(flag).copied().unwrap_or(false)
                        })
                    })
                    .collect(),
                pass_score: rubric.pass_score,
            },
        }
    }

    pub fn qualify(&self, lead: &LeadRecord) -> QualificationOutcome {
        self.rubric().evaluate(&lead.qualification)
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Framework::Bant => "BANT",
            Framework::Meddic => "MEDDIC",
            Framework::Champ => "CHAMP",
            Framework::Custom(_) => "Custom",
        })
    }
}

fn is_one_of(value: &Option<String>, accepted: &[&str]) -> bool {
    value
        .as_deref()
        .map(str::trim)
        .is_some_and(|v| accepted.iter().any(|a| a.eq_ignore_ascii_case(v)))
}

/// Attach `qualification_score` and `qualified` to every lead.
/// Returns how many qualified.
pub fn qualify_leads(framework: &Framework, leads: &mut [LeadRecord]) -> usize {
    let rubric = framework.rubric();
    let mut qualified = 0;

    for lead in leads.iter_mut() {
        let outcome = rubric.evaluate(&lead.qualification);
        tracing::debug!(
            lead = %lead.display_name(),
            framework = %framework,
            score = outcome.score,
            qualified = outcome.qualified,
            "qualified lead"
        );
        lead.qualification_score = Some(outcome.score);
        lead.qualified = Some(outcome.qualified);
        if outcome.qualified {
            qualified += 1;
        }
    }

    tracing::info!(
        framework = %framework,
        qualified,
        total = leads.len(),
        "qualification complete"
    );
    qualified
}

/// Keep only leads marked as qualified.
pub fn qualified_leads(leads: Vec<LeadRecord>) -> Vec<LeadRecord> {
    leads
        .into_iter()
        .filter(|lead| lead.qualified == Some(true))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qualification::config::CustomCriterion;

    fn lead_with(data: QualificationData) -> LeadRecord {
        LeadRecord {
            qualification: data,
            ..Default::default()
        }
    }

    #[test]
    fn test_bant_full_marks() {
        let lead = lead_with(QualificationData {
            budget_indicated: true,
            contact_authority: Some("Decision Maker".to_string()),
            identified_need: true,
            purchase_timeline: Some("0-3 months".to_string()),
            ..Default::default()
        });
        let outcome = Framework::Bant.qualify(&lead);
        assert_eq!(outcome.score, 100);
        assert!(outcome.qualified);
        assert_eq!(outcome.matched, vec!["Budget", "Authority", "Need", "Timeline"]);
    }

    #[test]
    fn test_bant_pass_boundary() {
        // 30 + 25 + 15 = 70, exactly the pass mark
        let lead = lead_with(QualificationData {
            budget_indicated: true,
            identified_need: true,
            purchase_timeline: Some("3-6 months".to_string()),
            ..Default::default()
        });
        let outcome = Framework::Bant.qualify(&lead);
        assert_eq!(outcome.score, 70);
        assert!(outcome.qualified);
    }

    #[test]
    fn test_bant_influencer_counts_as_authority() {
        let lead = lead_with(QualificationData {
            contact_authority: Some("influencer".to_string()),
            ..Default::default()
        });
        assert_eq!(Framework::Bant.qualify(&lead).score, 30);
    }

    #[test]
    fn test_meddic_needs_eighty() {
        let lead = lead_with(QualificationData {
            business_metrics: true,
            contact_role: Some("Economic Buyer".to_string()),
            decision_criteria: true,
            decision_process: true,
            ..Default::default()
        });
        let outcome = Framework::Meddic.qualify(&lead);
        assert_eq!(outcome.score, 70);
        assert!(!outcome.qualified);

        let mut lead = lead;
        lead.qualification.identified_pain = true;
        let outcome = Framework::Meddic.qualify(&lead);
        assert_eq!(outcome.score, 85);
        assert!(outcome.qualified);
    }

    #[test]
    fn test_champ_influencer_is_not_authority() {
        let lead = lead_with(QualificationData {
            identified_challenges: true,
            contact_authority: Some("Influencer".to_string()),
            budget_approved: true,
            initiative_priority: Some("High".to_string()),
            ..Default::default()
        });
        let outcome = Framework::Champ.qualify(&lead);
        assert_eq!(outcome.score, 70);
        assert!(!outcome.qualified);
    }

    #[test]
    fn test_custom_rubric() {
        let framework = Framework::Custom(CustomRubric {
            pass_score: 60,
            criteria: vec![
                CustomCriterion {
                    flag: "security_review_passed".to_string(),
                    points: 40,
                },
                CustomCriterion {
                    flag: "pilot_requested".to_string(),
                    points: 30,
                },
            ],
        });
        let mut lead = LeadRecord::default();
        lead.qualification
            .custom
            .insert("security_review_passed".to_string(), true);
        lead.qualification
            .custom
            .insert("pilot_requested".to_string(), false);
        let outcome = framework.qualify(&lead);
        assert_eq!(outcome.score, 40);
        assert!(!outcome.qualified);

        lead.qualification
            .custom
            .insert("pilot_requested".to_string(), true);
        assert!(framework.qualify(&lead).qualified);
    }

    #[test]
    fn test_from_config_custom_requires_rubric() {
        let config = QualificationConfig {
            framework: FrameworkKind::Custom,
            custom: None,
        };
        assert_eq!(
            Framework::from_config(&config),
            Err(ScoringError::MissingCustomRubric)
        );
        assert_eq!(
            Framework::from_config(&QualificationConfig::default()),
            Ok(Framework::Bant)
        );
    }

    #[test]
    fn test_qualify_leads_and_filter() {
        let strong = lead_with(QualificationData {
            budget_indicated: true,
            contact_authority: Some("Decision Maker".to_string()),
            identified_need: true,
            ..Default::default()
        });
        let weak = LeadRecord::default();
        let mut leads = vec![strong, weak];

        let count = qualify_leads(&Framework::Bant, &mut leads);
        assert_eq!(count, 1);
        assert_eq!(leads[0].qualification_score, Some(85));
        assert_eq!(leads[1].qualified, Some(false));

        let kept = qualified_leads(leads);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].qualification_score, Some(85));
    }
}
