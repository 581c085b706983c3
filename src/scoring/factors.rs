use serde::Serialize;
use std::fmt;

use crate::icp::parser::{
    CompanyCriteria, NumericRange, PersonaCriteria, SignalCriteria, TokenSet,
};
use crate::lead::{CompanyProfile, ContactProfile, IntentSignals, TimingSignals};

/// Sub-scores are capped at this many points before weighting.
pub const SUB_SCORE_CAP: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FitCategory {
    Company,
    Persona,
    Intent,
    Timing,
}

impl fmt::Display for FitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FitCategory::Company => "Company fit",
            FitCategory::Persona => "Persona fit",
            FitCategory::Intent => "Intent signals",
            FitCategory::Timing => "Timing",
        })
    }
}

/// One matched criterion and the points it earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactorContribution {
    pub label: &'static str, // e.g. "Industry", "Title"
    pub points: u32,
}

/// Points earned in one category, capped at [`SUB_SCORE_CAP`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubScore {
    pub category: FitCategory,
    pub points: u32,
    pub factors: Vec<FactorContribution>,
}

impl SubScore {
    fn tally(category: FitCategory, checks: &[(&'static str, u32, bool)]) -> Self {
        let factors: Vec<_> = checks
            .iter()
            .filter(|(_, _, matched)| *matched)
            .map(|&(label, points, _)| FactorContribution { label, points })
            .collect();
        let points = factors
            .iter()
            .map(|f| f.points)
            .sum::<u32>()
            .min(SUB_SCORE_CAP);

        Self {
            category,
            points,
            factors,
        }
    }
}

pub fn company_fit(company: &CompanyProfile, icp: &CompanyCriteria) -> SubScore {
    SubScore::tally(
        FitCategory::Company,
        &[
            ("Industry", 25, contains_any_token(company.industry.as_deref(), &icp.industry_vertical)),
            ("Employee count", 10, in_range(company.employee_count, &icp.employee_count_range)),
            ("Revenue", 10, in_range(company.revenue_estimate, &icp.revenue_range)),
            ("Geography", 15, contains_any_token(company.geography.as_deref(), &icp.geography)),
            ("Tech stack", 20, intersects(&company.tech_stack, &icp.technology_stack)),
            ("Growth indicators", 20, intersects(&company.growth_indicators, &icp.funding_growth)),
        ],
    )
}

pub fn persona_fit(contact: &ContactProfile, icp: &PersonaCriteria) -> SubScore {
    let decision_makers = &icp.decision_maker_profile;
    SubScore::tally(
        FitCategory::Persona,
        &[
            ("Title", 30, contains_any_token(contact.title.as_deref(), decision_makers)),
            ("Seniority", 25, contains_any_token(contact.seniority.as_deref(), decision_makers)),
            ("Department", 25, contains_any_token(contact.department.as_deref(), decision_makers)),
            (
                "Authority level",
                20,
                contains_any_token(contact.authority_level.as_deref(), &icp.buying_behavior),
            ),
        ],
    )
}

/// Each observed signal counts only if the ICP lists it as an intent signal.
pub fn intent_fit(signals: &IntentSignals, icp: &SignalCriteria) -> SubScore {
    let wanted = |name: &str| icp.intent_signals.contains(name);
    SubScore::tally(
        FitCategory::Intent,
        &[
            ("Recent funding", 30, signals.recent_funding && wanted("funding announcements")),
            ("Hiring relevant roles", 25, signals.hiring_relevant_roles && wanted("job postings")),
            ("Tech stack changes", 20, signals.tech_stack_changes && wanted("technology changes")),
            (
                "Competitor mentions",
                15,
                signals.competitor_mentions && wanted("competitive wins/losses"),
            ),
            ("Product launches", 10, signals.product_launches && wanted("product launches")),
        ],
    )
}

pub fn timing_fit(timing: &TimingSignals) -> SubScore {
    SubScore::tally(
        FitCategory::Timing,
        &[
            ("Fiscal calendar alignment", 30, timing.fiscal_calendar_alignment),
            ("Recent trigger events", 40, timing.recent_trigger_events),
            ("Seasonal factors", 30, timing.seasonal_factors),
        ],
    )
}

/// True if the lowercased value contains any token as a substring.
fn contains_any_token(value: Option<&str>, tokens: &TokenSet) -> bool {
    match value.map(str::to_lowercase) {
        Some(value) if !value.is_empty() => tokens.iter().any(|t| value.contains(t.as_str())),
        _ => false,
    }
}

/// True if any lead value, lowercased, is exactly one of the tokens.
fn intersects(values: &[String], tokens: &TokenSet) -> bool {
    values
        .iter()
        .any(|v| tokens.contains(&v.trim().to_lowercase()))
}

/// Zero counts as unknown, same as a missing value.
fn in_range(value: Option<u64>, range: &NumericRange) -> bool {
    matches!(value, Some(v) if v > 0 && range.contains(v))
}
