use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::BTreeSet;

use super::definition::{CriteriaGroup, IcpDefinition};

/// Lowercased, trimmed criterion tokens. Only used for membership tests.
pub type TokenSet = BTreeSet<String>;

static EMPLOYEE_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)-(\d+)\s*employees").expect("valid employee pattern"));

static REVENUE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\$(\d+)([KMB])?-\$(?:(\d+)([KMB])?)?\s*revenue")
        .expect("valid revenue pattern")
});

const COMPANY_KEYS: &[&str] = &[
    "industry_vertical",
    "company_size",
    "geography",
    "technology_stack",
    "business_model",
    "funding_growth",
];
const PERSONA_KEYS: &[&str] = &["decision_maker_profile", "pain_points", "buying_behavior"];
const SIGNAL_KEYS: &[&str] = &["intent_signals", "content_engagement"];

/// Inclusive numeric range. Either end may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NumericRange {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl NumericRange {
    pub fn new(min: u64, max: u64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// True if both ends are known and `value` lies between them.
    pub fn contains(&self, value: u64) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => min <= value && value <= max,
            _ => false,
        }
    }

    pub fn is_defined(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompanyCriteria {
    pub industry_vertical: TokenSet,
    pub employee_count_range: NumericRange,
    pub revenue_range: NumericRange,
    pub geography: TokenSet,
    pub technology_stack: TokenSet,
    pub business_model: TokenSet,
    pub funding_growth: TokenSet,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PersonaCriteria {
    pub decision_maker_profile: TokenSet,
    pub pain_points: TokenSet,
    pub buying_behavior: TokenSet,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SignalCriteria {
    pub intent_signals: TokenSet,
    pub content_engagement: TokenSet,
}

/// Structured form of an [`IcpDefinition`]. Every known criterion is always
/// present, empty when the source text was missing or unparseable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedIcp {
    pub company: CompanyCriteria,
    pub persona: PersonaCriteria,
    pub signals: SignalCriteria,
}

impl ParsedIcp {
    /// Number of criteria carrying at least one token or range endpoint.
    /// The employee and revenue ranges count separately.
    pub fn defined_criteria_count(&self) -> usize {
        let c = &self.company;
        let p = &self.persona;
        let s = &self.signals;

        let sets = [
            &c.industry_vertical,
            &c.geography,
            &c.technology_stack,
            &c.business_model,
            &c.funding_growth,
            &p.decision_maker_profile,
            &p.pain_points,
            &p.buying_behavior,
            &s.intent_signals,
            &s.content_engagement,
        ];
        let ranges = [&c.employee_count_range, &c.revenue_range];

        sets.iter().filter(|set| !set.is_empty()).count()
            + ranges.iter().filter(|range| range.is_defined()).count()
    }
}

/// Parse a raw ICP definition into structured criteria. Never fails.
pub fn parse(definition: &IcpDefinition) -> ParsedIcp {
    log_unknown_keys("company_characteristics", &definition.company_characteristics, COMPANY_KEYS);
    log_unknown_keys("buyer_persona", &definition.buyer_persona, PERSONA_KEYS);
    log_unknown_keys("engagement_signals", &definition.engagement_signals, SIGNAL_KEYS);

    let company_size = definition.company("company_size");

    ParsedIcp {
        company: CompanyCriteria {
            industry_vertical: split_tokens(definition.company("industry_vertical")),
            employee_count_range: parse_employee_range(company_size),
            revenue_range: parse_revenue_range(company_size),
            geography: split_tokens(definition.company("geography")),
            technology_stack: split_tokens(definition.company("technology_stack")),
            business_model: split_tokens(definition.company("business_model")),
            funding_growth: split_tokens(definition.company("funding_growth")),
        },
        persona: PersonaCriteria {
            decision_maker_profile: split_tokens(definition.persona("decision_maker_profile")),
            pain_points: split_tokens(definition.persona("pain_points")),
            buying_behavior: split_tokens(definition.persona("buying_behavior")),
        },
        signals: SignalCriteria {
            intent_signals: split_tokens(definition.signals("intent_signals")),
            content_engagement: split_tokens(definition.signals("content_engagement")),
        },
    }
}

/// Split free text on `,` or `/` into lowercase tokens, dropping empties.
pub fn split_tokens(text: &str) -> TokenSet {
    text.split([',', '/'])
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Extract an employee range such as "10-50 employees".
pub fn parse_employee_range(text: &str) -> NumericRange {
    match EMPLOYEE_RANGE.captures(text) {
        Some(caps) => NumericRange {
            min: caps[1].parse().ok(),
            max: caps[2].parse().ok(),
        },
        None => NumericRange::default(),
    }
}

/// Extract a revenue range such as "$1M-$10M revenue".
///
/// `K`, `M` and `B` scale by 10^3, 10^6 and 10^9. An endpoint with no suffix
/// borrows the other endpoint's, so "$1-$10M revenue" reads as 1M-10M.
pub fn parse_revenue_range(text: &str) -> NumericRange {
    let Some(caps) = REVENUE_RANGE.captures(text) else {
        return NumericRange::default();
    };

    let min_suffix = suffix(&caps, 2);
    let max_suffix = suffix(&caps, 4);

    let min = scale(caps.get(1).map(|m| m.as_str()), min_suffix.or(max_suffix));
    let max = scale(caps.get(3).map(|m| m.as_str()), max_suffix.or(min_suffix));

    NumericRange { min, max }
}

fn suffix(caps: &Captures<'_>, group: usize) -> Option<u64> {
    caps.get(group).map(|m| match m.as_str() {
        "k" | "K" => 1_000,
        "m" | "M" => 1_000_000,
        _ => 1_000_000_000,
    })
}

fn scale(digits: Option<&str>, multiplier: Option<u64>) -> Option<u64> {
    let value: u64 = digits?.parse().ok()?;
    value.checked_mul(multiplier.unwrap_or(1))
}

fn log_unknown_keys(group: &str, criteria: &CriteriaGroup, known: &[&str]) {
    for key in criteria.keys().filter(|key| !known.contains(&key.as_str())) {
        tracing::debug!(group, criterion = %key, "ignoring unrecognized ICP criterion");
    }
}
