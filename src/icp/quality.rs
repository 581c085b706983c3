use serde::Serialize;
use std::fmt;

use super::parser::ParsedIcp;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IcpValidation {
    pub is_valid: bool,
    pub message: String,
}

impl IcpValidation {
    fn invalid(message: &str) -> Self {
        Self {
            is_valid: false,
            message: message.to_string(),
        }
    }
}

/// Rough count of companies an ICP addresses, derived from how many criteria
/// it defines. More criteria means a narrower market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarketSize {
    VeryBroad,
    Broad,
    Medium,
    Niche,
    VeryNiche,
}

impl MarketSize {
    pub fn from_criteria_count(count: usize) -> Self {
        match count {
            0..=2 => MarketSize::VeryBroad,
            3..=5 => MarketSize::Broad,
            6..=8 => MarketSize::Medium,
            9..=11 => MarketSize::Niche,
            _ => MarketSize::VeryNiche,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarketSize::VeryBroad => "10,000,000+",
            MarketSize::Broad => "1,000,000 - 10,000,000",
            MarketSize::Medium => "100,000 - 1,000,000",
            MarketSize::Niche => "10,000 - 100,000",
            MarketSize::VeryNiche => "1,000 - 10,000",
        }
    }
}

impl fmt::Display for MarketSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Breadth {
    TooBroad,
    WellDefined,
    VeryNiche,
}

impl fmt::Display for Breadth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Breadth::TooBroad => "Too Broad",
            Breadth::WellDefined => "Well-defined",
            Breadth::VeryNiche => "Very Niche",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IcpQualityReport {
    pub market_size_estimate: MarketSize,
    pub breadth: Breadth,
    pub suggestions: Vec<String>,
}

/// Check that an ICP defines enough to score against.
/// Returns the first problem found.
pub fn validate_icp(icp: &ParsedIcp) -> IcpValidation {
    let company = &icp.company;
    let company_defined = !company.industry_vertical.is_empty()
        || company.employee_count_range.is_defined()
        || company.revenue_range.is_defined()
        || !company.geography.is_empty()
        || !company.technology_stack.is_empty()
        || !company.business_model.is_empty()
        || !company.funding_growth.is_empty();
    if !company_defined {
        return IcpValidation::invalid(
            "Company characteristics are not sufficiently defined in the ICP.",
        );
    }

    let persona = &icp.persona;
    if persona.decision_maker_profile.is_empty()
        && persona.pain_points.is_empty()
        && persona.buying_behavior.is_empty()
    {
        return IcpValidation::invalid("Buyer persona is not sufficiently defined in the ICP.");
    }

    if icp.signals.intent_signals.is_empty() && icp.signals.content_engagement.is_empty() {
        return IcpValidation::invalid(
            "Engagement signals are not sufficiently defined in the ICP.",
        );
    }

    if company.industry_vertical.is_empty() {
        return IcpValidation::invalid("ICP is missing target industries.");
    }

    if persona.decision_maker_profile.is_empty() {
        return IcpValidation::invalid("ICP is missing target decision maker profiles.");
    }

    IcpValidation {
        is_valid: true,
        message: "ICP looks good!".to_string(),
    }
}

pub fn estimate_market_size(icp: &ParsedIcp) -> MarketSize {
    MarketSize::from_criteria_count(icp.defined_criteria_count())
}

pub fn check_icp_quality(icp: &ParsedIcp) -> IcpQualityReport {
    let market_size = estimate_market_size(icp);

    let (breadth, suggestion) = match market_size {
        MarketSize::VeryBroad => (
            Breadth::TooBroad,
            "Consider adding more specific criteria for industry, company size, or geography to narrow down the ICP.",
        ),
        MarketSize::VeryNiche => (
            Breadth::VeryNiche,
            "Your ICP is very niche. Ensure this is intentional. You might consider broadening some criteria to increase the addressable market.",
        ),
        MarketSize::Broad | MarketSize::Medium | MarketSize::Niche => (
            Breadth::WellDefined,
            "Your ICP appears well-defined. Continue to monitor lead quality and adjust as needed.",
        ),
    };

    IcpQualityReport {
        market_size_estimate: market_size,
        breadth,
        suggestions: vec![suggestion.to_string()],
    }
}
