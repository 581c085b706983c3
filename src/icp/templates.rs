use super::definition::{CriteriaGroup, IcpDefinition};

/// Built-in industry ICP, stored as (criterion, text) pairs per group.
#[derive(Debug, Clone, Copy)]
pub struct IcpTemplate {
    pub name: &'static str,
    company: &'static [(&'static str, &'static str)],
    persona: &'static [(&'static str, &'static str)],
    signals: &'static [(&'static str, &'static str)],
}

impl IcpTemplate {
    pub fn definition(&self) -> IcpDefinition {
        IcpDefinition {
            company_characteristics: to_group(self.company),
            buyer_persona: to_group(self.persona),
            engagement_signals: to_group(self.signals),
        }
    }
}

fn to_group(pairs: &[(&str, &str)]) -> CriteriaGroup {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

pub const TEMPLATES: &[IcpTemplate] = &[
    IcpTemplate {
        name: "B2B SaaS (SMB)",
        company: &[
            ("industry_vertical", "B2B SaaS, Project Management"),
            ("company_size", "10-50 employees, $1M-$10M revenue"),
            ("geography", "North America, Europe (UTC-5 to UTC+2)"),
            ("technology_stack", "Salesforce, HubSpot, Slack"),
            ("business_model", "B2B, Subscription-based"),
            ("funding_growth", "Seed, Series A, Hiring Sales Team"),
        ],
        persona: &[
            ("decision_maker_profile", "VP Operations, Director of Project Management, Mid-Senior"),
            ("pain_points", "Inefficient team collaboration, Lack of project visibility, High tool fragmentation"),
            ("buying_behavior", "6-8 week sales cycle, Cross-departmental approval, $5k-$20k annual budget"),
        ],
        signals: &[
            ("intent_signals", "Job postings for project managers, Recent funding announcements, Tech stack changes to collaboration tools"),
            ("content_engagement", "Downloaded project management whitepapers, Attended collaboration webinars"),
        ],
    },
    IcpTemplate {
        name: "D2C E-commerce (Fashion)",
        company: &[
            ("industry_vertical", "D2C E-commerce, Sustainable Fashion"),
            ("company_size", "50-200 employees, $10M-$50M revenue"),
            ("geography", "North America, Australia (UTC-8 to UTC+10)"),
            ("technology_stack", "Shopify, Klaviyo, Instagram Shopping"),
            ("business_model", "D2C, Direct-to-consumer"),
            ("funding_growth", "Series A, Series B, Expanding to new markets"),
        ],
        persona: &[
            ("decision_maker_profile", "CMO, Director of E-commerce, Senior"),
            ("pain_points", "Low customer retention, High cart abandonment, Ineffective email marketing"),
            ("buying_behavior", "4-6 week sales cycle, Marketing team approval, $10k-$50k annual budget"),
        ],
        signals: &[
            ("intent_signals", "Hiring for e-commerce marketers, Recent product launches, Competitor discount campaigns"),
            ("content_engagement", "Viewed sustainable fashion case studies, Signed up for email newsletters"),
        ],
    },
    IcpTemplate {
        name: "Healthcare Tech (B2B)",
        company: &[
            ("industry_vertical", "Healthcare Technology, Digital Health"),
            ("company_size", "100-500 employees, $20M-$100M revenue"),
            ("geography", "USA (EST, PST), Canada"),
            ("technology_stack", "HL7, FHIR, AWS, Epic, Cerner"),
            ("business_model", "B2B, SaaS, Enterprise"),
            ("funding_growth", "Series B, Series C, Expanding product lines"),
        ],
        persona: &[
            ("decision_maker_profile", "CIO, VP Product, Head of Digital Health, Director of IT, Senior"),
            ("pain_points", "Interoperability challenges, Regulatory compliance (HIPAA), Data security, Legacy system integration"),
            ("buying_behavior", "6-12 month sales cycle, Clinical and IT stakeholder approval, $50k-$200k annual budget"),
        ],
        signals: &[
            ("intent_signals", "New healthcare regulations, Hospital system mergers, EHR upgrades, Funding for digital health initiatives"),
            ("content_engagement", "Downloaded healthcare IT whitepapers, Attended HIMSS conference, Engaged with health tech webinars"),
        ],
    },
    IcpTemplate {
        name: "FinTech (B2B)",
        company: &[
            ("industry_vertical", "Financial Technology, RegTech, Payments"),
            ("company_size", "50-300 employees, $10M-$75M revenue"),
            ("geography", "Global (London, New York, Singapore)"),
            ("technology_stack", "AWS, Azure, Kubernetes, Kafka, Murex"),
            ("business_model", "B2B, SaaS, API-first"),
            ("funding_growth", "Series A, Series B, Expanding into new markets"),
        ],
        persona: &[
            ("decision_maker_profile", "CTO, Head of Compliance, VP Risk, Director of Payments, Senior"),
            ("pain_points", "Regulatory burden (GDPR, PSD2), Fraud detection, Legacy infrastructure, Scalability issues"),
            ("buying_behavior", "8-14 month sales cycle, Legal and Security review, $75k-$300k annual budget"),
        ],
        signals: &[
            ("intent_signals", "New financial regulations, Major security breaches in finance, Partnership announcements, Funding for FinTech startups"),
            ("content_engagement", "Read FinTech trend reports, Attended Money20/20, Engaged with regulatory compliance webinars"),
        ],
    },
    IcpTemplate {
        name: "Enterprise Software (Large Accounts)",
        company: &[
            ("industry_vertical", "Enterprise Software, Cybersecurity"),
            ("company_size", "1000+ employees, $500M+ revenue"),
            ("geography", "Global"),
            ("technology_stack", "AWS, Azure, Kubernetes, Splunk"),
            ("business_model", "B2B, Enterprise License"),
            ("funding_growth", "Publicly Traded, Consistent Revenue Growth"),
        ],
        persona: &[
            ("decision_maker_profile", "CISO, VP IT, Director of Security Operations"),
            ("pain_points", "Data breaches, Compliance issues, Vendor sprawl, Talent shortage"),
            ("buying_behavior", "9-12 month sales cycle, C-level approval, Multi-million dollar budget"),
        ],
        signals: &[
            ("intent_signals", "Regulatory changes, Major security incidents, Competitor product recalls"),
            ("content_engagement", "Attended industry conferences, Read Gartner reports, Engaged with security webinars"),
        ],
    },
];

/// Find a template by name, ignoring ASCII case.
pub fn find(name: &str) -> Option<&'static IcpTemplate> {
    TEMPLATES
        .iter()
        .find(|template| template.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icp::{parse, parser::NumericRange, validate_icp};

    #[test]
    fn test_find_case_insensitive() {
        assert!(find("b2b saas (smb)").is_some());
        assert!(find("  FinTech (B2B) ").is_some());
        assert!(find("Unknown").is_none());
    }

    #[test]
    fn test_all_templates_validate() {
        for template in TEMPLATES {
            let parsed = parse(&template.definition());
            let result = validate_icp(&parsed);
            assert!(result.is_valid, "{} failed: {}", template.name, result.message);
        }
    }

    #[test]
    fn test_template_ranges_parse() {
        let parsed = parse(&find("Healthcare Tech (B2B)").unwrap().definition());
        assert_eq!(
            parsed.company.employee_count_range,
            NumericRange::new(100, 500)
        );
        assert_eq!(
            parsed.company.revenue_range,
            NumericRange::new(20_000_000, 100_000_000)
        );
    }

    #[test]
    fn test_open_ended_template_has_no_ranges() {
        let parsed = parse(&find("Enterprise Software (Large Accounts)").unwrap().definition());
        assert!(!parsed.company.employee_count_range.is_defined());
        assert!(!parsed.company.revenue_range.is_defined());
    }
}
