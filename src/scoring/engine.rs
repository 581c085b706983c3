use serde::Serialize;

use super::config::{BucketThresholds, FitWeights, ScoringConfig};
use super::factors::{self, SubScore};
use crate::error::{Result, ScoringError};
use crate::icp::{parse, IcpDefinition, ParsedIcp};
use crate::lead::{Bucket, LeadRecord};

#[derive(Debug, Clone, Serialize)]
pub struct ScoreResult {
    /// Weighted total in [0, 100], rounded to 2 decimals
    pub score: f64,
    pub company: SubScore,
    pub persona: SubScore,
    pub intent: SubScore,
    pub timing: SubScore,
}

impl ScoreResult {
    pub fn sub_scores(&self) -> [&SubScore; 4] {
        [&self.company, &self.persona, &self.intent, &self.timing]
    }
}

/// Bucket tallies for a scored batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketCounts {
    pub hot: usize,
    pub warm: usize,
    pub cold: usize,
}

impl BucketCounts {
    fn record(&mut self, bucket: Bucket) {
        match bucket {
            Bucket::Hot => self.hot += 1,
            Bucket::Warm => self.warm += 1,
            Bucket::Cold => self.cold += 1,
        }
    }
}

/// Scores leads against one parsed ICP.
///
/// The ICP is parsed once at construction and never changes, so a scorer can
/// be shared across threads and called concurrently.
#[derive(Debug, Clone)]
pub struct IcpScorer {
    icp: ParsedIcp,
    weights: FitWeights,
    thresholds: Option<BucketThresholds>,
}

impl IcpScorer {
    pub fn new(definition: &IcpDefinition, config: &ScoringConfig) -> Self {
        Self::from_parsed(parse(definition), config)
    }

    pub fn from_parsed(icp: ParsedIcp, config: &ScoringConfig) -> Self {
        Self {
            icp,
            weights: config.weights.unwrap_or_default(),
            thresholds: config.buckets,
        }
    }

    pub fn icp(&self) -> &ParsedIcp {
        &self.icp
    }

    pub fn score(&self, lead: &LeadRecord) -> ScoreResult {
        let company = factors::company_fit(&lead.company, &self.icp.company);
        let persona = factors::persona_fit(&lead.contact, &self.icp.persona);
        let intent = factors::intent_fit(&lead.signals, &self.icp.signals);
        let timing = factors::timing_fit(&lead.timing);

        let w = &self.weights;
        let total = f64::from(company.points) * w.company
            + f64::from(persona.points) * w.persona
            + f64::from(intent.points) * w.intent
            + f64::from(timing.points) * w.timing;

        let score = round2(total.max(0.0));
        tracing::debug!(
            lead = %lead.display_name(),
            score,
            company = company.points,
            persona = persona.points,
            intent = intent.points,
            timing = timing.points,
            "scored lead"
        );

        ScoreResult {
            score,
            company,
            persona,
            intent,
            timing,
        }
    }

    /// Total score only.
    pub fn score_value(&self, lead: &LeadRecord) -> f64 {
        self.score(lead).score
    }

    pub fn categorize(&self, score: f64) -> Result<Bucket> {
        self.thresholds
            .as_ref()
            .map(|thresholds| categorize(score, thresholds))
            .ok_or(ScoringError::ThresholdsNotConfigured)
    }

    /// Score and bucket every lead, attaching `icp_score` and `lead_bucket`.
    ///
    /// Fails before touching any lead if thresholds are not configured.
    pub fn score_leads(&self, leads: &mut [LeadRecord]) -> Result<BucketCounts> {
        self.score_leads_with(leads, |_, _| {})
    }

    /// Like [`score_leads`](Self::score_leads), handing each lead and its
    /// full result to `inspect` once the fields are attached.
    pub fn score_leads_with<F>(&self, leads: &mut [LeadRecord], mut inspect: F) -> Result<BucketCounts>
    where
        F: FnMut(&LeadRecord, &ScoreResult),
    {
        let thresholds = self.thresholds.ok_or(ScoringError::ThresholdsNotConfigured)?;
        let mut counts = BucketCounts::default();

        for lead in leads.iter_mut() {
            let result = self.score(lead);
            let bucket = categorize(result.score, &thresholds);
            lead.icp_score = Some(result.score);
            lead.lead_bucket = Some(bucket);
            counts.record(bucket);
            inspect(lead, &result);
        }

        tracing::info!(
            leads = leads.len(),
            hot = counts.hot,
            warm = counts.warm,
            cold = counts.cold,
            "scored and categorized leads"
        );
        Ok(counts)
    }
}

/// Map a score to a bucket. Both cutoffs are inclusive.
pub fn categorize(score: f64, thresholds: &BucketThresholds) -> Bucket {
    if score >= thresholds.hot {
        Bucket::Hot
    } else if score >= thresholds.warm {
        Bucket::Warm
    } else {
        Bucket::Cold
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icp::parser::split_tokens;
    use crate::lead::{CompanyProfile, ContactProfile, IntentSignals, TimingSignals};

    fn end_to_end_definition() -> IcpDefinition {
        let mut def = IcpDefinition::default();
        def.company_characteristics
            .insert("industry_vertical".to_string(), "B2B SaaS".to_string());
        def.company_characteristics.insert(
            "company_size".to_string(),
            "10-50 employees, $1M-$10M revenue".to_string(),
        );
        def
    }

    /// ICP where every criterion is matchable, including the competitor
    /// token that text parsing cannot produce.
    fn saturated_icp() -> ParsedIcp {
        let mut def = end_to_end_definition();
        let company = &mut def.company_characteristics;
        company.insert("geography".to_string(), "North America".to_string());
        company.insert("technology_stack".to_string(), "Salesforce".to_string());
        company.insert("funding_growth".to_string(), "Series A".to_string());
        def.buyer_persona
            .insert("decision_maker_profile".to_string(), "VP, Senior, Sales".to_string());
        def.buyer_persona
            .insert("buying_behavior".to_string(), "budget owner".to_string());

        let mut icp = parse(&def);
        icp.signals.intent_signals = split_tokens(
            "funding announcements, job postings, technology changes, product launches",
        );
        icp.signals
            .intent_signals
            .insert("competitive wins/losses".to_string());
        icp
    }

    fn saturated_lead() -> LeadRecord {
        LeadRecord {
            company: CompanyProfile {
                industry: Some("B2B SaaS Tools".to_string()),
                employee_count: Some(30),
                revenue_estimate: Some(5_000_000),
                geography: Some("North America (EST)".to_string()),
                tech_stack: vec!["Salesforce".to_string()],
                growth_indicators: vec!["Series A".to_string()],
                ..Default::default()
            },
            contact: ContactProfile {
                title: Some("VP Operations".to_string()),
                seniority: Some("Senior".to_string()),
                department: Some("Sales".to_string()),
                authority_level: Some("Budget Owner".to_string()),
                ..Default::default()
            },
            signals: IntentSignals {
                recent_funding: true,
                hiring_relevant_roles: true,
                tech_stack_changes: true,
                competitor_mentions: true,
                product_launches: true,
            },
            timing: TimingSignals {
                fiscal_calendar_alignment: true,
                recent_trigger_events: true,
                seasonal_factors: true,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_no_matching_criteria_scores_zero() {
        let scorer = IcpScorer::new(&end_to_end_definition(), &ScoringConfig::default());
        let lead = LeadRecord {
            company: CompanyProfile {
                industry: Some("Retail".to_string()),
                employee_count: Some(5000),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(scorer.score_value(&lead), 0.0);
        assert_eq!(scorer.score_value(&LeadRecord::default()), 0.0);
    }

    #[test]
    fn test_saturated_lead_scores_hundred() {
        let scorer = IcpScorer::from_parsed(saturated_icp(), &ScoringConfig::default());
        let result = scorer.score(&saturated_lead());
        for sub in result.sub_scores() {
            assert_eq!(sub.points, 100, "{} not saturated", sub.category);
        }
        assert_eq!(result.score, 100.0);
    }

    #[test]
    fn test_end_to_end_company_only() {
        let scorer = IcpScorer::new(&end_to_end_definition(), &ScoringConfig::default());
        let lead = LeadRecord {
            company: CompanyProfile {
                industry: Some("B2B SaaS Tools".to_string()),
                employee_count: Some(30),
                revenue_estimate: Some(5_000_000),
                ..Default::default()
            },
            ..Default::default()
        };
        let result = scorer.score(&lead);
        assert_eq!(result.company.points, 45);
        assert_eq!(result.persona.points, 0);
        assert_eq!(result.score, 18.0);
    }

    #[test]
    fn test_score_is_idempotent() {
        let scorer = IcpScorer::from_parsed(saturated_icp(), &ScoringConfig::default());
        let mut lead = saturated_lead();
        lead.timing.seasonal_factors = false;
        let first = scorer.score_value(&lead);
        let second = scorer.score_value(&lead);
        assert_eq!(first, second);
        assert_eq!(first, 97.0);
    }

    #[test]
    fn test_custom_weights() {
        let config = ScoringConfig {
            weights: Some(FitWeights {
                company: 1.0,
                persona: 0.0,
                intent: 0.0,
                timing: 0.0,
            }),
            buckets: None,
        };
        let scorer = IcpScorer::new(&end_to_end_definition(), &config);
        let lead = LeadRecord {
            company: CompanyProfile {
                industry: Some("b2b saas".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(scorer.score_value(&lead), 25.0);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        let config = ScoringConfig {
            weights: Some(FitWeights {
                company: 1.0 / 3.0,
                persona: 1.0 / 3.0,
                intent: 1.0 / 3.0,
                timing: 0.0,
            }),
            buckets: None,
        };
        let scorer = IcpScorer::new(&end_to_end_definition(), &config);
        let lead = LeadRecord {
            company: CompanyProfile {
                industry: Some("B2B SaaS".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(scorer.score_value(&lead), 8.33);
    }

    #[test]
    fn test_categorize_thresholds() {
        let thresholds = BucketThresholds {
            hot: 80.0,
            warm: 50.0,
        };
        assert_eq!(categorize(85.0, &thresholds), Bucket::Hot);
        assert_eq!(categorize(80.0, &thresholds), Bucket::Hot);
        assert_eq!(categorize(60.0, &thresholds), Bucket::Warm);
        assert_eq!(categorize(50.0, &thresholds), Bucket::Warm);
        assert_eq!(categorize(10.0, &thresholds), Bucket::Cold);
    }

    #[test]
    fn test_categorize_without_thresholds_errors() {
        let config = ScoringConfig {
            weights: None,
            buckets: None,
        };
        let scorer = IcpScorer::new(&IcpDefinition::default(), &config);
        assert_eq!(
            scorer.categorize(90.0),
            Err(ScoringError::ThresholdsNotConfigured)
        );
        assert_eq!(
            ScoringError::ThresholdsNotConfigured.to_string(),
            "thresholds not configured"
        );
    }

    #[test]
    fn test_score_leads_attaches_fields() {
        let scorer = IcpScorer::from_parsed(saturated_icp(), &ScoringConfig::default());
        let mut leads = vec![saturated_lead(), LeadRecord::default()];
        let counts = scorer.score_leads(&mut leads).unwrap();

        assert_eq!(counts, BucketCounts { hot: 1, warm: 0, cold: 1 });
        assert_eq!(leads[0].icp_score, Some(100.0));
        assert_eq!(leads[0].lead_bucket, Some(Bucket::Hot));
        assert_eq!(leads[1].icp_score, Some(0.0));
        assert_eq!(leads[1].lead_bucket, Some(Bucket::Cold));
    }

    #[test]
    fn test_score_leads_with_sees_each_result_once() {
        let scorer = IcpScorer::from_parsed(saturated_icp(), &ScoringConfig::default());
        let mut leads = vec![saturated_lead(), LeadRecord::default()];

        let mut seen = Vec::new();
        scorer
            .score_leads_with(&mut leads, |lead, result| {
                assert_eq!(lead.icp_score, Some(result.score));
                seen.push((result.score, result.company.points));
            })
            .unwrap();

        assert_eq!(seen, vec![(100.0, 100), (0.0, 0)]);
    }

    #[test]
    fn test_score_leads_without_thresholds_leaves_leads_untouched() {
        let config = ScoringConfig {
            weights: None,
            buckets: None,
        };
        let scorer = IcpScorer::from_parsed(saturated_icp(), &config);
        let mut leads = vec![saturated_lead()];
        assert!(scorer.score_leads(&mut leads).is_err());
        assert!(leads[0].icp_score.is_none());
    }

    #[test]
    fn test_scorer_is_shareable_across_threads() {
        let scorer = std::sync::Arc::new(IcpScorer::from_parsed(
            saturated_icp(),
            &ScoringConfig::default(),
        ));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let scorer = std::sync::Arc::clone(&scorer);
                std::thread::spawn(move || scorer.score_value(&saturated_lead()))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 100.0);
        }
    }
}
