use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::icp::{IcpQualityReport, IcpValidation, ParsedIcp};
use crate::lead::{Bucket, LeadRecord};
use crate::scoring::ScoreResult;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with two decimals, e.g. "18.00"
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// Bucket label, colored red/yellow/blue when colors are on
pub fn format_bucket(bucket: Bucket, use_colors: bool) -> String {
    let label = format!("{:<4}", bucket);
    if !use_colors {
        return label;
    }
    match bucket {
        Bucket::Hot => label.red().bold().to_string(),
        Bucket::Warm => label.yellow().to_string(),
        Bucket::Cold => label.blue().to_string(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Qualification column: "Q 85 ok", "Q 40 --", or empty if not qualified yet
fn qualification_cell(lead: &LeadRecord) -> Option<String> {
    match (lead.qualification_score, lead.qualified) {
        (Some(score), Some(qualified)) => Some(format!(
            "Q{:>4} {}",
            score,
            if qualified { "ok" } else { "--" }
        )),
        _ => None,
    }
}

/// Format scored leads as a table with columns: Index, Score, Bucket, Name,
/// and Qualification when present. No headers.
/// Index column: 3 chars (fits "99."), right-aligned
/// Score column is right-aligned, 6 chars wide (fits "100.00")
pub fn format_scored_table(leads: &[LeadRecord], use_colors: bool) -> String {
    if leads.is_empty() {
        return "No leads found.".to_string();
    }

    let term_width = get_terminal_width();

    let index_width = 3;
    let score_width = 6;
    let bucket_width = 4;
    let separator = "  ";

    leads
        .iter()
        .enumerate()
        .map(|(idx, lead)| {
            // 1-based index, right-aligned with trailing dot
            let index_str = format!("{:>2}.", idx + 1);
            let score_str = lead.icp_score.map(format_score).unwrap_or_else(|| "-".to_string());
            let score_padded = format!("{:>width$}", score_str, width = score_width);
            let bucket_str = match lead.lead_bucket {
                Some(bucket) => format_bucket(bucket, use_colors),
                None => format!("{:<width$}", "-", width = bucket_width),
            };
            let qualification = qualification_cell(lead);

            let qual_len = qualification.as_ref().map_or(0, |q| q.len() + separator.len());
            let fixed_width =
                index_width + 1 + score_width + bucket_width + separator.len() * 2 + qual_len;

            let display_name = lead.display_name();
            let name = if let Some(width) = term_width {
                if width > fixed_width + 10 {
                    truncate_name(&display_name, width - fixed_width)
                } else {
                    // Very narrow terminal, show truncated
                    truncate_name(&display_name, 20)
                }
            } else {
                // No terminal (pipe), don't truncate
                display_name
            };

            let mut line = if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    bucket_str,
                    separator,
                    name
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    index_str, score_padded, separator, bucket_str, separator, name
                )
            };

            if let Some(q) = qualification {
                line.push_str(separator);
                line.push_str(&q);
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format scored leads as tab-separated values for scripting
/// Columns: score, bucket, name, id (no headers, no colors)
pub fn format_tsv(leads: &[LeadRecord]) -> String {
    leads
        .iter()
        .map(|lead| {
            format!(
                "{}\t{}\t{}\t{}",
                lead.icp_score.map(format_score).unwrap_or_default(),
                lead.lead_bucket.map(|b| b.to_string()).unwrap_or_default(),
                lead.display_name(),
                lead.id.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Per-category breakdown of a score (for verbose mode)
pub fn format_score_breakdown(result: &ScoreResult, use_colors: bool) -> String {
    let mut lines = Vec::new();
    for sub in result.sub_scores() {
        let header = format!("  {}: {}/100", sub.category, sub.points);
        lines.push(if use_colors {
            header.bold().to_string()
        } else {
            header
        });
        for factor in &sub.factors {
            lines.push(format!("    +{} {}", factor.points, factor.label));
        }
    }
    lines.join("\n")
}

/// Summary of the parsed ICP, its validation and quality estimate
pub fn format_quality_report(
    icp: &ParsedIcp,
    validation: &IcpValidation,
    report: &IcpQualityReport,
    use_colors: bool,
) -> String {
    let status = if validation.is_valid { "Passed" } else { "Failed" };
    let status = match (use_colors, validation.is_valid) {
        (true, true) => status.green().to_string(),
        (true, false) => status.red().to_string(),
        (false, _) => status.to_string(),
    };

    let mut lines = vec![
        format!("Validation: {}", status),
        format!("  {}", validation.message),
        format!("Defined criteria: {}", icp.defined_criteria_count()),
        format!("Market size estimate: {}", report.market_size_estimate),
        format!("Breadth: {}", report.breadth),
        "Suggestions:".to_string(),
    ];
    for (i, suggestion) in report.suggestions.iter().enumerate() {
        lines.push(format!("  {}. {}", i + 1, suggestion));
    }
    lines.join("\n")
}
