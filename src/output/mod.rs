pub mod formatter;

pub use formatter::{
    format_bucket, format_quality_report, format_score, format_score_breakdown,
    format_scored_table, format_tsv, should_use_colors,
};
