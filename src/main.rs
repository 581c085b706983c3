use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;

use icp_scorer::config::{self, Config};
use icp_scorer::icp::{self, templates, IcpDefinition};
use icp_scorer::lead::{self, LeadRecord, ScoredBatch};
use icp_scorer::output;
use icp_scorer::qualification::{self, Framework, FrameworkKind, QualificationConfig};
use icp_scorer::scoring::{self, IcpScorer, ScoringConfig};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INVALID_ICP: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Args, Debug)]
struct IcpSource {
    /// ICP definition file (JSON, CSV or YAML)
    #[arg(long, conflicts_with = "template")]
    icp: Option<PathBuf>,

    /// Built-in ICP template name (see `templates`)
    #[arg(long)]
    template: Option<String>,
}

#[derive(Args, Debug)]
struct LeadOutput {
    /// Write scored leads as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print tab-separated values instead of a table
    #[arg(long)]
    tsv: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FrameworkArg {
    Bant,
    Meddic,
    Champ,
    Custom,
}

impl From<FrameworkArg> for FrameworkKind {
    fn from(arg: FrameworkArg) -> Self {
        match arg {
            FrameworkArg::Bant => FrameworkKind::Bant,
            FrameworkArg::Meddic => FrameworkKind::Meddic,
            FrameworkArg::Champ => FrameworkKind::Champ,
            FrameworkArg::Custom => FrameworkKind::Custom,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score leads against the ICP, sorted by score
    Score {
        /// JSON file with an array of leads
        leads: PathBuf,
        #[command(flatten)]
        source: IcpSource,
        #[command(flatten)]
        out: LeadOutput,
    },
    /// Score leads, then keep those passing a qualification framework
    Qualify {
        /// JSON file with an array of leads
        leads: PathBuf,
        #[command(flatten)]
        source: IcpSource,
        #[command(flatten)]
        out: LeadOutput,
        /// Override the configured framework
        #[arg(long, value_enum)]
        framework: Option<FrameworkArg>,
        /// Keep unqualified leads in the output
        #[arg(long)]
        all: bool,
    },
    /// Validate the ICP and estimate how broad it is
    Check {
        #[command(flatten)]
        source: IcpSource,
        /// Also write the resolved ICP to this file (.json, .csv or .yaml)
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// List built-in ICP templates
    Templates,
}

#[derive(Parser, Debug)]
#[command(name = "icp-scorer")]
#[command(about = "Score leads against an Ideal Customer Profile", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/icp-scorer/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "icp_scorer=debug"
    } else {
        "icp_scorer=warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_with(code: i32, message: impl std::fmt::Display) -> ! {
    eprintln!("{}", message);
    std::process::exit(code);
}

/// Resolve the ICP from --template, --icp, or the config's icp_path, in that order.
fn resolve_icp(source: &IcpSource, config: &Config) -> IcpDefinition {
    if let Some(ref name) = source.template {
        return match templates::find(name) {
            Some(template) => {
                tracing::debug!(template = template.name, "using built-in ICP template");
                template.definition()
            }
            None => exit_with(
                EXIT_INPUT,
                format!("Unknown template '{}'. Run `icp-scorer templates` to list them.", name),
            ),
        };
    }

    let path = match source.icp.as_ref().or(config.icp_path.as_ref()) {
        Some(p) => p,
        None => exit_with(
            EXIT_CONFIG,
            "No ICP given. Pass --icp <file> or --template <name>, or set icp_path in the config file.",
        ),
    };

    match config::load_icp(path) {
        Ok(definition) => definition,
        Err(e) => exit_with(EXIT_INPUT, format!("ICP error: {:#}", e)),
    }
}

fn load_leads_or_exit(path: &Path) -> Vec<LeadRecord> {
    match lead::load_leads(path) {
        Ok(leads) => leads,
        Err(e) => exit_with(EXIT_INPUT, format!("Leads error: {:#}", e)),
    }
}

/// Score, bucket and sort leads by score descending.
/// Ties keep input order.
fn score_leads(scorer: &IcpScorer, leads: &mut [LeadRecord], verbose: bool) {
    let validation = icp::validate_icp(scorer.icp());
    if !validation.is_valid {
        tracing::warn!(reason = %validation.message, "ICP failed validation; scores may be low");
    }

    let use_colors = output::should_use_colors();
    let scored = scorer.score_leads_with(leads, |lead, result| {
        if verbose {
            eprintln!("{}", lead.display_name());
            eprintln!("{}", output::format_score_breakdown(result, use_colors));
        }
    });
    if let Err(e) = scored {
        exit_with(
            EXIT_CONFIG,
            format!("Scoring error: {}. Add scoring.buckets to the config file.", e),
        );
    }
    if verbose {
        eprintln!();
    }

    leads.sort_by(|a, b| {
        b.icp_score
            .partial_cmp(&a.icp_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

fn emit_leads(leads: Vec<LeadRecord>, out: &LeadOutput) {
    if out.tsv {
        println!("{}", output::format_tsv(&leads));
    } else {
        let use_colors = output::should_use_colors();
        println!("{}", output::format_scored_table(&leads, use_colors));
    }

    if let Some(ref path) = out.output {
        if let Err(e) = lead::save_scored_batch(path, &ScoredBatch::new(leads)) {
            exit_with(EXIT_INPUT, format!("Output error: {:#}", e));
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => exit_with(EXIT_CONFIG, format!("Config error: {:#}", e)),
    };

    // Validate config at startup, reporting every problem at once
    let effective_scoring = config.scoring.clone().unwrap_or_default();
    let effective_qualification: QualificationConfig =
        config.qualification.clone().unwrap_or_default();

    let mut errors = Vec::new();
    if let Err(e) = scoring::validate_scoring(&effective_scoring) {
        errors.extend(e);
    }
    if let Err(e) = qualification::validate_qualification(&effective_qualification) {
        errors.extend(e);
    }
    if !errors.is_empty() {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    match cli.command {
        Commands::Score { leads, source, out } => {
            let scorer = build_scorer(&source, &config, &effective_scoring);
            let mut leads = load_leads_or_exit(&leads);
            score_leads(&scorer, &mut leads, cli.verbose);
            tracing::info!(leads = leads.len(), elapsed = ?start_time.elapsed(), "done");
            emit_leads(leads, &out);
        }
        Commands::Qualify {
            leads,
            source,
            out,
            framework,
            all,
        } => {
            let mut qualification_config = effective_qualification;
            if let Some(arg) = framework {
                qualification_config.framework = arg.into();
            }
            let framework = match Framework::from_config(&qualification_config) {
                Ok(f) => f,
                Err(e) => exit_with(EXIT_CONFIG, format!("Qualification error: {}", e)),
            };

            let scorer = build_scorer(&source, &config, &effective_scoring);
            let mut leads = load_leads_or_exit(&leads);
            score_leads(&scorer, &mut leads, cli.verbose);

            let total = leads.len();
            let qualified = qualification::qualify_leads(&framework, &mut leads);
            if !all {
                leads = qualification::qualified_leads(leads);
            }
            eprintln!("{} of {} leads qualified ({})", qualified, total, framework);
            emit_leads(leads, &out);
        }
        Commands::Check { source, export } => {
            let definition = resolve_icp(&source, &config);
            if let Some(ref path) = export {
                if let Err(e) = config::save_icp(path, &definition) {
                    exit_with(EXIT_INPUT, format!("Export error: {:#}", e));
                }
            }
            let parsed = icp::parse(&definition);
            let validation = icp::validate_icp(&parsed);
            let report = icp::check_icp_quality(&parsed);
            println!(
                "{}",
                output::format_quality_report(
                    &parsed,
                    &validation,
                    &report,
                    output::should_use_colors()
                )
            );
            if !validation.is_valid {
                std::process::exit(EXIT_INVALID_ICP);
            }
        }
        Commands::Templates => {
            for (i, template) in templates::TEMPLATES.iter().enumerate() {
                println!("{:>2}. {}", i + 1, template.name);
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

fn build_scorer(source: &IcpSource, config: &Config, scoring: &ScoringConfig) -> IcpScorer {
    let definition = resolve_icp(source, config);
    IcpScorer::new(&definition, scoring)
}
