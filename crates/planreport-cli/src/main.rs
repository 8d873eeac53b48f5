//! planreport - comparative reports for planner experiments
//!
//! Usage:
//!   planreport counter error                     # Exit codes per domain
//!   planreport cactus coverage planner_time      # pgfplots cactus series
//!   planreport per-domain --sort --latex         # Coverage wins per domain
//!   planreport per-task cost --min-wins true     # Cost wins per task
//!   planreport one-vs-others lama                # One algorithm against the rest

use clap::{Parser, Subcommand};
use planreport::attribute::Attribute;
use planreport::config::ReportConfig;
use planreport::experiment::{Experiment, RunSource};
use planreport::report::{
    CactusPlot, CounterReport, OneVsOthersPerDomainComparison, PerDomainComparison,
    PerTaskComparison, Report,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod error;

use error::{CliError, Result};

/// planreport - render reports from a lab properties file
#[derive(Parser)]
#[command(name = "planreport")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Lab properties file (JSON object of run id to run fields)
    #[arg(short, long, global = true, default_value = "properties")]
    properties: PathBuf,

    /// JSON report configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Algorithms to include, in display order (comma separated)
    #[arg(short, long, global = true, value_delimiter = ',')]
    algorithms: Vec<String>,

    /// Log filter when RUST_LOG is unset (e.g. "debug")
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Count attribute values per domain
    Counter {
        /// Attribute to count
        attribute: String,

        /// Count runs without the attribute as "missing"
        #[arg(long)]
        count_missing: bool,
    },

    /// Cumulative successes over time as pgfplots coordinates
    Cactus {
        /// Success indicator attribute
        #[arg(default_value = "coverage")]
        success: String,

        /// Time attribute
        #[arg(default_value = "planner_time")]
        time: String,

        /// Time budget closing every curve
        #[arg(long)]
        horizon: Option<u64>,
    },

    /// Pairwise comparison of per-domain sums
    PerDomain {
        /// Attribute to sum per domain
        #[arg(default_value = "coverage")]
        attribute: String,

        /// Smaller sums win
        #[arg(long)]
        min_wins: Option<bool>,

        /// Order algorithms from weakest to strongest
        #[arg(long)]
        sort: bool,

        /// Decimal places of the total column
        #[arg(long)]
        digits: Option<usize>,

        /// Emit a LaTeX tabular instead of the plain table
        #[arg(long)]
        latex: bool,
    },

    /// Pairwise comparison over tasks all algorithms report
    PerTask {
        /// Attribute to compare
        attribute: String,

        /// true: smaller values win, false: larger values win
        #[arg(long)]
        min_wins: Option<bool>,

        /// Keep the given algorithm order
        #[arg(long)]
        no_sort: bool,
    },

    /// Compare one algorithm against every other, domain by domain
    OneVsOthers {
        /// Reference algorithm (full id or name without driver prefix)
        reference: String,

        /// Attribute to sum per domain
        #[arg(long, default_value = "coverage")]
        attribute: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code()
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => ReportConfig::from_json_file(existing(path)?)?,
        None => ReportConfig::default(),
    };
    if !cli.algorithms.is_empty() {
        config.algorithms = cli.algorithms.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    setup_logging(&config.log_level)?;

    let data = load_experiment(&cli.properties, &config.algorithms)?;
    tracing::info!(
        runs = data.len(),
        algorithms = data.algorithms().len(),
        "loaded {}",
        cli.properties.display()
    );

    let text = match cli.command {
        Commands::Counter {
            attribute,
            count_missing,
        } => CounterReport::new(vec![attribute_with(&attribute, None, config.digits)])?
            .with_count_missing(count_missing || config.count_missing)
            .render(&data)?,
        Commands::Cactus {
            success,
            time,
            horizon,
        } => CactusPlot::new(vec![Attribute::new(success), Attribute::new(time)])?
            .with_horizon(horizon.unwrap_or(config.horizon))
            .render(&data)?,
        Commands::PerDomain {
            attribute,
            min_wins,
            sort,
            digits,
            latex,
        } => {
            let attribute = if attribute == "coverage" && min_wins.is_none() {
                Attribute::coverage()
            } else {
                attribute_with(&attribute, min_wins, None)
            };
            let attribute = match digits.or(config.digits) {
                Some(digits) => attribute.with_digits(digits),
                None => attribute,
            };
            let report = PerDomainComparison::new(vec![attribute])?
                .with_sort(sort || config.sort.unwrap_or(false))
                .with_stddev(config.stddev.clone());
            if latex {
                report.render_latex(&data)
            } else {
                report.render(&data)?
            }
        }
        Commands::PerTask {
            attribute,
            min_wins,
            no_sort,
        } => {
            let sort = if no_sort {
                false
            } else {
                config.sort.unwrap_or(true)
            };
            PerTaskComparison::new(vec![attribute_with(&attribute, min_wins, config.digits)])?
                .with_sort(sort)
                .render(&data)?
        }
        Commands::OneVsOthers {
            reference,
            attribute,
        } => {
            let attribute = if attribute == "coverage" {
                Attribute::coverage()
            } else {
                attribute_with(&attribute, None, config.digits)
            };
            OneVsOthersPerDomainComparison::new(reference)
                .with_attribute(attribute)
                .render(&data)?
        }
    };

    print!("{text}");
    Ok(())
}

fn attribute_with(name: &str, min_wins: Option<bool>, digits: Option<usize>) -> Attribute {
    let mut attribute = Attribute::new(name);
    if let Some(min_wins) = min_wins {
        attribute = attribute.with_min_wins(min_wins);
    }
    if let Some(digits) = digits {
        attribute = attribute.with_digits(digits);
    }
    attribute
}

fn existing(path: &Path) -> Result<&Path> {
    if path.exists() {
        Ok(path)
    } else {
        Err(CliError::FileNotFound(path.to_path_buf()))
    }
}

fn load_experiment(path: &Path, algorithms: &[String]) -> Result<Experiment> {
    let data = Experiment::from_properties_file(existing(path)?)?;
    if algorithms.is_empty() {
        Ok(data)
    } else {
        Ok(data.select(algorithms)?)
    }
}

fn setup_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}
