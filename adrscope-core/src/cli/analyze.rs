use crate::conf::{ConfigOverrides, load_config};
use crate::logging::default_report_format;
use crate::pipeline::analyze_file;
use crate::report::{ReportFormat, write_report};
use crate::timeline::MatchPolicy;
use anyhow::{Context, Result};
use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Simulation log to analyze
    pub log: PathBuf,

    /// Path to an analysis config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Max seconds between a send and its confirming receive
    #[arg(long)]
    pub window: Option<f64>,

    /// Data rate assumed before a device's first ADR decision
    #[arg(long)]
    pub baseline_dr: Option<u8>,

    /// Tx power assumed before a device's first ADR decision
    #[arg(long)]
    pub baseline_tx: Option<u8>,

    /// Whether one receive may confirm several sends
    #[arg(long, value_enum)]
    pub match_policy: Option<MatchPolicy>,

    /// Report format (default: pretty on a terminal, JSON otherwise)
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl AnalyzeArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            window_secs: self.window,
            baseline_data_rate: self.baseline_dr,
            baseline_tx_power: self.baseline_tx,
            match_policy: self.match_policy,
        }
    }
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), &args.overrides())
        .context("failed to load analysis config")?;

    let report = analyze_file(&args.log, &config)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let format = args.format.unwrap_or(ReportFormat::Json);
            write_report(&report, format, BufWriter::new(file))?;
            tracing::info!(path = %path.display(), ?format, "report written");
        }
        None => {
            let format = args.format.unwrap_or_else(default_report_format);
            write_report(&report, format, io::stdout().lock())?;
        }
    }

    Ok(())
}
