/// Command-line arguments and the progress printer.
use clap::{ArgAction, Args, Parser, Subcommand};
use namesweep_core::config::{Config, LocateConfig, SweepConfig};
use namesweep_core::report::ReportFormat;
use namesweep_core::sanitizer::progress::SweepProgress;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML file with default settings for both commands
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Strip CR, LF and trailing spaces from file and directory names
    Sweep(SweepArgs),
    /// Find which files contain some text on (or near) a given line
    Locate(LocateArgs),
}

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Directory to clean (default: config `root`, else the current directory)
    pub root: Option<PathBuf>,
    /// Show what would change without touching anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,
    /// Write a report of every action to this file
    #[arg(short, long)]
    pub report: Option<PathBuf>,
    /// Report format: json or csv
    #[arg(long)]
    pub report_format: Option<ReportFormat>,
}

#[derive(Args, Debug)]
pub struct LocateArgs {
    /// Literal text to search for
    pub needle: String,
    /// Directory to search (default: config `root`, else the current directory)
    pub root: Option<PathBuf>,
    /// 1-based line number the text should be on
    #[arg(short, long)]
    pub line: usize,
    /// Also search this many lines either side of --line
    #[arg(long)]
    pub radius: Option<usize>,
    /// File extensions to search, comma separated (default: ts,tsx,js,jsx)
    #[arg(long = "ext", value_delimiter = ',')]
    pub extensions: Vec<String>,
}

impl SweepArgs {
    /// Flags win over the config file.
    pub fn merge(self, file: SweepConfig) -> SweepConfig {
        SweepConfig {
            root: self.root.or(file.root),
            dry_run: self.dry_run || file.dry_run,
            report: self.report.or(file.report),
            report_format: self.report_format.unwrap_or(file.report_format),
        }
    }
}

impl LocateArgs {
    /// Flags win over the config file.
    pub fn merge(self, file: LocateConfig) -> LocateConfig {
        LocateConfig {
            root: self.root.unwrap_or(file.root),
            needle: self.needle,
            line: self.line,
            radius: self.radius.unwrap_or(file.radius),
            extensions: if self.extensions.is_empty() {
                file.extensions
            } else {
                self.extensions
                    .into_iter()
                    .map(|e| e.trim_start_matches('.').to_string())
                    .collect()
            },
        }
    }
}

impl Cli {
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }

    pub fn load_config(&self) -> Result<Config, namesweep_core::error::ConfigError> {
        Config::load_optional(self.config.as_deref())
    }
}

/// Render one progress message as a console line.
pub fn render_progress(msg: &SweepProgress, dry_run: bool) -> String {
    let prefix = if dry_run { "[dry run] " } else { "" };
    let line = match msg {
        SweepProgress::Started { root, .. } => format!("Scanning {}...", root.display()),
        SweepProgress::Renaming { kind, from, to } => {
            format!("Renaming {}: {from} -> {to}", kind.label())
        }
        SweepProgress::RemovedDuplicate { .. } => {
            if dry_run {
                "Target exists, would remove corrupt file.".to_string()
            } else {
                "Target exists, removed corrupt file.".to_string()
            }
        }
        SweepProgress::Failed {
            kind: Some(kind),
            name,
            message,
        } => format!("Failed to rename {} {name}: {message}", kind.label()),
        SweepProgress::Failed {
            kind: None,
            name,
            message,
        } => format!("Failed to read {name}: {message}"),
        SweepProgress::Skipped { path, reason } => {
            format!("Skipped {}: {reason}", path.display())
        }
        SweepProgress::Complete { .. } => "Cleanup complete.".to_string(),
        SweepProgress::Cancelled => "Cleanup cancelled.".to_string(),
    };
    format!("{prefix}{line}")
}
