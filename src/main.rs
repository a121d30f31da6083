//! NameSweep — repairs corrupt file names and hunts for text by line number.
//!
//! Thin binary entry point. All logic lives in the `namesweep-core` crate.

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{render_progress, Cli, Command, LocateArgs, SweepArgs};
use namesweep_core::config::Config;
use namesweep_core::locate;
use namesweep_core::sanitizer;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialise structured logging. Progress lines go to stdout, logs to stderr.
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    let config = cli.load_config().context("loading configuration")?;
    let verbose = cli.verbose > 0;

    match cli.command {
        Command::Sweep(args) => run_sweep(args, config),
        Command::Locate(args) => run_locate(args, config, verbose),
    }
}

fn run_sweep(args: SweepArgs, config: Config) -> anyhow::Result<()> {
    let settings = args.merge(config.sweep);
    let root = settings.root_or_current();
    let options = settings.options();

    tracing::info!("NameSweep sweeping {}", root.display());

    let handle = sanitizer::start_sweep(root.clone(), options.clone());
    for msg in handle.progress_rx.iter() {
        println!("{}", render_progress(&msg, options.dry_run));
    }
    let report = handle
        .join()
        .with_context(|| format!("sweeping {}", root.display()))?;

    println!(
        "{} renamed, {} removed, {} failed, {} skipped ({} entries scanned)",
        report.renamed(),
        report.removed(),
        report.failed(),
        report.skipped(),
        report.entries_scanned
    );

    if let Some(path) = settings.report.as_deref() {
        report
            .write_to(path, settings.report_format)
            .context("writing run report")?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

fn run_locate(args: LocateArgs, config: Config, verbose: bool) -> anyhow::Result<()> {
    let settings = args.merge(config.locate);
    let report = locate::find_matches(&settings)
        .with_context(|| format!("searching {}", settings.root.display()))?;

    for m in &report.matches {
        println!("{}:{}: {}", m.path.display(), m.line, m.text);
    }
    if verbose {
        for f in &report.failures {
            eprintln!("Error reading {}: {}", f.path.display(), f.message);
        }
    }
    if report.matches.is_empty() {
        println!(
            "No matches for {:?} in {} files.",
            settings.needle, report.files_searched
        );
    }

    Ok(())
}
