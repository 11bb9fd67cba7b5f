use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use pathstamp::stamp::{Annotator, Config, RunOutcome, RunStats};

/// Exit status used when the run was interrupted (128 + SIGINT)
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Prepend a relative-path comment to every text source file in a directory tree",
    long_about = None
)]
struct Args {
    /// Directory to process (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Configuration file (defaults to <config dir>/pathstamp/config.toml)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Do not read .stampignore files
    #[arg(long)]
    no_ignore_files: bool,

    /// Print the summary as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Log every skipped file
    #[arg(long, short, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(long, short)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args);

    let mut config = Config::load(args.config.as_deref())?;
    if args.no_ignore_files {
        config.use_ignore_files = false;
    }

    let cancel = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&cancel);
    ctrlc::set_handler(move || {
        handler_flag.store(true, Ordering::SeqCst);
    })
    .context("Failed to install Ctrl+C handler")?;

    let stats = Annotator::from_config(&args.path, &config)
        .with_cancel_flag(cancel)
        .run()
        .with_context(|| format!("Failed to process {}", args.path.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_summary(&stats);
    }

    if stats.outcome == RunOutcome::Interrupted {
        std::process::exit(INTERRUPTED_EXIT_CODE);
    }

    Ok(())
}

fn init_tracing(args: &Args) {
    let default_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_summary(stats: &RunStats) {
    println!("\n{}", "Summary:".bold());
    println!("{}", "=".repeat(50));
    println!("Directory processed: {}", stats.root.display());
    println!("Files processed: {}", stats.files_processed.to_string().green());
    println!("Files skipped: {}", stats.files_skipped.to_string().yellow());

    if stats.files_restored > 0 {
        println!("Files restored from backup: {}", stats.files_restored.to_string().yellow());
    }
    if stats.restore_failures > 0 {
        println!(
            "Files left with a .bak backup: {}",
            stats.restore_failures.to_string().red().bold()
        );
    }

    println!("Duration: {:.2} seconds", stats.duration.as_secs_f64());

    match &stats.outcome {
        RunOutcome::Completed => {}
        RunOutcome::Interrupted => println!("{}", "Run interrupted by user".yellow()),
        RunOutcome::Aborted { reason } => {
            println!("{} {}", "Run stopped early:".red(), reason)
        }
    }
}
