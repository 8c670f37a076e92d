//! sheetsync entry point.

use clap::Parser;
use colored::Colorize;
use sheetsync::cli::Cli;
use sheetsync::config::Config;
use sheetsync::error::Result;
use sheetsync::sync::{self, SyncStats};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    match run(&cli).await {
        Ok(stats) => {
            if !cli.quiet {
                print_summary(&stats, cli.dry_run, cli.json);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            if !cli.quiet {
                if let Some(hint) = e.hint() {
                    eprintln!("Error: {e}\n  Hint: {hint}");
                } else {
                    eprintln!("Error: {e}");
                }
            }
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> Result<SyncStats> {
    let config = Config::resolve(cli)?;
    sync::run(&config).await
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            _ => EnvFilter::new("debug"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn print_summary(stats: &SyncStats, dry_run: bool, json: bool) {
    if json {
        let output = serde_json::json!({
            "success": true,
            "dry_run": dry_run,
            "inserted": stats.inserted,
            "updated": stats.updated,
        });
        println!("{output}");
        return;
    }

    if dry_run {
        println!("{}", "Dry run - no rows written.".yellow().bold());
        println!("  Would insert: {}", stats.inserted);
        println!("  Would update: {}", stats.updated);
        return;
    }

    if stats.is_empty() {
        println!("{}", "Sheet already up to date.".green());
        return;
    }

    println!("{}", "Sync complete.".bold());
    if stats.inserted > 0 {
        println!("  Inserted: {}", stats.inserted);
    }
    if stats.updated > 0 {
        println!("  Updated:  {}", stats.updated);
    }
}
