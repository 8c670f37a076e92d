//! CLI definitions using clap.

use clap::Parser;

use crate::sync::writer::DEFAULT_BATCH_SIZE;

/// Mirror GitHub issue state into a Smartsheet sheet
#[derive(Parser, Debug)]
#[command(name = "sheetsync", author, version, about, long_about = None)]
pub struct Cli {
    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Smartsheet API token
    #[arg(long, env = "SMARTSHEET_ACCESS_TOKEN", hide_env_values = true)]
    pub sheet_token: Option<String>,

    /// Identifier of the target sheet
    #[arg(long, env = "SMARTSHEET_SHEET_ID")]
    pub sheet_id: Option<String>,

    /// Repository whose issues are mirrored (owner/name)
    #[arg(long, env = "GITHUB_REPO", default_value = "innabox/issues")]
    pub repo: String,

    /// Maximum rows per insert/update request
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Compute and report the plan without writing to the sheet
    #[arg(long)]
    pub dry_run: bool,

    /// Output the final summary as JSON (for scripting)
    #[arg(long)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long)]
    pub quiet: bool,
}
