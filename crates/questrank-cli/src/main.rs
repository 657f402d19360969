mod render;
mod run;

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "questrank")]
#[command(about = "Counts completed quests from public profile pages and ranks participants")]
pub(crate) struct Cli {
    /// Local roster CSV; downloads the configured sheet when omitted.
    #[arg(short = 'i', long)]
    pub input_file: Option<PathBuf>,

    /// Filter config (skip-list, date window, location buckets).
    #[arg(long)]
    pub filters: Option<PathBuf>,

    /// First earned date that counts (YYYY-MM-DD, or "none" for unbounded).
    #[arg(long)]
    pub start_date: Option<String>,

    /// Last earned date that counts (YYYY-MM-DD, or "none" for unbounded).
    #[arg(long)]
    pub end_date: Option<String>,

    /// Where to write the text report.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Print full email addresses instead of masked ones.
    #[arg(long)]
    pub show_emails: bool,

    /// Cap on concurrent profile-page fetches.
    #[arg(long)]
    pub max_concurrent: Option<usize>,

    /// Process only the first N roster entries (for test runs).
    #[arg(long)]
    pub limit: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = questrank_core::load_app_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();
    run::run(&config, &cli).await
}
