use anyhow::Result;
use clap::Parser;
use pbrates::core::log::init_logging;
use pbrates::fetcher::DEFAULT_DAYS;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Number of days to fetch, counting back from today (at most 10)
    #[arg(default_value_t = DEFAULT_DAYS, allow_negative_numbers = true)]
    days: i64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long)]
    config_path: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = pbrates::run(cli.days, cli.config_path.as_deref()).await;

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
