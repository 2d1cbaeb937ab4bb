use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod report;
mod upload;

#[derive(Debug, Parser)]
#[command(name = "uplister")]
#[command(about = "Normalize product feeds and bulk-create listings on a Spree admin console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Normalize a feed and submit every product to the admin console.
    Upload(upload::UploadArgs),
    /// Normalize a feed and print the result without submitting anything.
    Normalize(upload::NormalizeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Upload(args) => upload::run(&args).await,
        Commands::Normalize(args) => upload::normalize_only(&args),
    }
}
