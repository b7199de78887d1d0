//! appinit hello server
//!
//! Serves the `Echo` procedure until SIGINT or SIGTERM.

use appinit_server::run;
use clap::Parser;

/// Command line interface for the hello server
#[derive(Parser, Debug)]
#[command(name = "appinit-server")]
#[command(about = "appinit - hello service wired through constructors")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (TOML or YAML)
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Make one echo call through the outbound client after start
    #[arg(long, value_name = "MESSAGE")]
    pub call: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    run(cli.config.as_deref(), cli.call).await
}
