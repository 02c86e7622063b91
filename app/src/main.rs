#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use std::sync::Arc;

use causerie_config::Config;
use causerie_conversation::SessionManager;
use causerie_core::CompletionProvider;
use causerie_providers::OpenAiProvider;
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "causerie")]
#[command(about = "conversational session manager over a completion provider", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Bind address override
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind } => {
            let config = Config::load()?;
            info!("Loaded config from ~/causerie/config.json");

            let mut provider = OpenAiProvider::new(config.providers.openai.api_key);
            if let Some(base_url) = config.providers.openai.base_url {
                provider = provider.with_base_url(base_url);
            }

            let provider: Arc<dyn CompletionProvider> = Arc::new(provider);
            let manager = Arc::new(SessionManager::new(provider));

            let bind = bind.unwrap_or(config.server.bind);
            causerie_http::serve(&bind, manager).await?;
        }
        Commands::Init => {
            Config::create_config()?;
        }
        Commands::Version => {
            println!("causerie {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
