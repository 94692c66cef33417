//! techquiz CLI — terminal front-end for the technical-English scenario trainer.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use techquiz_core::model::Level;

mod commands;

#[derive(Parser)]
#[command(
    name = "techquiz",
    version,
    about = "Technical-English scenario trainer backed by an LLM"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive quiz in the terminal
    Play {
        /// Start directly at this level (A, B or C)
        #[arg(long)]
        level: Option<Level>,

        /// Provider to generate scenarios with
        #[arg(long)]
        provider: Option<String>,

        /// Model to use
        #[arg(long)]
        model: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate one scenario and print it as JSON
    Generate {
        /// Level (A, B or C)
        #[arg(long)]
        level: Level,

        /// Provider to generate the scenario with
        #[arg(long)]
        provider: Option<String>,

        /// Model to use
        #[arg(long)]
        model: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Mark glossary terms in a piece of text
    Annotate {
        /// Text to annotate
        text: String,

        /// Extra glossary TOML merged over the built-in terms
        #[arg(long)]
        glossary: Option<PathBuf>,
    },

    /// List glossary terms and definitions
    Glossary {
        /// Extra glossary TOML merged over the built-in terms
        #[arg(long)]
        glossary: Option<PathBuf>,
    },

    /// List available models
    ListModels {
        /// Filter to specific provider
        #[arg(long)]
        provider: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter techquiz.toml
    Init,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout belongs to the quiz screen.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("techquiz=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            level,
            provider,
            model,
            config,
        } => commands::play::execute(level, provider, model, config).await,
        Commands::Generate {
            level,
            provider,
            model,
            config,
        } => commands::generate::execute(level, provider, model, config).await,
        Commands::Annotate { text, glossary } => commands::annotate::execute(&text, glossary),
        Commands::Glossary { glossary } => commands::glossary::execute(glossary),
        Commands::ListModels { provider, config } => {
            commands::list_models::execute(provider, config).await
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
