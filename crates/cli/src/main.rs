//! Park Guide CLI, the main entry point.
//!
//! Commands:
//! - `serve`   Start the web guide
//! - `hours`   Print today's park info
//! - `ask`     Ask the assistant one question
//! - `doctor`  Diagnose configuration, credential and live data
//! - `init`    Create the config directory and default files

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "parkguide",
    about = "Park Guide: quick visitor info and a grounded park assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web guide
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print today's hours, fireworks and notes
    Hours {
        /// Ignore the cache and fetch now
        #[arg(long)]
        refresh: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Ask the assistant a single question
    Ask {
        /// The question
        #[arg(required = true)]
        question: Vec<String>,
    },

    /// Diagnose configuration, credential and live data
    Doctor,

    /// Create the config directory and default files
    Init,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    match cli.command {
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Hours { refresh, json } => commands::hours::run(refresh, json).await?,
        Commands::Ask { question } => commands::ask::run(question.join(" ")).await?,
        Commands::Doctor => commands::doctor::run().await?,
        Commands::Init => commands::init::run()?,
    }

    Ok(())
}
