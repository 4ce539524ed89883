//! # folio CLI
//!
//! Command-line interface for the folio portfolio site generator.

mod commands;
mod relay;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "folio.yml", env = "FOLIO_CONFIG")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new folio project
    Init {
        /// Target directory (defaults to current directory)
        path: Option<PathBuf>,
    },

    /// Build the static site
    Build,

    /// Start development server with live rebuilds and the contact API
    Dev {
        /// Server port (defaults to server.port from the config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// List industry research items with their canonical links
    Links {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Send a contact message through the configured relay
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        subject: String,

        /// Message body
        message: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Init { path } => commands::init_project(path.as_deref()),
        Commands::Build => commands::build_site(&cli.config),
        Commands::Dev { port } => commands::dev_server(&cli.config, port).await,
        Commands::Links { json } => commands::list_links(&cli.config, json),
        Commands::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let message = folio_core::ContactMessage::new(name, email, subject, message);
            commands::send_contact(&cli.config, message).await
        }
    }
}
