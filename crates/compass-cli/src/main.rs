//! compass CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "compass")]
#[command(version)]
#[command(about = "Inspect and validate stylesheet project configuration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a configuration file and report problems
    Check {
        /// Configuration file (defaults to config.rb)
        file: Option<PathBuf>,

        /// Reject unrecognized keys instead of warning
        #[arg(long)]
        strict: bool,
    },

    /// Print the loaded configuration as JSON
    Show {
        /// Configuration file (defaults to config.rb)
        file: Option<PathBuf>,

        /// Reject unrecognized keys instead of warning
        #[arg(long)]
        strict: bool,
    },

    /// Print effective directories resolved against the project root
    Paths {
        /// Configuration file (defaults to config.rb)
        file: Option<PathBuf>,

        /// Project root (defaults to the configuration file's directory)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Fail if a resolved directory does not exist
        #[arg(long)]
        verify: bool,
    },

    /// Write a starter configuration file
    Init {
        /// File to create (defaults to config.rb)
        file: Option<PathBuf>,

        /// Layout mode (stand_alone, rails)
        #[arg(long, default_value = "stand_alone")]
        project_type: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "compass_config=info,compass=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file, strict } => {
            commands::check::execute(commands::check::CheckArgs { file, strict })
        }
        Commands::Show { file, strict } => {
            commands::show::execute(commands::show::ShowArgs { file, strict })
        }
        Commands::Paths { file, root, verify } => {
            commands::paths::execute(commands::paths::PathsArgs { file, root, verify })
        }
        Commands::Init {
            file,
            project_type,
            force,
        } => commands::init::execute(commands::init::InitArgs {
            file,
            project_type,
            force,
        }),
    }
}
