mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "imgmatrix",
    about = "Generate PHP image Dockerfiles, CI workflow and deploy pipeline"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate Dockerfiles, pipeline, workflow and README
    Generate {
        /// Repository root to write into
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
    /// Fail if generated files on disk are out of date
    Check {
        /// Repository root to compare against
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate { root }) => commands::generate(&root)?,
        Some(Commands::Check { root }) => commands::check(&root)?,
        None => commands::generate(std::path::Path::new("."))?,
    }

    Ok(())
}
