//! CLI entry point for mds-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mds_rs::Mds;

#[derive(Parser)]
#[command(name = "mds-rs")]
#[command(version)]
#[command(about = "Render pre-article/*.md into styled HTML pages under article/", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Without a command, clean the output directory and rebuild it
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the pages without cleaning first
    #[command(alias = "b")]
    Build,

    /// Delete the output directory
    Clean,

    /// List the Markdown sources and the pages they render to
    List,

    /// List the built-in layouts
    Layouts,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "mds_rs=debug,info"
    } else {
        "mds_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let mds = Mds::new(&base_dir);

    match cli.command {
        None => {
            tracing::info!("Cleaning and generating pages...");
            let summary = mds.run()?;
            println!(
                "Generated {} page(s) in {:?}",
                summary.documents, summary.output_dir
            );
        }

        Some(Commands::Build) => {
            tracing::info!("Generating pages...");
            let summary = mds.build()?;
            println!(
                "Generated {} page(s) in {:?}",
                summary.documents, summary.output_dir
            );
        }

        Some(Commands::Clean) => {
            tracing::info!("Cleaning output folder...");
            mds.clean()?;
            println!("Cleaned successfully!");
        }

        Some(Commands::List) => {
            mds_rs::commands::list::run(&mds.config)?;
        }

        Some(Commands::Layouts) => {
            mds_rs::commands::layouts::run(&mds.config);
        }

        Some(Commands::Version) => {
            println!("mds-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
