//! CLI entry point for blogposts

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blogposts")]
#[command(version)]
#[command(about = "List, enumerate and render markdown blog posts", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, newest first
    #[command(alias = "ls")]
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List post ids for route generation
    Ids {
        /// Print as JSON route parameters
        #[arg(long)]
        json: bool,
    },

    /// Render a post to HTML
    Render {
        /// Post id (file name without .md)
        id: String,

        /// Print the post with its metadata as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blogposts=debug,info"
    } else {
        "blogposts=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    if let Commands::Version = cli.command {
        println!("blogposts version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let blog = blogposts::Blog::new(&base_dir)
        .with_context(|| format!("Failed to open blog at {:?}", base_dir))?;
    tracing::debug!("Reading posts from {:?}", blog.posts.posts_dir());

    match cli.command {
        Commands::List { json } => blogposts::commands::list::posts(&blog, json)?,
        Commands::Ids { json } => blogposts::commands::list::ids(&blog, json)?,
        Commands::Render { id, json } => {
            tracing::info!("Rendering post {}", id);
            blogposts::commands::render::run(&blog, &id, json).await?;
        }
        Commands::Version => {}
    }

    Ok(())
}
