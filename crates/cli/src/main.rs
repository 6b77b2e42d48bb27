//! docbuild - discover and validate documentation build configuration

use anyhow::{Context, Result};
use clap::Parser;
use config::EnvConfig;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Discover and validate every documentation build configuration under a
/// project root
#[derive(Parser, Debug)]
#[command(name = "docbuild", version, about)]
struct Args {
    /// Project root to search for configuration files
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Directory build output will be written under; falls back to the
    /// DOCBUILD_OUTPUT_BASE environment variable
    #[arg(long)]
    output_base: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Load .env file if it exists
    if let Err(e) = dotenv::dotenv() {
        if !e.to_string().contains("No such file or directory") {
            warn!("Could not load .env file: {}", e);
        }
    }

    init_logging()?;

    let args = Args::parse();
    let env_config = match &args.output_base {
        Some(path) => EnvConfig::new(path.clone()),
        None => EnvConfig::from_env()
            .context("output base not configured; pass --output-base or set DOCBUILD_OUTPUT_BASE")?,
    };

    let project = config::load(&args.root, &env_config)
        .with_context(|| format!("failed to load configuration under {}", args.root.display()))?;

    info!("Discovered {} configuration document(s)", project.len());
    for build in &project {
        let source = build
            .source_file()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        println!(
            "{name} [{builder}] base={base} output={output} ({source}#{position})",
            name = build.name()?,
            builder = build.build_type()?.as_str(),
            base = build.base()?.display(),
            output = build.output_base()?.display(),
            position = build.source_position().unwrap_or(0),
        );
    }

    Ok(())
}

/// Initialize logging based on environment variables
fn init_logging() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}
