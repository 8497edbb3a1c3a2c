//! lfm CLI - Luogu-flavored markdown processor.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use lfm_flavor::LuoguFlavor;
use lfm_pipeline::{to_markdown, Processor, SourceFile};

mod config;

use config::OutputFormat;

#[derive(Parser)]
#[command(name = "lfm")]
#[command(about = "Luogu-flavored markdown processor")]
#[command(version)]
struct Cli {
    /// Markdown file to process
    input: PathBuf,

    /// Output format (overrides lfm.toml)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Path to lfm.toml config file
    #[arg(short, long, default_value = "lfm.toml")]
    config: PathBuf,

    /// Allow single `~` strikethrough (overrides lfm.toml)
    #[arg(long)]
    single_tilde: bool,

    /// Do not point mention links at the Luogu user space (overrides lfm.toml)
    #[arg(long = "no-user-link-luogu")]
    no_user_link_luogu: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; diagnostics go to stderr so stdout stays clean
    // for the converted document.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let file_config = config::load(&cli.config)?;
    let format = cli
        .format
        .or(file_config.output.format)
        .unwrap_or(OutputFormat::Markdown);

    let flavor = config::merge_flavor(
        file_config.flavor,
        cli.single_tilde,
        cli.no_user_link_luogu,
    );
    let plugin = LuoguFlavor::with_options(flavor);
    let processor = Processor::new().with(&plugin);

    let contents = fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let mut file = SourceFile::new(contents).with_path(&cli.input);

    let tree = processor.process(&mut file);
    tracing::debug!("processed {}", cli.input.display());

    match format {
        OutputFormat::Markdown => {
            let markdown = to_markdown(&tree, processor.data())
                .context("Failed to serialize document")?;
            print!("{markdown}");
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&tree)
                .context("Failed to serialize document tree")?;
            println!("{json}");
        }
    }

    Ok(())
}
