//! barrier-gen - barrier bitmap generator
//!
//! Run from the game's `utils/` directory with no arguments to regenerate
//! `../src/barrier.c`.
//!
//! # Commands
//!
//! - `barrier-gen` / `barrier-gen generate` - write the C source
//! - `barrier-gen check` - fail if the file on disk is stale

use anyhow::{Context, Result};
use barrier_gen::config::{parse_color, BarrierConfig, ConfigOverrides};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "barrier-gen")]
#[command(about = "Generate the barrier bitmap as a C struct literal")]
#[command(version)]
struct Cli {
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    args: BitmapArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the bitmap source (default)
    Generate(BitmapArgs),

    /// Check that the bitmap source on disk is up to date
    Check(BitmapArgs),
}

#[derive(Args, Clone, Default)]
struct BitmapArgs {
    /// TOML config file (defaults apply to missing keys)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file (default: ../src/<name>.c)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Bitmap width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Bitmap height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Fill color (0xRRRR, #RRRR or decimal)
    #[arg(long, value_parser = parse_color)]
    fill: Option<u16>,

    /// C symbol name for the struct
    #[arg(long)]
    name: Option<String>,
}

impl BitmapArgs {
    fn is_empty(&self) -> bool {
        self.config.is_none()
            && self.output.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.fill.is_none()
            && self.name.is_none()
    }

    fn into_config(self) -> Result<BarrierConfig> {
        let mut config = match &self.config {
            Some(path) => BarrierConfig::load(path)?,
            None => BarrierConfig::default(),
        };
        config.apply(ConfigOverrides {
            name: self.name,
            width: self.width,
            height: self.height,
            fill_color: self.fill,
            output_path: self.output,
        });
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Quiet by default; -v raises to info, RUST_LOG overrides both
    let level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();

    if cli.command.is_some() && !cli.args.is_empty() {
        anyhow::bail!(
            "Bitmap options must follow the subcommand (e.g. 'barrier-gen generate --width 64')"
        );
    }

    let cwd = std::env::current_dir().context("Failed to read current directory")?;

    match cli.command {
        Some(Commands::Generate(args)) => {
            let config = args.into_config()?;
            barrier_gen::generate(&config, &cwd)?;
        }
        None => {
            let config = cli.args.into_config()?;
            barrier_gen::generate(&config, &cwd)?;
        }
        Some(Commands::Check(args)) => {
            let config = args.into_config()?;
            let path = barrier_gen::output::resolve(&config.output_path(), &cwd);
            if barrier_gen::check(&config, &cwd)? {
                println!("✓ {} is in sync", path.display());
            } else {
                anyhow::bail!(
                    "{} is out of sync. Run 'barrier-gen generate' to regenerate.",
                    path.display()
                );
            }
        }
    }

    Ok(())
}
