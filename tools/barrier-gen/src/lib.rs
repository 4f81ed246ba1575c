//! Barrier bitmap generator library
//!
//! Builds a flat 16-bit pixel grid and writes it out as a C struct literal
//! that the game compiles in, instead of decoding an image at runtime.

pub mod codegen;
pub mod config;
pub mod grid;
pub mod output;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use config::{BarrierConfig, ConfigError, ConfigOverrides};
pub use grid::PixelGrid;

/// Summary of a completed `generate` run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAsset {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub data_capacity: usize,
    pub bytes_written: usize,
}

/// Render the C source for `config` without touching the filesystem
pub fn render(config: &BarrierConfig) -> Result<String> {
    build(config).map(|(_, source)| source)
}

fn build(config: &BarrierConfig) -> Result<(PixelGrid, String)> {
    config.validate()?;

    let grid = PixelGrid::from_config(config);
    tracing::debug!(
        "Filled {}x{} grid with 0x{:04X}",
        grid.width(),
        grid.height(),
        config.fill_color
    );

    let source = codegen::render_c_source(&grid, &config.name)
        .with_context(|| format!("Failed to generate C source for '{}'", config.name))?;
    Ok((grid, source))
}

/// Generate the bitmap source and write it, resolving relative paths against `cwd`
pub fn generate(config: &BarrierConfig, cwd: &Path) -> Result<GeneratedAsset> {
    let (grid, source) = build(config)?;
    let path = output::resolve(&config.output_path(), cwd);

    output::write_atomic(&path, source.as_bytes())
        .with_context(|| format!("Failed to write C source to {}", path.display()))?;

    tracing::info!("Generated {} ({} bytes)", path.display(), source.len());

    Ok(GeneratedAsset {
        path,
        width: grid.width(),
        height: grid.height(),
        data_capacity: grid.data_capacity(),
        bytes_written: source.len(),
    })
}

/// Check whether the file on disk matches what `generate` would write
pub fn check(config: &BarrierConfig, cwd: &Path) -> Result<bool> {
    let fresh = render(config)?;
    let path = output::resolve(&config.output_path(), cwd);

    let in_sync = output::is_in_sync(&path, &fresh)?;
    if in_sync {
        tracing::info!("{} is in sync", path.display());
    } else {
        tracing::warn!("{} is out of sync", path.display());
    }

    Ok(in_sync)
}
