//! Barrier generator configuration
//!
//! Every field has a default matching the shipped barrier asset, so an empty
//! config (or no config at all) produces the 220x20 black bitmap at
//! `../src/barrier.c`.
//!
//! ```toml
//! name = "barrier"
//! width = 220
//! height = 20
//! fill_color = 0x0000
//! output_path = "../src/barrier.c"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default C symbol and file stem
pub const DEFAULT_NAME: &str = "barrier";
/// Default bitmap width in pixels
pub const DEFAULT_WIDTH: u32 = 220;
/// Default bitmap height in pixels
pub const DEFAULT_HEIGHT: u32 = 20;
/// Default fill color (RGB565 black)
pub const DEFAULT_FILL_COLOR: u16 = 0x0000;

/// Largest C source the generator will build in memory (1 GiB)
pub const MAX_SOURCE_LEN: usize = 1 << 30;

/// Errors raised while validating a [`BarrierConfig`] or parsing its values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Width or height is zero
    #[error("bitmap dimensions must be non-zero (got {width}x{height})")]
    EmptyDimension { width: u32, height: u32 },

    /// Emitted source would exceed [`MAX_SOURCE_LEN`]
    #[error("bitmap {width}x{height} is too large to encode")]
    TooLarge { width: u32, height: u32 },

    /// Name cannot be used as a C identifier
    #[error("'{0}' is not a valid C identifier")]
    InvalidName(String),

    /// Color string could not be parsed as a 16-bit value
    #[error("invalid color '{0}' (expected 0xRRRR, #RRRR or a decimal value up to 65535)")]
    InvalidColor(String),
}

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BarrierConfig {
    /// C symbol of the emitted struct, also the default file stem
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// 16-bit value written to every pixel
    pub fill_color: u16,
    /// Explicit output path. Relative paths resolve against the invocation directory.
    pub output_path: Option<PathBuf>,
}

impl Default for BarrierConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fill_color: DEFAULT_FILL_COLOR,
            output_path: None,
        }
    }
}

/// Values supplied on the command line, layered over a file or the defaults
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub name: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fill_color: Option<u16>,
    pub output_path: Option<PathBuf>,
}

impl BarrierConfig {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Parse config from a TOML string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse barrier config")
    }

    /// Replace every field that was given an override.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(name) = overrides.name {
            self.name = name;
        }
        if let Some(width) = overrides.width {
            self.width = width;
        }
        if let Some(height) = overrides.height {
            self.height = height;
        }
        if let Some(fill_color) = overrides.fill_color {
            self.fill_color = fill_color;
        }
        if let Some(output_path) = overrides.output_path {
            self.output_path = Some(output_path);
        }
    }

    /// Output path before resolution against the invocation directory.
    ///
    /// Falls back to `../src/<name>.c`.
    pub fn output_path(&self) -> PathBuf {
        match &self.output_path {
            Some(path) => path.clone(),
            None => Path::new("..").join("src").join(format!("{}.c", self.name)),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyDimension {
                width: self.width,
                height: self.height,
            });
        }

        match crate::codegen::source_len(self.width, self.height, &self.name) {
            Some(len) if len <= MAX_SOURCE_LEN => {}
            _ => {
                return Err(ConfigError::TooLarge {
                    width: self.width,
                    height: self.height,
                })
            }
        }

        if !is_c_identifier(&self.name) {
            return Err(ConfigError::InvalidName(self.name.clone()));
        }

        Ok(())
    }
}

fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse a 16-bit color from `0xRRRR`, `#RRRR` or decimal notation.
pub fn parse_color(s: &str) -> Result<u16, ConfigError> {
    let trimmed = s.trim();
    let parsed = if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .or_else(|| trimmed.strip_prefix('#'))
    {
        u16::from_str_radix(hex, 16)
    } else {
        trimmed.parse::<u16>()
    };
    parsed.map_err(|_| ConfigError::InvalidColor(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shipped_asset() {
        let config = BarrierConfig::default();
        assert_eq!(config.name, "barrier");
        assert_eq!(config.width, 220);
        assert_eq!(config.height, 20);
        assert_eq!(config.fill_color, 0x0000);
        assert_eq!(config.output_path(), PathBuf::from("../src/barrier.c"));
    }

    #[test]
    fn test_parse_partial_config() {
        let config = BarrierConfig::parse("width = 100\nfill_color = 0xFFFF\n").unwrap();
        assert_eq!(config.width, 100);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.fill_color, 0xFFFF);
        assert_eq!(config.name, DEFAULT_NAME);
    }

    #[test]
    fn test_parse_empty_config_is_default() {
        assert_eq!(BarrierConfig::parse("").unwrap(), BarrierConfig::default());
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(BarrierConfig::parse("depth = 3\n").is_err());
    }

    #[test]
    fn test_parse_rejects_out_of_range_color() {
        assert!(BarrierConfig::parse("fill_color = 70000\n").is_err());
    }

    #[test]
    fn test_output_path_follows_name() {
        let config = BarrierConfig {
            name: "wall".to_string(),
            ..Default::default()
        };
        assert_eq!(config.output_path(), PathBuf::from("../src/wall.c"));
    }

    #[test]
    fn test_explicit_output_path_wins() {
        let config = BarrierConfig::parse("output_path = \"gen/out.c\"\n").unwrap();
        assert_eq!(config.output_path(), PathBuf::from("gen/out.c"));
    }

    #[test]
    fn test_apply_overrides_only_given_fields() {
        let mut config = BarrierConfig::parse("width = 64\nheight = 8\n").unwrap();
        config.apply(ConfigOverrides {
            height: Some(4),
            fill_color: Some(0x1234),
            ..Default::default()
        });
        assert_eq!(config.width, 64);
        assert_eq!(config.height, 4);
        assert_eq!(config.fill_color, 0x1234);
        assert_eq!(config.output_path, None);
    }

    #[test]
    fn test_validate_rejects_zero_dimension() {
        let config = BarrierConfig {
            height: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyDimension {
                width: 220,
                height: 0
            })
        );
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        for name in ["", "9lives", "bar-rier", "bar rier"] {
            let config = BarrierConfig {
                name: name.to_string(),
                ..Default::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::InvalidName(name.to_string())),
                "name {:?} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_validate_rejects_huge_dimensions() {
        for (width, height) in [(1 << 31, 1 << 31), (u32::MAX, u32::MAX), (1 << 20, 1 << 20)] {
            let config = BarrierConfig {
                width,
                height,
                ..Default::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::TooLarge { width, height })
            );
        }
    }

    #[test]
    fn test_validate_accepts_wide_single_row() {
        let config = BarrierConfig {
            width: 4096,
            height: 1,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_accepts_default() {
        assert_eq!(BarrierConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_parse_color_notations() {
        assert_eq!(parse_color("0x0000"), Ok(0));
        assert_eq!(parse_color("0XF800"), Ok(0xF800));
        assert_eq!(parse_color("#07e0"), Ok(0x07E0));
        assert_eq!(parse_color("65535"), Ok(0xFFFF));
        assert!(parse_color("65536").is_err());
        assert!(parse_color("0x1FFFF").is_err());
        assert!(parse_color("black").is_err());
    }
}
