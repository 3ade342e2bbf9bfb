//! Configuration file management
//!
//! Loads TOML configuration files and provides atlas build settings.
//! Default config path: ~/.config/fontpack/config.toml

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_APRON, DEFAULT_ATLAS_HEIGHT, DEFAULT_ATLAS_WIDTH, DEFAULT_END_CODE_POINT,
    DEFAULT_HEIGHT_PIXELS, DEFAULT_START_CODE_POINT,
};
use crate::font::atlas::AtlasSettings;

/// Environment variable naming a config file
pub const CONFIG_ENV_VAR: &str = "FONTPACK_CONFIG";

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Font settings
    pub font: FontConfig,
    /// Atlas texture settings
    pub atlas: AtlasConfig,
    /// Output settings
    pub output: OutputConfig,
}

/// Font settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Font file path (searches system fonts if empty)
    pub path: String,
    /// Rasterized font height in pixels
    pub height_pixels: f32,
    /// First codepoint to pack (inclusive)
    pub start_code_point: i32,
    /// Last codepoint to pack (exclusive)
    pub end_code_point: i32,
}

/// Atlas texture settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Texture width in pixels
    pub width: u32,
    /// Texture height in pixels
    pub height: u32,
    /// Empty border around each glyph in pixels (bleed guard for bilinear filtering)
    pub apron: i32,
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// PNG file the atlas is written to
    pub png: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            height_pixels: DEFAULT_HEIGHT_PIXELS,
            start_code_point: DEFAULT_START_CODE_POINT,
            end_code_point: DEFAULT_END_CODE_POINT,
        }
    }
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_ATLAS_WIDTH,
            height: DEFAULT_ATLAS_HEIGHT,
            apron: DEFAULT_APRON,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            png: "out.png".to_string(),
        }
    }
}

impl Config {
    /// Get the path that would be used for loading config
    /// Returns None if using built-in defaults
    pub fn config_path() -> Option<PathBuf> {
        // 1. FONTPACK_CONFIG environment variable
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = Path::new(&path);
            if p.exists() {
                return Some(p.to_path_buf());
            }
            warn!("{} points to missing file: {}", CONFIG_ENV_VAR, path);
        }

        // 2. User config: ~/.config/fontpack/config.toml
        default_config_path().filter(|p| p.exists())
    }

    /// Load configuration with priority:
    /// 1. FONTPACK_CONFIG environment variable
    /// 2. ~/.config/fontpack/config.toml (user config)
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            match Self::load_from_file(&path) {
                Ok(config) => {
                    info!("Loaded config: {}", path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to load config {}: {:#}", path.display(), e);
                }
            }
        }
        info!("Using built-in default config");
        Self::default()
    }

    /// Load settings from specified path
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse TOML text; missing keys fall back to defaults
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Atlas build parameters from the font and atlas sections
    pub fn atlas_settings(&self) -> AtlasSettings {
        AtlasSettings {
            width: self.atlas.width,
            height: self.atlas.height,
            height_pixels: self.font.height_pixels,
            start_code_point: self.font.start_code_point,
            end_code_point: self.font.end_code_point,
            apron: self.atlas.apron,
        }
    }

    /// Font path if one is configured
    pub fn font_path(&self) -> Option<PathBuf> {
        let path = self.font.path.trim();
        (!path.is_empty()).then(|| PathBuf::from(path))
    }
}

/// Get default config file path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("fontpack").join("config.toml"))
}
