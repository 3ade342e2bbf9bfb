//! System font discovery
//!
//! Locates a TTF to build an atlas from when none is configured.

use anyhow::{anyhow, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Environment variable naming a font file to use
pub const FONT_ENV_VAR: &str = "FONTPACK_FONT";

/// Well-known locations of common sans/mono fonts
const CANDIDATES: &[&str] = &[
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    // macOS (development/testing)
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Read a font file
pub fn load_font_file(path: &Path) -> Result<Vec<u8>> {
    let data = std::fs::read(path)
        .map_err(|e| anyhow!("Failed to load font: {} ({})", path.display(), e))?;
    info!("Font loaded: {}", path.display());
    Ok(data)
}

/// Search and load a system font
///
/// Search order:
/// 1. FONTPACK_FONT environment variable
/// 2. Known paths (hardcoded)
pub fn load_system_font() -> Result<(PathBuf, Vec<u8>)> {
    if let Ok(path) = std::env::var(FONT_ENV_VAR) {
        let path = PathBuf::from(path);
        let data = load_font_file(&path)?;
        return Ok((path, data));
    }

    for path in CANDIDATES {
        if let Ok(data) = std::fs::read(path) {
            info!("Font loaded: {}", path);
            return Ok((PathBuf::from(path), data));
        }
        debug!("Font not present: {}", path);
    }

    Err(anyhow!(
        "System font not found. Set {} or install one of:\n{}",
        FONT_ENV_VAR,
        CANDIDATES.join("\n")
    ))
}
