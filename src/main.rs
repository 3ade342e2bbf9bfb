//! fontpack - build a glyph atlas PNG from a TTF font
//!
//! Loads a font, packs the configured codepoint range into one texture,
//! writes it as a grayscale PNG and optionally reports the geometry size
//! of a sample string.

use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::path::PathBuf;

use fontpack::config::Config;
use fontpack::font::system::{load_font_file, load_system_font};
use fontpack::{text_to_geometry, Font, FontdueProvider};

fn print_help() {
    println!(
        r#"fontpack {} - glyph atlas packer

USAGE:
    fontpack [OPTIONS]

OPTIONS:
    --font PATH             Font file (default: config, FONTPACK_FONT, system font)
    --output PATH           PNG file to write (default: config or out.png)
    --text TEXT             Lay out TEXT and print the vertex count
    --size PIXELS           Font height in pixels
    --atlas WxH             Atlas size, e.g. 512x512
    -h, --help              Print this help message
    -V, --version           Print version

CONFIG:
    $FONTPACK_CONFIG or ~/.config/fontpack/config.toml"#,
        env!("CARGO_PKG_VERSION")
    );
}

/// Value following `flag`, if present
fn arg_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>> {
    match args.iter().position(|a| a == flag) {
        Some(i) => match args.get(i + 1) {
            Some(v) => Ok(Some(v.as_str())),
            None => bail!("{} requires a value", flag),
        },
        None => Ok(None),
    }
}

fn parse_atlas_size(s: &str) -> Result<(u32, u32)> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .with_context(|| format!("Invalid atlas size: {} (expected WxH)", s))?;
    let w = w.trim().parse().with_context(|| format!("Invalid atlas width: {}", w))?;
    let h = h.trim().parse().with_context(|| format!("Invalid atlas height: {}", h))?;
    Ok((w, h))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    // --help
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    // --version
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("fontpack {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = Config::load();
    let mut settings = config.atlas_settings();

    if let Some(size) = arg_value(&args, "--size")? {
        settings.height_pixels = size
            .parse()
            .with_context(|| format!("Invalid font size: {}", size))?;
    }
    if let Some(atlas) = arg_value(&args, "--atlas")? {
        (settings.width, settings.height) = parse_atlas_size(atlas)?;
    }

    let font_data = match arg_value(&args, "--font")?
        .map(PathBuf::from)
        .or_else(|| config.font_path())
    {
        Some(path) => load_font_file(&path)?,
        None => load_system_font()?.1,
    };

    let provider = FontdueProvider::from_bytes(&font_data)?;
    let mut atlas = settings.new_atlas()?;
    let font = Font::build(&provider, &settings, &mut atlas).with_context(|| {
        format!(
            "Failed to build {}x{} atlas (try a larger --atlas)",
            settings.width, settings.height
        )
    })?;

    debug!(
        "Font metrics: ascent={}, descent={}, line_gap={}, scale={:.5}",
        font.ascent, font.descent, font.line_gap, font.scale_y
    );

    let output = arg_value(&args, "--output")?
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&config.output.png));
    atlas.write_png(&output)?;

    if let Some(text) = arg_value(&args, "--text")? {
        let geometry = text_to_geometry(&font, text)?;
        info!("Text geometry: {} vertices", geometry.vertex_count());
        println!("{} vertices", geometry.vertex_count());
    }

    println!(
        "Wrote {} ({}x{}, {} glyphs)",
        output.display(),
        atlas.width(),
        atlas.height(),
        font.glyph_count()
    );
    Ok(())
}
