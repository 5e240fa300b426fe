use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::{debug, info};

use super::layout::CloudLayout;
use crate::config::CloudOptions;
use crate::error::{CoreError, Result};

const FONT_FAMILY: &str = "sans-serif";

/// Accepts `white`, `black` or a `#rrggbb` hex triplet.
pub fn parse_color(value: &str) -> Result<RGBColor> {
    let trimmed = value.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "white" => return Ok(WHITE),
        "black" => return Ok(BLACK),
        _ => {}
    }

    let hex = trimmed
        .strip_prefix('#')
        .filter(|hex| hex.len() == 6 && hex.is_ascii())
        .ok_or_else(|| CoreError::Validation(format!("unsupported colour '{trimmed}'")))?;
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .map_err(|err| CoreError::Validation(format!("invalid colour '{trimmed}': {err}")))
    };
    Ok(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Draw the layout onto an in-memory SVG canvas.
pub fn render_svg(layout: &CloudLayout, options: &CloudOptions) -> Result<String> {
    let background = parse_color(&options.background)?;
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (layout.width, layout.height))
            .into_drawing_area();
        root.fill(&background).map_err(render_error)?;

        for word in &layout.words {
            let (r, g, b) = word.color;
            let style = (FONT_FAMILY, word.font_size as f64)
                .into_font()
                .color(&RGBColor(r, g, b));
            root.draw(&Text::new(word.text.as_str(), (word.x, word.y), style))
                .map_err(render_error)?;
        }

        root.present().map_err(render_error)?;
    }
    Ok(svg)
}

pub fn write_cloud(path: impl AsRef<Path>, svg: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, svg)?;
    info!(path = %path.display(), bytes = svg.len(), "wrote word cloud");
    Ok(())
}

/// Write `svg` to a fresh file in the system temp directory for a viewer to
/// pick up. The file outlives the process.
pub fn write_preview(svg: &str) -> Result<PathBuf> {
    let mut file = tempfile::Builder::new()
        .prefix("titlelens-cloud-")
        .suffix(".svg")
        .tempfile()?;
    file.write_all(svg.as_bytes())?;
    let path = file.into_temp_path().keep().map_err(|err| err.error)?;
    debug!(path = %path.display(), "wrote word cloud preview");
    Ok(path)
}

/// Open the image at `path` in the platform's default viewer.
pub fn show_cloud(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    opener::open(path).map_err(|err| {
        CoreError::Render(format!("could not open {} in a viewer: {err}", path.display()))
    })?;
    info!(path = %path.display(), "opened word cloud viewer");
    Ok(())
}

fn render_error<E: std::fmt::Display>(err: E) -> CoreError {
    CoreError::Render(err.to_string())
}
