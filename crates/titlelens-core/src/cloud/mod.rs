//! Word-cloud generation: weight the filtered token stream, lay the words out
//! on a fixed canvas and draw the result.

mod frequencies;
mod layout;
mod render;

pub use frequencies::{word_frequencies, WeightedWord};
pub use layout::{layout_cloud, CloudLayout, PlacedWord};
pub use render::{parse_color, render_svg, show_cloud, write_cloud, write_preview};

use tracing::info;

use crate::config::CloudOptions;
use crate::error::Result;
use crate::stopwords::StopwordFilter;

/// Weight, lay out and draw `tokens` in one step, returning the layout and
/// the SVG document.
pub fn generate_cloud(
    tokens: &[String],
    stopwords: &StopwordFilter,
    options: &CloudOptions,
) -> Result<(CloudLayout, String)> {
    options.validate()?;
    let weighted = word_frequencies(tokens, stopwords, options);
    let layout = layout_cloud(&weighted, options);
    let svg = render_svg(&layout, options)?;
    info!(
        candidates = weighted.len(),
        placed = layout.words.len(),
        width = layout.width,
        height = layout.height,
        "generated word cloud"
    );
    Ok((layout, svg))
}
