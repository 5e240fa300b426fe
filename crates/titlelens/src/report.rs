use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use polars::prelude::*;

/// Render the `word`/`n`/`score` result frame for the terminal.
pub fn result_table(df: &DataFrame) -> Result<Table> {
    let words = df.column("word")?.str()?;
    let counts = df.column("n")?.u64()?;
    let scores = df.column("score")?.f64()?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["word", "n", "score"]);

    for idx in 0..df.height() {
        table.add_row(vec![
            words.get(idx).unwrap_or_default().to_string(),
            counts.get(idx).map(|n| n.to_string()).unwrap_or_default(),
            scores
                .get(idx)
                .map(|score| format!("{score:.1}"))
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }

    Ok(table)
}
