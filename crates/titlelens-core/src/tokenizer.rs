//! Title tokenization.
//!
//! Each title is split on whitespace, every fragment is lowercased and the
//! first run of `[a-z0-9@]` characters becomes the token. Fragments made only
//! of punctuation (or of characters outside that class) produce nothing, so a
//! title with `n` fragments yields at most `n` tokens.

use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use tracing::debug;

use crate::error::Result;
use crate::selector::{require_column, TITLE_COLUMN};

pub const WORD_COLUMN: &str = "word";

static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z0-9@]+").expect("word pattern is valid"));

/// Token extracted from a single whitespace-delimited fragment, if any.
pub fn normalize_fragment(fragment: &str) -> Option<String> {
    let lowered = fragment.to_lowercase();
    WORD_PATTERN
        .find(&lowered)
        .map(|found| found.as_str().to_string())
}

pub fn tokenize_title(title: &str) -> Vec<String> {
    title.split_whitespace().filter_map(normalize_fragment).collect()
}

/// Flatten many titles into one ordered token stream.
pub fn tokenize_titles<I, S>(titles: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    titles
        .into_iter()
        .flat_map(|title| tokenize_title(title.as_ref()))
        .collect()
}

/// Explode the `title` column of `df` into a single `word` column, one row
/// per token. Null titles contribute no rows.
pub fn tokenize_frame(df: &DataFrame) -> Result<DataFrame> {
    let titles = require_column(df, TITLE_COLUMN)?.str()?;
    let words = tokenize_titles(titles.into_iter().flatten());
    debug!(titles = df.height(), tokens = words.len(), "tokenized titles");
    Ok(DataFrame::new(vec![
        Series::new(WORD_COLUMN.into(), words).into()
    ])?)
}

pub fn word_column(df: &DataFrame) -> Result<Vec<String>> {
    let words = require_column(df, WORD_COLUMN)?.str()?;
    Ok(words
        .into_iter()
        .flatten()
        .map(|word| word.to_string())
        .collect())
}
