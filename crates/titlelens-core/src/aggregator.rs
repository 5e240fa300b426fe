use polars::prelude::*;
use rustc_hash::FxHashMap;
use tracing::info;

use crate::error::Result;
use crate::sentiment::{SentimentTable, SCORE_COLUMN};
use crate::tokenizer::WORD_COLUMN;

pub const COUNT_COLUMN: &str = "n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyEntry {
    pub word: String,
    pub count: u64,
}

/// One row of the joined result table.
#[derive(Debug, Clone, PartialEq)]
pub struct WordSummary {
    pub word: String,
    pub count: u64,
    pub score: Option<f64>,
}

/// Occurrence counts, most frequent first; equal counts keep first-seen order.
pub fn count_words(tokens: &[String]) -> Vec<FrequencyEntry> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut entries: Vec<FrequencyEntry> = Vec::new();

    for token in tokens {
        match index.get(token.as_str()) {
            Some(&idx) => entries[idx].count += 1,
            None => {
                index.insert(token.as_str(), entries.len());
                entries.push(FrequencyEntry {
                    word: token.clone(),
                    count: 1,
                });
            }
        }
    }

    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

/// Count, drop words seen fewer than `min_count` times and left-join the
/// sentiment scores. Rows come out unique: `count_words` yields one entry per
/// word and the sentiment table holds at most one score per word.
pub fn summarize_words(
    tokens: &[String],
    sentiments: &SentimentTable,
    min_count: u64,
) -> Vec<WordSummary> {
    let frequent: Vec<FrequencyEntry> = count_words(tokens)
        .into_iter()
        .filter(|entry| entry.count >= min_count)
        .collect();

    frequent
        .into_iter()
        .map(|entry| WordSummary {
            score: sentiments.get(&entry.word),
            word: entry.word,
            count: entry.count,
        })
        .collect()
}

/// The result table as a dataframe with `word`, `n` and nullable `score`.
pub fn aggregate(
    tokens: &[String],
    sentiments: &SentimentTable,
    min_count: u64,
) -> Result<DataFrame> {
    let rows = summarize_words(tokens, sentiments, min_count);
    info!(
        tokens = tokens.len(),
        frequent_words = rows.len(),
        min_count,
        "aggregated word frequencies"
    );
    summaries_to_frame(&rows)
}

pub fn summaries_to_frame(rows: &[WordSummary]) -> Result<DataFrame> {
    let words: Vec<&str> = rows.iter().map(|row| row.word.as_str()).collect();
    let counts: Vec<u64> = rows.iter().map(|row| row.count).collect();
    let scores: Vec<Option<f64>> = rows.iter().map(|row| row.score).collect();

    Ok(DataFrame::new(vec![
        Series::new(WORD_COLUMN.into(), words).into(),
        Series::new(COUNT_COLUMN.into(), counts).into(),
        Series::new(SCORE_COLUMN.into(), scores).into(),
    ])?)
}
