use rustc_hash::FxHashMap;

use crate::aggregator::count_words;
use crate::config::CloudOptions;
use crate::stopwords::StopwordFilter;

/// A cloud candidate with its raw count and count relative to the most
/// frequent word (`1.0` for the top word).
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedWord {
    pub word: String,
    pub count: u64,
    pub weight: f64,
}

/// Frequencies the cloud is drawn from. Stopwords are removed again here so
/// the cloud stays clean even when handed an unfiltered stream.
pub fn word_frequencies(
    tokens: &[String],
    stopwords: &StopwordFilter,
    options: &CloudOptions,
) -> Vec<WeightedWord> {
    let kept: Vec<String> = tokens
        .iter()
        .filter(|token| !token.is_empty() && !stopwords.is_stopword(token))
        .filter(|token| options.include_numbers || !is_number(token))
        .cloned()
        .collect();

    let mut counts: Vec<(String, u64)> = count_words(&kept)
        .into_iter()
        .map(|entry| (entry.word, entry.count))
        .collect();

    if options.normalize_plurals {
        counts = merge_plurals(counts);
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(options.max_words);

    let max = counts.first().map(|(_, count)| *count).unwrap_or(0);
    counts
        .into_iter()
        .map(|(word, count)| WeightedWord {
            weight: count as f64 / max as f64,
            word,
            count,
        })
        .collect()
}

fn is_number(token: &str) -> bool {
    token.chars().all(|c| c.is_ascii_digit())
}

/// Fold `words` into `word` when both appear. Words ending in `ss` are left
/// alone.
fn merge_plurals(counts: Vec<(String, u64)>) -> Vec<(String, u64)> {
    let index: FxHashMap<String, usize> = counts
        .iter()
        .enumerate()
        .map(|(idx, (word, _))| (word.clone(), idx))
        .collect();

    let mut merged = counts.clone();
    let mut removed = vec![false; counts.len()];
    for (idx, (word, count)) in counts.iter().enumerate() {
        if !word.ends_with('s') || word.ends_with("ss") {
            continue;
        }
        let singular = &word[..word.len() - 1];
        if let Some(&target) = index.get(singular) {
            merged[target].1 += count;
            removed[idx] = true;
        }
    }

    merged
        .into_iter()
        .zip(removed)
        .filter_map(|(entry, gone)| (!gone).then_some(entry))
        .collect()
}
