//! Lexicon-based word sentiment.
//!
//! Lexicons use the AFINN layout: one `word<TAB>score` pair per line. The
//! English AFINN-165 list is bundled; another list can be loaded from disk.

use std::fs;
use std::path::Path;

use polars::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::error::{CoreError, Result};

static BUNDLED_AFINN: &str = include_str!("../data/afinn-en-165.tsv");

pub const SCORE_COLUMN: &str = "score";

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    scores: FxHashMap<String, f64>,
}

impl Lexicon {
    pub fn bundled() -> Result<Self> {
        Self::from_afinn_str(BUNDLED_AFINN)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let lexicon = Self::from_afinn_str(&content)?;
        info!(
            path = %path.as_ref().display(),
            entries = lexicon.len(),
            "loaded sentiment lexicon"
        );
        Ok(lexicon)
    }

    /// Parse AFINN text. Blank lines and `#` comments are skipped; a later
    /// entry for the same word replaces an earlier one.
    pub fn from_afinn_str(content: &str) -> Result<Self> {
        let mut scores = FxHashMap::default();
        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim_end();
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let (word, score) = line.rsplit_once('\t').ok_or_else(|| CoreError::Lexicon {
                line: idx + 1,
                message: format!("expected '<word>\\t<score>', found '{line}'"),
            })?;
            let word = word.trim();
            if word.is_empty() {
                return Err(CoreError::Lexicon {
                    line: idx + 1,
                    message: "empty word".to_string(),
                });
            }
            let score = score
                .trim()
                .parse::<f64>()
                .map_err(|err| CoreError::Lexicon {
                    line: idx + 1,
                    message: format!("invalid score for '{word}': {err}"),
                })?;
            scores.insert(word.to_lowercase(), score);
        }
        Ok(Self { scores })
    }

    pub fn from_pairs<S: AsRef<str>>(pairs: &[(S, f64)]) -> Self {
        let scores = pairs
            .iter()
            .map(|(word, score)| (word.as_ref().to_lowercase(), *score))
            .collect();
        Self { scores }
    }

    pub fn get(&self, word: &str) -> Option<f64> {
        self.scores.get(word).copied()
    }

    /// Score of `word`; words absent from the lexicon are neutral.
    pub fn score(&self, word: &str) -> f64 {
        self.get(word).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentimentEntry {
    pub word: String,
    pub score: f64,
}

/// One score per distinct word, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct SentimentTable {
    entries: Vec<SentimentEntry>,
    index: FxHashMap<String, usize>,
}

impl SentimentTable {
    pub fn get(&self, word: &str) -> Option<f64> {
        self.index.get(word).map(|idx| self.entries[*idx].score)
    }

    pub fn entries(&self) -> &[SentimentEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, word: &str, score: f64) {
        if self.index.contains_key(word) {
            return;
        }
        self.index.insert(word.to_string(), self.entries.len());
        self.entries.push(SentimentEntry {
            word: word.to_string(),
            score,
        });
    }

    pub fn to_frame(&self) -> Result<DataFrame> {
        let words: Vec<&str> = self.entries.iter().map(|e| e.word.as_str()).collect();
        let scores: Vec<f64> = self.entries.iter().map(|e| e.score).collect();
        Ok(DataFrame::new(vec![
            Series::new("word".into(), words).into(),
            Series::new(SCORE_COLUMN.into(), scores).into(),
        ])?)
    }
}

pub fn score_words<I, S>(words: I, lexicon: &Lexicon) -> SentimentTable
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut table = SentimentTable::default();
    for word in words {
        let word = word.as_ref();
        table.insert(word, lexicon.score(word));
    }
    debug!(distinct_words = table.len(), "scored word sentiment");
    table
}

/// Mean score over the token stream, repeats included.
pub fn mean_sentiment(tokens: &[String], lexicon: &Lexicon) -> Option<f64> {
    if tokens.is_empty() {
        return None;
    }
    let total: f64 = tokens.iter().map(|token| lexicon.score(token)).sum();
    Some(total / tokens.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn bundled_lexicon_parses() {
        let lexicon = Lexicon::bundled().unwrap();
        assert!(lexicon.len() > 3300, "only {} entries", lexicon.len());
        assert_eq!(lexicon.get("love"), Some(3.0));
        assert_eq!(lexicon.get("murder"), Some(-2.0));
    }

    #[test]
    fn bundled_lexicon_covers_the_full_word_list() {
        let lexicon = Lexicon::bundled().unwrap();
        assert_eq!(lexicon.get("breathtaking"), Some(5.0));
        assert_eq!(lexicon.get("superb"), Some(5.0));
        assert_eq!(lexicon.get("bastard"), Some(-5.0));
        assert_eq!(lexicon.get("torture"), Some(-4.0));
        assert_eq!(lexicon.get("zealous"), Some(2.0));
        assert_eq!(lexicon.get("can't stand"), Some(-3.0));
        assert_eq!(lexicon.get("garden"), None);
    }

    #[test]
    fn bundled_scores_stay_within_afinn_range() {
        let lexicon = Lexicon::bundled().unwrap();
        assert!(lexicon
            .scores
            .values()
            .all(|score| (-5.0..=5.0).contains(score) && score.fract() == 0.0));
    }

    #[test]
    fn unknown_words_are_neutral() {
        let lexicon = Lexicon::from_pairs(&[("good", 3.0)]);
        assert_eq!(lexicon.score("pelican"), 0.0);
        assert_eq!(lexicon.get("pelican"), None);
    }

    #[test]
    fn afinn_text_allows_phrases_and_comments() {
        let lexicon =
            Lexicon::from_afinn_str("# header\ncan't stand\t-3\n\nGood\t3\n").unwrap();
        assert_eq!(lexicon.score("can't stand"), -3.0);
        assert_eq!(lexicon.score("good"), 3.0);
    }

    #[test]
    fn malformed_line_reports_position() {
        let err = Lexicon::from_afinn_str("good\t3\nbad -3\n").unwrap_err();
        match err {
            CoreError::Lexicon { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn table_has_no_duplicate_words() {
        let lexicon = Lexicon::from_pairs(&[("kill", -3.0), ("love", 3.0)]);
        let table = score_words(["kill", "mockingbird", "kill", "love"], &lexicon);
        assert_eq!(table.len(), 3);
        assert_eq!(table.entries()[0].word, "kill");
        assert_eq!(table.get("mockingbird"), Some(0.0));
        assert_eq!(table.get("love"), Some(3.0));
        assert_eq!(table.get("absent"), None);
    }

    #[test]
    fn table_converts_to_word_score_frame() {
        let lexicon = Lexicon::from_pairs(&[("war", -2.0)]);
        let df = score_words(["war", "peace", "war"], &lexicon).to_frame().unwrap();
        assert_eq!(df.height(), 2);
        let words: Vec<_> = df.column("word").unwrap().str().unwrap().into_no_null_iter().collect();
        assert_eq!(words, vec!["war", "peace"]);
        let scores: Vec<_> = df.column(SCORE_COLUMN).unwrap().f64().unwrap().into_no_null_iter().collect();
        assert_eq!(scores, vec![-2.0, 0.0]);
    }

    #[test]
    fn mean_counts_repeats() {
        let lexicon = Lexicon::from_pairs(&[("love", 3.0)]);
        let mean = mean_sentiment(&tokens(&["love", "love", "story", "story"]), &lexicon);
        assert_eq!(mean, Some(1.5));
        assert_eq!(mean_sentiment(&[], &lexicon), None);
    }
}
