//! Stopword filtering
//!
//! The default set is the English list shipped with the common word-cloud
//! tooling. Entries with apostrophes can never match a token produced by the
//! tokenizer but are kept so the set stays recognisable.

use rustc_hash::FxHashSet;
use tracing::debug;

pub const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "can't", "cannot", "com", "could", "couldn't", "did", "didn't",
    "do", "does", "doesn't", "doing", "don't", "down", "during", "each", "else", "ever", "few",
    "for", "from", "further", "get", "had", "hadn't", "has", "hasn't", "have", "haven't",
    "having", "he", "he'd", "he'll", "he's", "hence", "her", "here", "here's", "hers", "herself",
    "him", "himself", "his", "how", "how's", "however", "http", "i", "i'd", "i'll", "i'm",
    "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "just", "k",
    "let's", "like", "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of",
    "off", "on", "once", "only", "or", "other", "otherwise", "ought", "our", "ours", "ourselves",
    "out", "over", "own", "r", "same", "shall", "shan't", "she", "she'd", "she'll", "she's",
    "should", "shouldn't", "since", "so", "some", "such", "than", "that", "that's", "the",
    "their", "theirs", "them", "themselves", "then", "there", "there's", "therefore", "these",
    "they", "they'd", "they'll", "they're", "they've", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "wasn't", "we", "we'd", "we'll", "we're", "we've",
    "were", "weren't", "what", "what's", "when", "when's", "where", "where's", "which", "while",
    "who", "who's", "whom", "why", "why's", "with", "won't", "would", "wouldn't", "www", "you",
    "you'd", "you'll", "you're", "you've", "your", "yours", "yourself", "yourselves",
];

/// A set of lowercase words excluded from analysis.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl StopwordFilter {
    pub fn english() -> Self {
        Self::from_list(ENGLISH_STOPWORDS)
    }

    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
        }
    }

    pub fn from_list<S: AsRef<str>>(words: &[S]) -> Self {
        let mut filter = Self::empty();
        filter.add_stopwords(words);
        filter
    }

    pub fn with_extra<S: AsRef<str>>(mut self, words: &[S]) -> Self {
        self.add_stopwords(words);
        self
    }

    pub fn add_stopwords<S: AsRef<str>>(&mut self, words: &[S]) {
        for word in words {
            self.stopwords.insert(word.as_ref().to_lowercase());
        }
    }

    /// Membership test. Tokens are already lowercase, so the lookup is exact.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    /// Drop stopwords, preserving the order of what remains.
    pub fn filter_tokens(&self, tokens: &[String]) -> Vec<String> {
        let kept: Vec<String> = tokens
            .iter()
            .filter(|token| !self.is_stopword(token))
            .cloned()
            .collect();
        debug!(
            before = tokens.len(),
            after = kept.len(),
            "removed stopwords"
        );
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize_title;

    #[test]
    fn english_list_covers_common_words() {
        let filter = StopwordFilter::english();
        for word in ["the", "and", "of", "a", "to"] {
            assert!(filter.is_stopword(word), "{word} should be a stopword");
        }
        assert!(!filter.is_stopword("murder"));
    }

    #[test]
    fn case_folded_title_loses_stopwords() {
        let filter = StopwordFilter::from_list(&["the"]);
        let tokens = tokenize_title("The Cat Sat");
        assert_eq!(filter.filter_tokens(&tokens), vec!["cat", "sat"]);
    }

    #[test]
    fn extras_are_lowercased() {
        let filter = StopwordFilter::empty().with_extra(&["Novel"]);
        assert!(filter.is_stopword("novel"));
        assert_eq!(filter.len(), 1);
    }

    #[test]
    fn filtering_preserves_order_and_repeats() {
        let filter = StopwordFilter::english();
        let tokens: Vec<String> = ["dark", "the", "night", "dark"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(filter.filter_tokens(&tokens), vec!["dark", "night", "dark"]);
    }
}
