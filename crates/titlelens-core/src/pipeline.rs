use polars::prelude::DataFrame;
use titlelens_parser::{load_title_table, TitleTable};
use tracing::info;

use crate::aggregator::aggregate;
use crate::cloud::{generate_cloud, CloudLayout};
use crate::config::AnalysisConfig;
use crate::error::{CoreError, Result};
use crate::selector::select_top;
use crate::sentiment::{mean_sentiment, score_words, Lexicon, SentimentTable};
use crate::stopwords::StopwordFilter;
use crate::tokenizer::{tokenize_frame, word_column};

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// The top-K title records.
    pub selected: DataFrame,
    /// Tokens that survived stopword filtering, in title order.
    pub tokens: Vec<String>,
    pub sentiments: SentimentTable,
    pub mean_sentiment: Option<f64>,
    /// `word`, `n`, `score` for words seen at least `min_count` times.
    pub result: DataFrame,
    pub cloud: CloudLayout,
    pub cloud_svg: String,
}

pub struct Analyzer {
    config: AnalysisConfig,
    stopwords: StopwordFilter,
    lexicon: Lexicon,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig, stopwords: StopwordFilter, lexicon: Lexicon) -> Self {
        Self {
            config,
            stopwords,
            lexicon,
        }
    }

    /// English stopwords plus the configured extras, and either the bundled
    /// lexicon or the one at `lexicon_path`.
    pub fn from_config(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let stopwords = StopwordFilter::english().with_extra(&config.extra_stopwords);
        let lexicon = match &config.lexicon_path {
            Some(path) => Lexicon::load(path)?,
            None => Lexicon::bundled()?,
        };
        Ok(Self::new(config, stopwords, lexicon))
    }

    pub fn analyze(&self, titles: &DataFrame) -> Result<AnalysisReport> {
        let selected = select_top(titles, self.config.top_k)?;

        let words = tokenize_frame(&selected)?;
        let tokens = self.stopwords.filter_tokens(&word_column(&words)?);
        info!(
            raw_tokens = words.height(),
            kept_tokens = tokens.len(),
            "tokenized selected titles"
        );

        let sentiments = score_words(&tokens, &self.lexicon);
        let mean = mean_sentiment(&tokens, &self.lexicon);
        let result = aggregate(&tokens, &sentiments, self.config.min_count)?;

        let (cloud, cloud_svg) = generate_cloud(&tokens, &self.stopwords, &self.config.cloud)?;

        Ok(AnalysisReport {
            selected,
            tokens,
            sentiments,
            mean_sentiment: mean,
            result,
            cloud,
            cloud_svg,
        })
    }

    pub fn analyze_table(&self, table: &TitleTable) -> Result<AnalysisReport> {
        self.analyze(&table.df)
    }
}

/// Load the configured input and analyze it.
pub fn run_analysis(config: AnalysisConfig) -> Result<AnalysisReport> {
    let input = config
        .input_path
        .clone()
        .ok_or_else(|| CoreError::Validation("no input path configured".into()))?;
    let analyzer = Analyzer::from_config(config)?;
    let table = load_title_table(&input)?;
    info!(path = %input.display(), rows = table.height(), "loaded title table");
    analyzer.analyze_table(&table)
}
