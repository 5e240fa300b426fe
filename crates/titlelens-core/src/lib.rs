pub mod aggregator;
pub mod cloud;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod selector;
pub mod sentiment;
pub mod stopwords;
pub mod tokenizer;

pub use config::{AnalysisConfig, CloudOptions};
pub use error::{CoreError, Result};
pub use pipeline::{run_analysis, AnalysisReport, Analyzer};
