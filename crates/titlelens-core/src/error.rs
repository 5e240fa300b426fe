use thiserror::Error;
use titlelens_parser::ParserError;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Parser(#[from] ParserError),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Table is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Lexicon line {line} invalid: {message}")]
    Lexicon { line: usize, message: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Word cloud rendering failed: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
