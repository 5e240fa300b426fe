use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("failed to read title table {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("title table CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    #[error("title table is missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("title table data row {line_index} invalid: {message}")]
    DataRow { line_index: u64, message: String },

    #[error("title table validation error: {message}")]
    Validation { message: String },

    #[error("title table did not contain any data rows")]
    EmptyData,
}

impl From<csv::Error> for ParserError {
    fn from(source: csv::Error) -> Self {
        ParserError::Csv { source }
    }
}
