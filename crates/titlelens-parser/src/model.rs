use std::fmt;

use polars::prelude::*;

/// Columns the loader understands. `Title` and `TotalWeeks` are required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TitleColumn {
    Title,
    TotalWeeks,
    Author,
    Year,
}

impl TitleColumn {
    pub const REQUIRED: [TitleColumn; 2] = [TitleColumn::Title, TitleColumn::TotalWeeks];

    pub fn canonical_name(&self) -> &'static str {
        match self {
            TitleColumn::Title => "title",
            TitleColumn::TotalWeeks => "total_weeks",
            TitleColumn::Author => "author",
            TitleColumn::Year => "year",
        }
    }
}

impl fmt::Display for TitleColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

impl TryFrom<&str> for TitleColumn {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(TitleColumn::Title),
            "total_weeks" => Ok(TitleColumn::TotalWeeks),
            "author" => Ok(TitleColumn::Author),
            "year" => Ok(TitleColumn::Year),
            other => Err(format!("unknown title column '{other}'")),
        }
    }
}

/// Loaded title records. Always carries `title` (Utf8) and `total_weeks`
/// (Int64); `author` and `year` are present only when the input had them.
#[derive(Debug, Clone)]
pub struct TitleTable {
    pub df: DataFrame,
}

impl TitleTable {
    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    pub fn has_column(&self, column: TitleColumn) -> bool {
        self.df.column(column.canonical_name()).is_ok()
    }

    pub fn titles(&self) -> PolarsResult<Vec<String>> {
        let titles = self.df.column(TitleColumn::Title.canonical_name())?.str()?;
        Ok(titles
            .into_iter()
            .map(|value| value.unwrap_or_default().to_string())
            .collect())
    }

    pub fn into_frame(self) -> DataFrame {
        self.df
    }
}
