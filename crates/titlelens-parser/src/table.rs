use std::collections::HashMap;
use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use polars::prelude::*;
use tracing::debug;

use crate::errors::ParserError;
use crate::model::{TitleColumn, TitleTable};

const OPTIONAL_COLUMNS: [TitleColumn; 2] = [TitleColumn::Author, TitleColumn::Year];

/// Read a tab-separated title table from disk.
pub fn load_title_table(path: impl AsRef<Path>) -> Result<TitleTable, ParserError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ParserError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_title_table(&content)
}

/// Parse tab-separated content whose first line is a header row.
pub fn parse_title_table(content: &str) -> Result<TitleTable, ParserError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(content.as_bytes());

    let header = reader.headers()?.clone();
    let positions = locate_columns(&header)?;

    let mut columns = TitleColumns::default();
    for result in reader.records() {
        let record = result?;
        let line_index = record
            .position()
            .map(|position| position.line())
            .unwrap_or_default();
        columns.push_record(&record, &positions, line_index)?;
    }

    if columns.title.is_empty() {
        return Err(ParserError::EmptyData);
    }

    let df = build_title_dataframe(columns)?;
    debug!(rows = df.height(), columns = df.width(), "parsed title table");
    Ok(TitleTable { df })
}

fn locate_columns(header: &StringRecord) -> Result<HashMap<TitleColumn, usize>, ParserError> {
    let mut positions = HashMap::new();
    for (idx, name) in header.iter().enumerate() {
        if let Ok(column) = TitleColumn::try_from(name) {
            positions.entry(column).or_insert(idx);
        }
    }

    for column in TitleColumn::REQUIRED {
        if !positions.contains_key(&column) {
            return Err(ParserError::MissingColumn {
                column: column.canonical_name(),
            });
        }
    }

    Ok(positions)
}

#[derive(Debug, Default)]
struct TitleColumns {
    title: Vec<String>,
    total_weeks: Vec<i64>,
    author: Option<Vec<Option<String>>>,
    year: Option<Vec<Option<i64>>>,
}

impl TitleColumns {
    fn push_record(
        &mut self,
        record: &StringRecord,
        positions: &HashMap<TitleColumn, usize>,
        line_index: u64,
    ) -> Result<(), ParserError> {
        let field = |column: TitleColumn| record_field(record, positions, column);

        self.title.push(field(TitleColumn::Title).to_string());
        self.total_weeks.push(parse_required_i64(
            field(TitleColumn::TotalWeeks),
            line_index,
            TitleColumn::TotalWeeks.canonical_name(),
        )?);

        for column in OPTIONAL_COLUMNS {
            if !positions.contains_key(&column) {
                continue;
            }
            let raw = field(column);
            match column {
                TitleColumn::Author => {
                    let value = clean_optional(raw);
                    self.author.get_or_insert_with(Vec::new).push(value);
                }
                TitleColumn::Year => {
                    let value = parse_optional_i64(raw, line_index, column.canonical_name())?;
                    self.year.get_or_insert_with(Vec::new).push(value);
                }
                TitleColumn::Title | TitleColumn::TotalWeeks => {}
            }
        }

        Ok(())
    }
}

fn record_field<'r>(
    record: &'r StringRecord,
    positions: &HashMap<TitleColumn, usize>,
    column: TitleColumn,
) -> &'r str {
    positions
        .get(&column)
        .and_then(|idx| record.get(*idx))
        .unwrap_or_default()
}

fn build_title_dataframe(columns: TitleColumns) -> Result<DataFrame, ParserError> {
    let mut cols: Vec<Column> = Vec::new();
    cols.push(Series::new(TitleColumn::Title.canonical_name().into(), columns.title).into());
    cols.push(
        Series::new(
            TitleColumn::TotalWeeks.canonical_name().into(),
            columns.total_weeks,
        )
        .into(),
    );

    if let Some(values) = columns.author {
        let utf8: Vec<Option<&str>> = values.iter().map(|v| v.as_deref()).collect();
        cols.push(Series::new(TitleColumn::Author.canonical_name().into(), utf8).into());
    }

    if let Some(values) = columns.year {
        cols.push(Series::new(TitleColumn::Year.canonical_name().into(), values).into());
    }

    DataFrame::new(cols).map_err(|err| ParserError::Validation {
        message: format!("failed to build title dataframe: {err}"),
    })
}

fn clean_optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if is_missing(trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn is_missing(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("na") || value.eq_ignore_ascii_case("nan")
}

pub(crate) fn parse_required_i64(
    value: &str,
    line_index: u64,
    column: &str,
) -> Result<i64, ParserError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|err| ParserError::DataRow {
            line_index,
            message: format!("failed to parse column '{column}' as integer: {err}"),
        })
}

pub(crate) fn parse_optional_i64(
    value: &str,
    line_index: u64,
    column: &str,
) -> Result<Option<i64>, ParserError> {
    let trimmed = value.trim();
    if is_missing(trimmed) {
        return Ok(None);
    }
    trimmed
        .parse::<i64>()
        .map(Some)
        .map_err(|err| ParserError::DataRow {
            line_index,
            message: format!("failed to parse column '{column}' as integer: {err}"),
        })
}
