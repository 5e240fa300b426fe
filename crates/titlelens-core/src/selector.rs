use polars::prelude::*;
use tracing::info;

use crate::error::{CoreError, Result};

pub const TITLE_COLUMN: &str = "title";
pub const POPULARITY_COLUMN: &str = "total_weeks";

/// Keep the `k` most popular rows, most popular first. Rows with equal
/// popularity keep their input order; null popularity sorts last.
pub fn select_top(df: &DataFrame, k: usize) -> Result<DataFrame> {
    require_column(df, TITLE_COLUMN)?;
    let popularity = require_column(df, POPULARITY_COLUMN)?.cast(&DataType::Int64)?;
    let popularity = popularity.i64()?;

    let mut order: Vec<(usize, Option<i64>)> = popularity.into_iter().enumerate().collect();
    // `sort_by` is stable, so ties stay in input order.
    order.sort_by(|(_, a), (_, b)| b.unwrap_or(i64::MIN).cmp(&a.unwrap_or(i64::MIN)));

    let indices: Vec<IdxSize> = order
        .into_iter()
        .take(k)
        .map(|(idx, _)| idx as IdxSize)
        .collect();
    let selected = df.take(&IdxCa::from_vec("idx".into(), indices))?;

    info!(
        input_rows = df.height(),
        selected_rows = selected.height(),
        k,
        "selected most popular titles"
    );
    Ok(selected)
}

pub(crate) fn require_column<'a>(df: &'a DataFrame, name: &'static str) -> Result<&'a Column> {
    df.column(name).map_err(|_| CoreError::MissingColumn(name))
}
