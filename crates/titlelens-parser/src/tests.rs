use std::fs;
use std::path::PathBuf;

use crate::errors::ParserError;
use crate::model::TitleColumn;
use crate::{load_title_table, parse_title_table};

fn fixture_path(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(path)
}

fn fixture(path: &str) -> String {
    let full_path = fixture_path(path);
    fs::read_to_string(&full_path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {}", full_path.display(), err))
}

#[test]
fn parses_sample_title_table() {
    let content = fixture("titles_sample.tsv");
    let table = parse_title_table(&content).expect("title table parse failed");

    assert_eq!(table.height(), 5);
    assert_eq!(
        table.df.get_column_names(),
        vec!["title", "total_weeks", "author", "year"]
    );

    let weeks = table
        .df
        .column("total_weeks")
        .expect("total_weeks column missing")
        .i64()
        .expect("total_weeks column not integer")
        .into_no_null_iter()
        .collect::<Vec<_>>();
    assert_eq!(weeks, vec![15, 11, 37, 37, 11]);

    let titles = table.titles().expect("titles readable");
    assert_eq!(titles[2], "A TIME TO KILL");
    assert_eq!(titles[4], "GONE WITH THE WIND");
}

#[test]
fn optional_columns_treat_na_as_null() {
    let table = parse_title_table(&fixture("titles_sample.tsv")).expect("parse failed");
    assert!(table.has_column(TitleColumn::Author));

    let years = table.df.column("year").unwrap().i64().unwrap();
    assert_eq!(years.get(0), Some(1991));
    assert_eq!(years.get(4), None);

    let authors = table.df.column("author").unwrap().str().unwrap();
    assert_eq!(authors.get(2), Some("John Grisham"));
}

#[test]
fn minimal_table_has_only_required_columns() {
    let table = parse_title_table("title\ttotal_weeks\nDUNE\t4\nREBECCA\t12\n").unwrap();
    assert_eq!(table.df.get_column_names(), vec!["title", "total_weeks"]);
    assert!(!table.has_column(TitleColumn::Year));
    assert_eq!(table.titles().unwrap(), vec!["DUNE", "REBECCA"]);
}

#[test]
fn table_hands_over_its_frame() {
    let table = parse_title_table("title\ttotal_weeks\nDUNE\t4\n").unwrap();
    assert!(!table.is_empty());
    let df = table.into_frame();
    assert_eq!(df.shape(), (1, 2));
    assert_eq!(df.column("title").unwrap().str().unwrap().get(0), Some("DUNE"));
}

#[test]
fn header_names_are_case_insensitive() {
    let table = parse_title_table("Title\tTOTAL_WEEKS\nDUNE\t4\n").unwrap();
    assert_eq!(table.height(), 1);
}

#[test]
fn missing_popularity_column_is_rejected() {
    let err = parse_title_table(&fixture("missing_weeks.tsv")).unwrap_err();
    assert!(matches!(
        err,
        ParserError::MissingColumn {
            column: "total_weeks"
        }
    ));
}

#[test]
fn header_without_rows_is_empty_data() {
    let err = parse_title_table(&fixture("header_only.tsv")).unwrap_err();
    assert!(matches!(err, ParserError::EmptyData));
}

#[test]
fn non_integer_weeks_reports_line() {
    let err = parse_title_table(&fixture("bad_weeks.tsv")).unwrap_err();
    match err {
        ParserError::DataRow { line_index, message } => {
            assert_eq!(line_index, 3);
            assert!(message.contains("total_weeks"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn ragged_rows_surface_csv_errors() {
    let err = parse_title_table("title\ttotal_weeks\nDUNE\t4\textra\n").unwrap_err();
    assert!(matches!(err, ParserError::Csv { .. }));
}

#[test]
fn load_reports_missing_file() {
    let err = load_title_table(fixture_path("does_not_exist.tsv")).unwrap_err();
    assert!(matches!(err, ParserError::Io { .. }));
}
