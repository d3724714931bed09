use std::path::Path;

use rstest::rstest;

use palist::conf::ReportConfig;
use palist::core::{
    EXIT_COLUMN_NOT_FOUND, EXIT_NOT_BINARY_TABLE, EXIT_TYPE_MISMATCH, PalistError,
};
use palist::fits::{END_OF_FILE, FILE_NOT_OPENED, StorageType};
use palist::table::TableReport;
use palist::testutil::{Column, ColumnData, FitsBuilder, sample_report_table};

fn run(path: &Path) -> (Result<usize, PalistError>, String) {
    let report = TableReport::new(ReportConfig::default());
    let mut out = Vec::new();
    let result = report.run(path, &mut out);
    (result, String::from_utf8(out).unwrap())
}

fn report_columns() -> Vec<Column> {
    vec![
        Column::new("PA", ColumnData::Float32(vec![10.0, 20.0, 30.0])),
        Column::new("MJD", ColumnData::Float64(vec![100.5, 200.5, 300.5])),
        Column::new("Included", ColumnData::Byte(vec![1, 0, 1])),
        Column::new("ascending", ColumnData::Byte(vec![1, 1, 0])),
    ]
}

#[test]
fn test_prints_included_rows() {
    let file = sample_report_table().write_temp().unwrap();
    let (result, out) = run(file.path());

    assert_eq!(result, Ok(2));
    assert_eq!(out, "1        10.00       100.50\n0        30.00       300.50\n");
}

#[test]
fn test_missing_column_prints_nothing() {
    let columns: Vec<Column> = report_columns()
        .into_iter()
        .filter(|c| c.name.as_deref() != Some("MJD"))
        .collect();
    let file = FitsBuilder::new().bintable(&columns).write_temp().unwrap();
    let (result, out) = run(file.path());

    let err = result.unwrap_err();
    assert_eq!(err, PalistError::ColumnNotFound("MJD".to_string()));
    assert_eq!(err.exit_code(), EXIT_COLUMN_NOT_FOUND);
    assert_eq!(out, "");
}

#[test]
fn test_integer_pa_is_type_mismatch() {
    let mut columns = report_columns();
    columns[0] = Column::new("PA", ColumnData::Int16(vec![10, 20, 30]));
    let file = FitsBuilder::new().bintable(&columns).write_temp().unwrap();
    let (result, out) = run(file.path());

    let err = result.unwrap_err();
    assert_eq!(
        err,
        PalistError::TypeMismatch {
            column: "PA".to_string(),
            position: 1,
            expected: StorageType::Float32,
            actual: StorageType::Int16,
        }
    );
    assert_eq!(err.exit_code(), EXIT_TYPE_MISMATCH);
    assert_eq!(out, "");
}

#[rstest]
#[case::ascii_table(FitsBuilder::new().ascii_table())]
#[case::image(FitsBuilder::new().image(&[1, 2, 3]))]
fn test_not_binary_table(#[case] builder: FitsBuilder) {
    let file = builder.write_temp().unwrap();
    let (result, out) = run(file.path());

    let err = result.unwrap_err();
    assert_eq!(err, PalistError::NotBinaryTable);
    assert_eq!(err.exit_code(), EXIT_NOT_BINARY_TABLE);
    assert_eq!(out, "");
}

#[test]
fn test_column_names_are_case_insensitive() {
    let columns: Vec<Column> = report_columns()
        .into_iter()
        .rev()
        .map(|c| {
            let name = c.name.as_deref().unwrap_or_default().to_uppercase();
            Column::new(&name, c.data)
        })
        .collect();
    let file = FitsBuilder::new().bintable(&columns).write_temp().unwrap();
    let (result, out) = run(file.path());

    assert_eq!(result, Ok(2));
    assert_eq!(out, "1        10.00       100.50\n0        30.00       300.50\n");
}

#[test]
fn test_extra_columns_are_ignored() {
    let mut columns = report_columns();
    columns.insert(
        1,
        Column::new("RA", ColumnData::Float64(vec![1.0, 2.0, 3.0])),
    );
    columns.push(Column::new("flag", ColumnData::Logical(vec![true, false, true])));
    let file = FitsBuilder::new()
        .primary_image(&[7; 2000])
        .bintable(&columns)
        .write_temp()
        .unwrap();
    let (result, out) = run(file.path());

    assert_eq!(result, Ok(2));
    assert_eq!(out.lines().count(), 2);
}

#[test]
fn test_byte_column_stored_as_logical_is_mismatch() {
    let mut columns = report_columns();
    columns[2] = Column::new("Included", ColumnData::Logical(vec![true, false, true]));
    let file = FitsBuilder::new().bintable(&columns).write_temp().unwrap();
    let (result, _) = run(file.path());

    assert_eq!(result.unwrap_err().exit_code(), EXIT_TYPE_MISMATCH);
}

#[test]
fn test_table_hdu_is_configurable() {
    let file = FitsBuilder::new()
        .image(&[1, 2])
        .bintable(&report_columns())
        .write_temp()
        .unwrap();

    let (result, _) = run(file.path());
    assert_eq!(result, Err(PalistError::NotBinaryTable));

    let report = TableReport::new(ReportConfig { hdu: 3 });
    let mut out = Vec::new();
    assert_eq!(report.run(file.path(), &mut out), Ok(2));
}

#[test]
fn test_missing_file_passes_status_through() {
    let dir = tempfile::TempDir::new().unwrap();
    let (result, _) = run(&dir.path().join("absent.fits"));

    assert_eq!(result.unwrap_err().exit_code(), FILE_NOT_OPENED);
}

#[test]
fn test_primary_only_file_is_end_of_file() {
    let file = FitsBuilder::new().write_temp().unwrap();
    let (result, _) = run(file.path());

    assert_eq!(result.unwrap_err().exit_code(), END_OF_FILE);
}

#[test]
fn test_files_are_processed_in_order() {
    let first = sample_report_table().write_temp().unwrap();
    let second = FitsBuilder::new()
        .bintable(&[
            Column::new("ascending", ColumnData::Byte(vec![0])),
            Column::new("Included", ColumnData::Byte(vec![1])),
            Column::new("MJD", ColumnData::Float64(vec![59000.25])),
            Column::new("PA", ColumnData::Float32(vec![-45.5])),
        ])
        .write_temp()
        .unwrap();

    let report = TableReport::new(ReportConfig::default());
    let mut out = Vec::new();
    let mut total = 0;
    for path in [first.path(), second.path(), first.path()] {
        total += report.run(path, &mut out).unwrap();
    }

    assert_eq!(total, 5);
    let lines: Vec<&str> = std::str::from_utf8(&out).unwrap().lines().collect();
    assert_eq!(
        lines,
        vec![
            "1        10.00       100.50",
            "0        30.00       300.50",
            "0       -45.50     59000.25",
            "1        10.00       100.50",
            "0        30.00       300.50",
        ]
    );
}
