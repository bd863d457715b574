// Integration tests for workbook decoding.
// Run with: cargo test -p sheetdash-io --test read_workbook

use chrono::NaiveDate;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use sheetdash_engine::Cell;
use sheetdash_io::{read_path, xlsx, ReadError};

fn two_sheet_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    let latency = workbook.add_worksheet();
    latency.set_name("Latency").unwrap();
    latency.write_string(0, 0, "s:keep_top=2").unwrap();
    let day = ExcelDateTime::from_ymd(2024, 1, 2).unwrap();
    latency.write_datetime_with_format(1, 0, &day, &date_format).unwrap();
    latency.write_string(1, 1, "v1").unwrap();
    latency.write_number(1, 2, 1.5).unwrap();
    latency.write_boolean(2, 0, true).unwrap();

    let throughput = workbook.add_worksheet();
    throughput.set_name("Throughput").unwrap();
    throughput.write_string(0, 0, "b:prod").unwrap();
    throughput.write_number(0, 1, 42.0).unwrap();

    workbook.save_to_buffer().unwrap()
}

#[test]
fn reads_all_worksheets_in_order() {
    let sheets = xlsx::read_bytes(two_sheet_workbook()).unwrap();
    let titles: Vec<_> = sheets.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Latency", "Throughput"]);
}

#[test]
fn decodes_dates_numbers_and_text() {
    let sheets = xlsx::read_bytes(two_sheet_workbook()).unwrap();
    let latency = &sheets[0];

    assert_eq!(latency.rows[0][0], Cell::text("s:keep_top=2"));

    let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(0, 0, 0).unwrap();
    assert_eq!(
        latency.rows[1],
        vec![Cell::Date(day), Cell::text("v1"), Cell::Number(1.5)]
    );
    assert_eq!(latency.rows[2][0], Cell::Number(1.0));
}

#[test]
fn first_sheet_only() {
    let sheet = xlsx::read_first_sheet(two_sheet_workbook()).unwrap();
    assert_eq!(sheet.title, "Latency");
}

#[test]
fn first_sheet_ignores_the_active_tab() {
    let mut workbook = Workbook::new();
    workbook.add_worksheet().set_name("Front").unwrap();
    let back = workbook.add_worksheet();
    back.set_name("Back").unwrap();
    back.set_active(true);
    let bytes = workbook.save_to_buffer().unwrap();

    assert_eq!(xlsx::read_first_sheet(bytes).unwrap().title, "Front");
}

#[test]
fn read_path_handles_xlsx_and_csv() {
    let dir = tempfile::tempdir().unwrap();

    let xlsx_path = dir.path().join("bench.xlsx");
    std::fs::write(&xlsx_path, two_sheet_workbook()).unwrap();
    assert_eq!(read_path(&xlsx_path).unwrap().len(), 2);

    let csv_path = dir.path().join("nightly.csv");
    std::fs::write(&csv_path, "run,1\nrun,2\n").unwrap();
    let sheets = read_path(&csv_path).unwrap();
    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].title, "nightly");
    assert_eq!(sheets[0].rows.len(), 2);
}

#[test]
fn tsv_is_always_tab_separated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nightly.tsv");
    // Commas on every line would win a guess
    std::fs::write(&path, "a,b\t1\nc,d\t2\n").unwrap();

    let sheets = read_path(&path).unwrap();
    assert_eq!(sheets[0].rows[0], vec![Cell::text("a,b"), Cell::Number(1.0)]);
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_path(&dir.path().join("nope.xlsx")).unwrap_err();
    assert!(err.is_not_found(), "got {:?}", err);
}

#[test]
fn corrupt_xlsx_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"PK\x03\x04 not really a zip").unwrap();
    assert!(matches!(read_path(&path), Err(ReadError::Malformed(_))));
}

#[test]
fn rows_and_columns_keep_sheet_positions() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Offset").unwrap();
    // Nothing above row 5 and nothing in column A
    sheet.write_string(4, 1, "s:axis=ms").unwrap();
    sheet.write_string(5, 1, "run").unwrap();
    sheet.write_number(5, 2, 7.0).unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let sheet = xlsx::read_first_sheet(bytes).unwrap();
    assert_eq!(sheet.rows.len(), 6);
    assert!(sheet.rows[..4].iter().all(|row| row.iter().all(Cell::is_empty)));
    assert_eq!(sheet.rows[4], vec![Cell::Empty, Cell::text("s:axis=ms"), Cell::Empty]);
    assert_eq!(sheet.rows[5], vec![Cell::Empty, Cell::text("run"), Cell::Number(7.0)]);
}
