use super::*;

fn row(values: &[f64]) -> RawRow {
    values.iter().copied().map(RawValue::from).collect()
}

#[test]
fn test_raw_value_typing() {
    assert_eq!(RawValue::parse(" 1.5 "), RawValue::Number(1.5));
    assert_eq!(RawValue::parse("-2e3"), RawValue::Number(-2000.0));
    assert_eq!(RawValue::parse(""), RawValue::Empty);
    assert_eq!(RawValue::parse("Time"), RawValue::Text("Time".to_string()));
    assert!(RawValue::parse("NaN").as_finite().is_none());
    assert!(RawValue::parse("inf").as_finite().is_none());
}

#[test]
fn test_clean_rows_pass_through() {
    let rows = vec![
        row(&[0.0, 600.0, 10.0]),
        row(&[1.0, 605.0, 12.0]),
        row(&[2.0, 610.0, 20.0]),
        row(&[3.0, 615.0, 22.0]),
    ];

    let report = DataIngestor::default().ingest(&rows).unwrap();
    assert_eq!(report.samples.len(), 4);
    assert_eq!(report.samples[2], Sample::new(2.0, 610.0, 20.0));
    assert!(!report.header_skipped);
    assert_eq!(report.dropped_rows(), 0);
    assert!(report.warnings().is_empty());
}

#[test]
fn test_header_detection() {
    let rows = vec![
        vec!["Time".into(), "Temperature".into(), "DTA".into()],
        row(&[0.0, 600.0, 10.0]),
        row(&[1.0, 605.0, 12.0]),
        row(&[2.0, 610.0, 20.0]),
    ];
    assert!(detect_header(&rows));

    let report = DataIngestor::default().ingest(&rows).unwrap();
    assert!(report.header_skipped);
    assert_eq!(report.samples.len(), 3);
    assert_eq!(report.invalid_rows, 0);
    assert_eq!(report.total_rows, 4);
}

#[test]
fn test_no_header_when_second_row_not_numeric() {
    let rows = vec![
        vec!["a".into(), "b".into(), "c".into()],
        vec![RawValue::Number(0.0), RawValue::Empty, RawValue::Number(1.0)],
    ];
    assert!(!detect_header(&rows));
    assert!(!detect_header(&rows[..1]));
}

#[test]
fn test_invalid_and_non_monotonic_rows_are_counted() {
    let rows = vec![
        row(&[0.0, 600.0, 10.0]),
        vec![RawValue::Number(0.5), "oops".into(), RawValue::Number(1.0)],
        row(&[1.0, 605.0, 12.0]),
        row(&[1.0, 606.0, 13.0]),
        row(&[0.5, 607.0, 14.0]),
        row(&[f64::NAN, 608.0, 14.0]),
        vec![RawValue::Number(2.5), RawValue::Number(609.0)],
        row(&[2.0, 610.0, 20.0]),
    ];

    let report = DataIngestor::default().ingest(&rows).unwrap();
    let times: Vec<f64> = report.samples.iter().map(|s| s.time).collect();
    assert_eq!(times, vec![0.0, 1.0, 2.0]);
    assert_eq!(report.invalid_rows, 3);
    assert_eq!(report.non_monotonic_rows, 2);
    assert_eq!(
        report.warnings(),
        vec![
            "skipped 3 rows with invalid data".to_string(),
            "skipped 2 rows with non-monotonic time".to_string(),
        ]
    );
}

#[test]
fn test_extra_columns_are_ignored() {
    let rows = vec![
        row(&[0.0, 600.0, 10.0, 99.0]),
        row(&[1.0, 605.0, 12.0, 98.0]),
        row(&[2.0, 610.0, 20.0, 97.0]),
    ];
    let report = DataIngestor::default().ingest(&rows).unwrap();
    assert_eq!(report.samples.len(), 3);
}

#[test]
fn test_too_few_rows_is_a_validation_error() {
    let rows = vec![row(&[0.0, 600.0, 10.0]), row(&[1.0, 605.0, 12.0])];

    let err = DataIngestor::default().ingest(&rows).unwrap_err();
    match err {
        IngestError::Validation(ValidationError::InsufficientData {
            valid, required, ..
        }) => {
            assert_eq!(valid, 2);
            assert_eq!(required, 3);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_empty_input_is_a_validation_error() {
    let err = DataIngestor::default().ingest(&[]).unwrap_err();
    assert!(matches!(err, IngestError::Validation(_)));
}

#[test]
fn test_too_few_columns() {
    let rows = vec![row(&[0.0, 600.0]), row(&[1.0, 605.0]), row(&[2.0, 610.0])];
    let err = DataIngestor::default().ingest(&rows).unwrap_err();
    assert!(matches!(err, IngestError::TooFewColumns { found: 2 }));
}

#[test]
fn test_custom_minimum() {
    let rows = vec![
        row(&[0.0, 600.0, 10.0]),
        row(&[1.0, 605.0, 12.0]),
        row(&[2.0, 610.0, 20.0]),
    ];
    assert!(DataIngestor::new(4).ingest(&rows).is_err());
    assert!(DataIngestor::new(3).ingest(&rows).is_ok());
}

#[test]
fn test_parse_csv_text() {
    let text = "Time,Temperature,DTA\n0,600,10\n\n1, 605 ,12\n2,610,\n3,615,22\n";
    let rows = parse_csv(text.as_bytes()).unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0][0], RawValue::Text("Time".to_string()));
    assert_eq!(rows[2][1], RawValue::Number(605.0));
    assert_eq!(rows[3][2], RawValue::Empty);

    let report = DataIngestor::default().ingest(&rows).unwrap();
    assert!(report.header_skipped);
    assert_eq!(report.samples.len(), 3);
    assert_eq!(report.invalid_rows, 1);
}

#[test]
fn test_parse_csv_skips_short_lines() {
    let text = "0,600,10\n1,605\n2\n3,615,22,extra\n";
    let rows = parse_csv(text.as_bytes()).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].len(), 3);
    assert_eq!(rows[1].len(), 4);
}

#[test]
fn test_preamble_above_header() {
    let text = "DTA export v1\nTime,Temperature,DTA\n0,600,10\n1,605,12\n2,610,20\n3,615,22\n";
    let rows = parse_csv(text.as_bytes()).unwrap();
    let report = DataIngestor::default().ingest(&rows).unwrap();

    assert!(report.header_skipped);
    assert_eq!(report.samples.len(), 4);
    assert_eq!(report.invalid_rows, 0);
    assert_eq!(report.samples[0], Sample::new(0.0, 600.0, 10.0));
}

#[test]
fn test_parse_csv_rejects_invalid_utf8() {
    let bytes: &[u8] = &[0x30, 0x2c, 0xff, 0xfe, 0x2c, 0x31, 0x0a];
    let err = parse_csv(bytes).unwrap_err();
    assert!(matches!(err, IngestError::CsvError(_)));
}

#[test]
fn test_read_csv_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("trace.csv");
    std::fs::write(&path, "0,600,10\n1,605,12\n2,610,20\n")?;

    let rows = read_csv_file(&path)?;
    assert_eq!(rows.len(), 3);

    let missing = read_csv_file(dir.path().join("missing.csv")).unwrap_err();
    assert!(matches!(missing, IngestError::IoError(_)));
    Ok(())
}
