//! Integration tests for DataLens.

use std::io::Write;
use tempfile::NamedTempFile;

use datalens::{
    ColumnType, DataLens, DataLensConfig, DatalensError, Encoding, ErrorKind, InsightSource,
    LoaderConfig, MockProvider, NarrativeError,
};

/// Helper to create a temporary CSV file with given content.
fn create_test_file(content: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content).expect("Failed to write to temp file");
    file
}

// =============================================================================
// Profiling
// =============================================================================

#[test]
fn test_analyze_basic_csv() {
    let content = b"id,name,age,active\n\
                    1,Alice,30,true\n\
                    2,Bob,25,false\n\
                    3,Carol,28,true\n";
    let file = create_test_file(content);

    let result = DataLens::new().analyze(file.path()).expect("Analysis failed");

    assert_eq!(result.source.row_count, 3);
    assert_eq!(result.source.column_count, 4);
    assert_eq!(result.profile.shape(), (3, 4));
    assert_eq!(result.profile.data_types["id"], ColumnType::Integer);
    assert_eq!(result.profile.data_types["name"], ColumnType::Text);
    assert_eq!(result.profile.data_types["active"], ColumnType::Boolean);
    assert_eq!(result.profile.total_missing(), 0);
}

#[test]
fn test_age_income_perfectly_correlated() {
    let content = b"age,income\n20,1000\n30,2000\n40,3000\n";

    let result = DataLens::new()
        .analyze_bytes(content, "people.csv")
        .expect("Analysis failed");

    assert_eq!(result.correlation.get("age", "income"), Some(1.0));
    assert_eq!(result.correlation.get("income", "age"), Some(1.0));
}

#[test]
fn test_single_numeric_column_has_empty_correlation() {
    let content = b"age,name\n20,Ann\n30,Bob\n";

    let result = DataLens::new()
        .analyze_bytes(content, "people.csv")
        .expect("Analysis failed");
    let json = serde_json::to_value(result.report()).unwrap();

    assert_eq!(json["correlation"], serde_json::json!({}));
}

#[test]
fn test_missing_values_and_dates() {
    let content = b"when,amount,note\n\
                    2024-01-05,10.5,ok\n\
                    2024-02-11,,\n\
                    ,7,NA\n";

    let result = DataLens::new()
        .analyze_bytes(content, "ledger.csv")
        .expect("Analysis failed");

    assert_eq!(result.profile.data_types["when"], ColumnType::DateTime);
    assert_eq!(result.profile.data_types["amount"], ColumnType::Float);
    assert_eq!(result.profile.missing_values["when"], 1);
    assert_eq!(result.profile.missing_values["amount"], 1);
    assert_eq!(result.profile.missing_values["note"], 2);
    assert_eq!(
        result.profile.columns_with_missing(),
        vec![("note", 2), ("when", 1), ("amount", 1)]
    );
}

#[test]
fn test_report_json_shape() {
    let content = b"a,b\n1,2\n2,4\n";

    let result = DataLens::new()
        .analyze_bytes(content, "data.csv")
        .expect("Analysis failed");
    let json = serde_json::to_value(result.report()).unwrap();
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();

    for key in ["shape", "columns", "eda", "data_types", "correlation", "ai_insights"] {
        assert!(keys.contains(&key), "missing key {key}");
    }
    assert_eq!(json["shape"], serde_json::json!([2, 2]));
    assert_eq!(json["eda"]["rows"], 2);
    assert_eq!(json["eda"]["column_names"], serde_json::json!(["a", "b"]));
}

// =============================================================================
// Input errors
// =============================================================================

#[test]
fn test_empty_upload() {
    let err = DataLens::new().analyze_bytes(b"", "empty.csv").unwrap_err();

    assert!(matches!(err, DatalensError::EmptyData));
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(err.to_string(), "Uploaded CSV file is empty");
}

#[test]
fn test_txt_rejected_before_parsing() {
    let err = DataLens::new()
        .analyze_bytes(b"\xff\xfe not csv at all", "notes.txt")
        .unwrap_err();

    assert_eq!(err.to_string(), "Only CSV files are allowed");
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn test_uppercase_extension_accepted() {
    let result = DataLens::new().analyze_bytes(b"a\n1\n", "DATA.CSV");
    assert!(result.is_ok());
}

#[test]
fn test_empty_filename() {
    let err = DataLens::new().analyze_bytes(b"a\n1\n", "").unwrap_err();
    assert_eq!(err.to_string(), "No file selected");
}

#[test]
fn test_ragged_row_is_invalid_input() {
    let err = DataLens::new()
        .analyze_bytes(b"a,b\n1,2\n3,4,5\n", "data.csv")
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(err.to_string().contains("Expected 2 fields"));
}

// =============================================================================
// Encodings
// =============================================================================

#[test]
fn test_latin1_bytes_load() {
    // "café" and "Zürich" in ISO-8859-1.
    let content = b"name,city\ncaf\xe9,Z\xfcrich\n";

    let (dataset, source) = DataLens::new()
        .load(content, "latin.csv")
        .expect("Latin-1 should load");

    assert_eq!(source.encoding, "latin-1");
    assert_eq!(
        dataset.column("city").unwrap().values[0].to_string(),
        "Zürich"
    );
}

#[test]
fn test_strict_utf8_rejects_latin1() {
    let config = DataLensConfig {
        loader: LoaderConfig {
            encoding: Encoding::Utf8,
            ..Default::default()
        },
    };

    let err = DataLens::with_config(config)
        .analyze_bytes(b"name\ncaf\xe9\n", "latin.csv")
        .unwrap_err();
    assert!(matches!(err, DatalensError::Encoding(_)));
}

// =============================================================================
// Insights
// =============================================================================

#[test]
fn test_no_credential_gives_fallback_with_summary() {
    let result = DataLens::new()
        .analyze_bytes(b"x,y\n1,2\n2,3\n", "data.csv")
        .expect("Analysis failed");
    let text = &result.insight.text;

    assert_eq!(result.insight.source, InsightSource::Fallback);
    assert!(text.starts_with("⚠️ AI Insights (Fallback Mode)\n\n• Dataset loaded successfully\n"));
    assert!(text.contains("• Check categorical columns for imbalance\n\n"));
    assert!(text.contains("Dataset Overview\n----------------\nRows: 2\nColumns: 2\n"));
}

#[test]
fn test_generator_failure_reported_in_text() {
    let lens = DataLens::new().with_narrator(MockProvider::failing(NarrativeError::Api {
        status: 500,
        message: "backend error".into(),
    }));

    let result = lens
        .analyze_bytes(b"x\n1\n", "data.csv")
        .expect("Analysis failed");

    assert_eq!(result.insight.source, InsightSource::Failed);
    assert_eq!(
        result.insight.text,
        "AI insight generation failed.\nReason: API error (500): backend error"
    );
}

#[test]
fn test_generated_insight_returned_verbatim() {
    let lens = DataLens::new().with_narrator(MockProvider::with_response("Income rises with age."));

    let result = lens
        .analyze_bytes(b"age,income\n20,1000\n30,2000\n", "data.csv")
        .expect("Analysis failed");

    assert_eq!(result.report().ai_insights, "Income rises with age.");
}

#[test]
fn test_analysis_is_deterministic() {
    let content = b"a,b,c\n1,2.5,x\n4,,y\n2,1.5,\n";
    let lens = DataLens::new();

    let first = lens.analyze_bytes(content, "d.csv").unwrap();
    let second = lens.analyze_bytes(content, "d.csv").unwrap();

    assert_eq!(first.report(), second.report());
    assert_eq!(first.source.hash, second.source.hash);
}
