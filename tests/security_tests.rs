//! Security hardening tests for the upload path and web limits.

use paleoseq::utils::validation::{validate_upload_filename, ValidationError, MAX_SAMPLES};
use paleoseq::web::server::{MAX_CSV_FIELD_SIZE, MAX_MULTIPART_FIELDS, MAX_QUESTION_SIZE};

/// Directory traversal and dangerous characters must never survive
/// filename validation
#[test]
fn test_upload_filename_traversal_prevention() {
    for name in [
        "../../../etc/passwd.csv",
        "..\\windows\\system32.csv",
        "samples/../../secret.csv",
        "null\0byte.csv",
    ] {
        assert!(
            validate_upload_filename(name).is_err(),
            "'{name}' should be rejected"
        );
    }
}

#[test]
fn test_upload_requires_csv_extension() {
    assert!(matches!(
        validate_upload_filename("samples.bam"),
        Err(ValidationError::NotCsv)
    ));
    assert!(validate_upload_filename("samples.csv").is_ok());
}

/// Upload limits must bound worst-case memory usage
#[test]
fn test_upload_limits_bound_memory() {
    // Concurrency limit (100) times the max CSV field size stays under 1GB
    let worst_case = 100 * MAX_CSV_FIELD_SIZE;
    assert!(worst_case < 1_000_000_000);

    // Field metadata is negligible next to the body limit
    assert!(MAX_MULTIPART_FIELDS < 100);

    // Questions forwarded upstream are tightly capped
    assert!(MAX_QUESTION_SIZE <= 64 * 1024);
}

/// The per-upload row cap keeps store growth bounded per request
#[test]
fn test_sample_row_cap_is_enforced_in_parsing() {
    use paleoseq::parsing::csv::{parse_csv_text, ParseError};

    // A CSV one row over the limit must be rejected, not truncated
    let mut csv = String::from("id,region,age,seed\n");
    for i in 0..=MAX_SAMPLES {
        csv.push_str(&format!("S{i},Region,1000,tag\n"));
    }

    match parse_csv_text(&csv) {
        Err(ParseError::TooManySamples(count)) => assert_eq!(count, MAX_SAMPLES),
        other => panic!("expected TooManySamples, got {other:?}"),
    }
}
