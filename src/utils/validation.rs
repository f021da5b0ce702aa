//! Centralized validation and helper functions.

/// Maximum number of sample rows accepted from a single upload (DOS protection)
pub const MAX_SAMPLES: usize = 100_000;

/// Security-related constants for input validation
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Check if adding another sample would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new record.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_sample_limit(count: usize) -> Option<String> {
    if count >= MAX_SAMPLES {
        Some(format!(
            "Too many samples: adding another would exceed maximum of {MAX_SAMPLES}"
        ))
    } else {
        None
    }
}

/// Security validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Filename too long: exceeds {MAX_FILENAME_LENGTH} characters")]
    FilenameTooLong,
    #[error("Invalid filename: contains path traversal or invalid characters")]
    InvalidFilename,
    #[error("Empty filename provided")]
    EmptyFilename,
    #[error("Not a CSV file")]
    NotCsv,
}

/// Secure upload filename validation.
///
/// Rejects empty and over-long names, directory traversal, control
/// characters, and anything that does not end in `.csv`.
///
/// # Errors
///
/// Returns `ValidationError::EmptyFilename` if the filename is empty,
/// `ValidationError::FilenameTooLong` if it exceeds the limit,
/// `ValidationError::InvalidFilename` for dangerous characters, or
/// `ValidationError::NotCsv` for a non-CSV extension.
pub fn validate_upload_filename(filename: &str) -> Result<String, ValidationError> {
    if filename.trim().is_empty() {
        return Err(ValidationError::EmptyFilename);
    }

    if filename.len() > MAX_FILENAME_LENGTH {
        return Err(ValidationError::FilenameTooLong);
    }

    // Prevent directory traversal attacks
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(ValidationError::InvalidFilename);
    }

    // Null bytes and other control characters
    if filename.contains('\0') || filename.chars().any(|c| ('\x01'..='\x1F').contains(&c)) {
        return Err(ValidationError::InvalidFilename);
    }

    let sanitized = filename
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.' || *c == '-' || *c == '_' || *c == ' ')
        .collect::<String>();

    if sanitized.trim().is_empty() {
        return Err(ValidationError::InvalidFilename);
    }

    if !sanitized.to_lowercase().ends_with(".csv") {
        return Err(ValidationError::NotCsv);
    }

    Ok(sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_filenames() {
        assert_eq!(
            validate_upload_filename("samples.csv").unwrap(),
            "samples.csv"
        );
        assert_eq!(
            validate_upload_filename("dig_2024-site_A.CSV").unwrap(),
            "dig_2024-site_A.CSV"
        );
    }

    #[test]
    fn test_rejects_traversal_and_control_chars() {
        assert!(matches!(
            validate_upload_filename("../etc/passwd.csv"),
            Err(ValidationError::InvalidFilename)
        ));
        assert!(matches!(
            validate_upload_filename("a\\b.csv"),
            Err(ValidationError::InvalidFilename)
        ));
        assert!(matches!(
            validate_upload_filename("bad\x07name.csv"),
            Err(ValidationError::InvalidFilename)
        ));
    }

    #[test]
    fn test_rejects_non_csv() {
        assert!(matches!(
            validate_upload_filename("samples.xlsx"),
            Err(ValidationError::NotCsv)
        ));
    }

    #[test]
    fn test_rejects_empty_and_long() {
        assert!(matches!(
            validate_upload_filename("   "),
            Err(ValidationError::EmptyFilename)
        ));
        let long = format!("{}.csv", "a".repeat(300));
        assert!(matches!(
            validate_upload_filename(&long),
            Err(ValidationError::FilenameTooLong)
        ));
    }

    #[test]
    fn test_sample_limit() {
        assert!(check_sample_limit(0).is_none());
        assert!(check_sample_limit(MAX_SAMPLES - 1).is_none());
        assert!(check_sample_limit(MAX_SAMPLES).is_some());
    }
}
