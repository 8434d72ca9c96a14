//! Format and size checks for a candidate project file.
//!
//! Pure and synchronous: nothing here reads file content.

use liight_core::constants::{BYTES_PER_MIB, MAX_FILE_SIZE_BYTES, PDF_MIME_TYPE};

use crate::file::SubmissionFile;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("No file selected.")]
    NoFile,

    #[error("Only PDF files are allowed.")]
    InvalidContentType { content_type: String },

    #[error("File size exceeds the 30MB limit ({})", format_mib(*size))]
    FileTooLarge { size: u64 },
}

/// Outcome of [`validate`]. An invalid result always carries a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    is_valid: bool,
    error_message: String,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error_message: String::new(),
        }
    }

    pub fn invalid(error: &ValidationError) -> Self {
        Self {
            is_valid: false,
            error_message: error.to_string(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }
}

impl From<Result<(), ValidationError>> for ValidationResult {
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => ValidationResult::valid(),
            Err(e) => ValidationResult::invalid(&e),
        }
    }
}

/// Size in MiB with two decimals and the unit suffix, e.g. `31.00MB`.
fn format_mib(size: u64) -> String {
    format!("{:.2}MB", size as f64 / BYTES_PER_MIB)
}

/// Declared type must be exactly `application/pdf`.
pub fn check_content_type(content_type: &str) -> Result<(), ValidationError> {
    if content_type != PDF_MIME_TYPE {
        return Err(ValidationError::InvalidContentType {
            content_type: content_type.to_string(),
        });
    }
    Ok(())
}

pub fn check_size(size: u64) -> Result<(), ValidationError> {
    if size > MAX_FILE_SIZE_BYTES {
        return Err(ValidationError::FileTooLarge { size });
    }
    Ok(())
}

/// Email shape check shared with the server.
pub fn validate_email(email: &str) -> bool {
    liight_core::validation::is_valid_email(email)
}

/// Validate a selected file: presence, then type, then size.
pub fn validate(file: Option<&SubmissionFile>) -> ValidationResult {
    let checked = match file {
        None => Err(ValidationError::NoFile),
        Some(file) => {
            check_content_type(file.mime_type()).and_then(|_| check_size(file.size_bytes()))
        }
    };
    checked.into()
}
