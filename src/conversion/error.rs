use thiserror::Error;

use crate::validation::consistency::ValidationResult;

/// Outcome of a failed conversion. A failed conversion leaves the document
/// exactly as it was.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    #[error("Source document is not consistent: {0:?}")]
    SourceValidationFailed(Vec<ValidationResult>),
    #[error("Conversion failed: {0}")]
    OperationFailed(String),
    #[error("No converter matches the given properties")]
    NoConverter,
}
