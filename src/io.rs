use std::path::PathBuf;

use thiserror::Error;

use crate::prelude::SBMLDocument;

/// Loads and parses an SBML document from a JSON file.
///
/// # Arguments
///
/// * `path` - Path to the JSON file containing the SBML document
///
/// # Returns
///
/// Returns a `Result` containing either:
/// * `Ok(SBMLDocument)` - The successfully parsed document
/// * `Err(IOError)` - An error that occurred during file reading or JSON parsing
///
/// # Errors
///
/// This function will return an error if:
/// * The file cannot be found or opened (`IOError::FileNotFound`)
/// * The file contents cannot be parsed as valid JSON (`IOError::JsonParseError`)
/// * The JSON structure does not match the expected document format
pub fn load_sbmldoc(path: impl Into<PathBuf>) -> Result<SBMLDocument, IOError> {
    let path = path.into();
    let file = std::fs::File::open(path).map_err(IOError::FileNotFound)?;
    serde_json::from_reader(file).map_err(IOError::JsonParseError)
}

/// Saves an SBML document to a pretty-printed JSON file.
///
/// The error log of the document is not written.
///
/// # Arguments
///
/// * `path` - Path of the JSON file to create
/// * `doc` - The document to save
pub fn save_sbmldoc(path: impl Into<PathBuf>, doc: &SBMLDocument) -> Result<(), IOError> {
    let path = path.into();
    let file = std::fs::File::create(path).map_err(IOError::FileNotFound)?;
    serde_json::to_writer_pretty(file, doc).map_err(IOError::JsonParseError)
}

/// Represents errors that can occur during document I/O operations.
#[derive(Error, Debug)]
pub enum IOError {
    /// Indicates that the specified file could not be found or opened.
    #[error("File not found: {0}")]
    FileNotFound(#[from] std::io::Error),

    /// Indicates that the file contents could not be parsed as valid JSON.
    #[error("Failed to parse JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),
}
