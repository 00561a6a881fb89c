use thiserror::Error;

/// Errors raised while turning a math string into an expression tree.
#[derive(Error, Debug)]
pub enum MathError {
    #[error("Failed to parse expression '{0}': {1}")]
    ParseError(String, meval::Error),
    #[error("Malformed expression '{0}': {1}")]
    MalformedExpression(String, String),
}
