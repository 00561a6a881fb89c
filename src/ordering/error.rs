use thiserror::Error;

use crate::math::error::MathError;

#[derive(Error, Debug)]
pub enum OrderingError {
    #[error("Failed to read rule math: {0}")]
    MathError(#[from] MathError),
    #[error("Invalid permutation of {len} rules: {message}")]
    InvalidPermutation { len: usize, message: String },
}
