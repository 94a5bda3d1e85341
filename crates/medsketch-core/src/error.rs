//! Error types for the core crate.

use thiserror::Error;

/// Errors raised while validating input at the UI boundary.
///
/// Stroke operations themselves never fail: protocol misuse such as a stray
/// extend or a double begin is a no-op rather than an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SketchError {
    #[error("Stroke width must be a positive finite number, got {0}")]
    InvalidWidth(f64),
}

/// Result type for core operations.
pub type SketchResult<T> = Result<T, SketchError>;
