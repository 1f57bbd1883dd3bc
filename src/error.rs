//! Error types for drawing surfaces.

use std::fmt;

/// Errors raised when moving pixels out of a drawing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The destination buffer does not match the surface's byte length.
    SizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::SizeMismatch { expected, actual } => write!(
                f,
                "Surface holds {} bytes but the destination buffer holds {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for SurfaceError {}
