//! # Core Error Types

use thiserror::Error;

/// An index fell outside a fixed-size sequence.
///
/// Raised by the pool and by chain indexing. This is a contract violation
/// on the caller's side, not a recoverable runtime condition.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("index {index} out of bounds for length {len}")]
pub struct BoundsError {
    /// The requested index.
    pub index: usize,
    /// The length of the indexed sequence.
    pub len: usize,
}

impl BoundsError {
    /// Checks `index` against `len`.
    ///
    /// # Errors
    ///
    /// Returns a [`BoundsError`] when `index >= len`.
    #[inline]
    pub const fn check(index: usize, len: usize) -> Result<usize, Self> {
        if index < len {
            Ok(index)
        } else {
            Err(Self { index, len })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_in_range() {
        assert_eq!(BoundsError::check(2, 3), Ok(2));
    }

    #[test]
    fn test_check_out_of_range() {
        let err = BoundsError::check(5, 5).unwrap_err();
        assert_eq!(err, BoundsError { index: 5, len: 5 });
        assert_eq!(err.to_string(), "index 5 out of bounds for length 5");
    }
}
