//! Validation utilities for protocol inputs

use super::{Error, Result};

/// Validate a parameter condition
#[inline(always)]
pub fn parameter(condition: bool, context: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::param(context, reason));
    }
    Ok(())
}

/// Validate a length
#[inline(always)]
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::InvalidLength {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Validate a maximum length
#[inline(always)]
pub fn max_length(context: &'static str, actual: usize, max: usize) -> Result<()> {
    if actual > max {
        return Err(Error::InvalidLength {
            context,
            expected: max,
            actual,
        });
    }
    Ok(())
}

/// Validate that a point decoded
#[inline(always)]
pub fn point(is_valid: bool, context: &'static str) -> Result<()> {
    if !is_valid {
        return Err(Error::InvalidPoint { context });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length() {
        assert!(length("x", 32, 32).is_ok());
        assert_eq!(
            length("x", 31, 32),
            Err(Error::InvalidLength {
                context: "x",
                expected: 32,
                actual: 31
            })
        );
    }

    #[test]
    fn test_max_length() {
        assert!(max_length("m", 10, 10).is_ok());
        assert!(max_length("m", 11, 10).is_err());
    }

    #[test]
    fn test_point_and_parameter() {
        assert!(point(true, "p").is_ok());
        assert_eq!(point(false, "p"), Err(Error::InvalidPoint { context: "p" }));
        assert!(parameter(false, "date", "must be non-zero").is_err());
    }
}
