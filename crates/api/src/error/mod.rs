//! Error handling for the M-PIN protocol surface
//!
//! Every failure the protocol can report is a variant of [`Error`]. Rejections
//! (`BadPin`, `Expired`, `BadToken`) are expected outcomes, not faults, and
//! callers are meant to branch on them. The integer codes of deployed M-PIN
//! services are only produced at the wire boundary through [`Error::code`].

pub mod validate;

use mpin_params::mpin::{BAD_PARAMS, BAD_PIN, INVALID_POINT, WRONG_ORDER};

// Re-export validation utilities module (not as a nested function)
pub use validate as validation;

/// Primary error type for protocol operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A byte string did not decode to a point on the curve
    #[error("invalid point: {context}")]
    InvalidPoint { context: &'static str },

    /// A point decoded but lies outside the prime-order subgroup
    #[error("point of wrong order: {context}")]
    WrongOrder { context: &'static str },

    /// Invalid length error with context
    #[error("{context}: invalid length (expected {expected}, got {actual})")]
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Invalid parameter error
    #[error("{context}: {message}")]
    InvalidParameter {
        context: &'static str,
        message: String,
    },

    /// The server's pairing check failed
    #[error("authentication failed: bad PIN")]
    BadPin,

    /// The single-pass attempt was made outside its time window
    #[error("authentication failed: attempt expired")]
    Expired,

    /// The client response did not come from a valid token
    #[error("authentication failed: bad token")]
    BadToken,

    /// AEAD tag verification failed
    #[error("authentication failed: {context}")]
    AuthenticationFailed { context: &'static str },

    /// Other error
    #[error("{context}: {message}")]
    Other {
        context: &'static str,
        message: String,
    },
}

/// Result type for protocol operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Shorthand to create an `InvalidParameter` error
    pub fn param(context: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            context,
            message: message.into(),
        }
    }

    /// Replace the context of an existing error
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::InvalidPoint { .. } => Self::InvalidPoint { context },
            Self::WrongOrder { .. } => Self::WrongOrder { context },
            Self::InvalidLength { expected, actual, .. } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            Self::InvalidParameter { message, .. } => Self::InvalidParameter { context, message },
            Self::AuthenticationFailed { .. } => Self::AuthenticationFailed { context },
            Self::Other { message, .. } => Self::Other { context, message },
            rejection => rejection,
        }
    }

    /// Integer code used by deployed M-PIN services for this outcome.
    ///
    /// All three rejection kinds share one code so that a failed attempt
    /// reveals nothing about why it failed.
    pub fn code(&self) -> i32 {
        match self {
            Self::BadPin | Self::Expired | Self::BadToken => BAD_PIN,
            Self::InvalidPoint { .. } => INVALID_POINT,
            Self::WrongOrder { .. } => WRONG_ORDER,
            Self::InvalidLength { .. }
            | Self::InvalidParameter { .. }
            | Self::AuthenticationFailed { .. }
            | Self::Other { .. } => BAD_PARAMS,
        }
    }

    /// True for the expected authentication outcomes rather than faults
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::BadPin | Self::Expired | Self::BadToken)
    }
}

impl From<core::array::TryFromSliceError> for Error {
    fn from(_: core::array::TryFromSliceError) -> Self {
        Self::InvalidLength {
            context: "array conversion",
            expected: 0,
            actual: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_share_wire_code() {
        assert_eq!(Error::BadPin.code(), -19);
        assert_eq!(Error::Expired.code(), -19);
        assert_eq!(Error::BadToken.code(), -19);
        assert!(Error::Expired.is_rejection());
    }

    #[test]
    fn test_malformed_input_codes() {
        assert_eq!(Error::InvalidPoint { context: "x" }.code(), -14);
        assert_eq!(Error::WrongOrder { context: "x" }.code(), -18);
        assert_eq!(Error::param("y", "bad").code(), -11);
        assert!(!Error::param("y", "bad").is_rejection());
    }

    #[test]
    fn test_with_context_keeps_payload() {
        let err = Error::InvalidLength {
            context: "a",
            expected: 65,
            actual: 3,
        }
        .with_context("b");
        assert_eq!(
            err,
            Error::InvalidLength {
                context: "b",
                expected: 65,
                actual: 3
            }
        );
        assert_eq!(Error::BadPin.with_context("ignored"), Error::BadPin);
    }

    #[test]
    fn test_display() {
        let err = Error::InvalidLength {
            context: "token",
            expected: 65,
            actual: 64,
        };
        assert_eq!(err.to_string(), "token: invalid length (expected 65, got 64)");
    }
}
