//! Error handling for the arithmetic layer

use std::borrow::Cow;
use std::fmt;

use mpin_api::Error as CoreError;

/// The error type for big-number, field, curve and pairing operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Parameter validation error
    Parameter {
        /// Name of the invalid parameter
        name: Cow<'static, str>,
        /// Reason why the parameter is invalid
        reason: Cow<'static, str>,
    },

    /// Length validation error
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Bytes that do not describe a point on the curve
    Point {
        /// Decoder that rejected the input
        context: &'static str,
    },

    /// A point on the curve but outside the prime-order subgroup
    Order {
        /// Decoder that rejected the input
        context: &'static str,
    },

    /// Inversion of zero
    NotInvertible {
        /// Operation that needed the inverse
        operation: &'static str,
    },

    /// Processing error during an arithmetic operation
    Processing {
        /// Operation that failed
        operation: &'static str,
        /// Additional details about the failure
        details: &'static str,
    },

    /// Fallback for other errors
    Other(&'static str),
}

impl Error {
    /// Shorthand to create a Parameter error
    pub fn param<N: Into<Cow<'static, str>>, R: Into<Cow<'static, str>>>(
        name: N,
        reason: R,
    ) -> Self {
        Error::Parameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for arithmetic operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            Error::Length {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid length for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            Error::Point { context } => write!(f, "Invalid point in {}", context),
            Error::Order { context } => {
                write!(f, "Point outside the prime-order subgroup in {}", context)
            }
            Error::NotInvertible { operation } => {
                write!(f, "Zero has no inverse in {}", operation)
            }
            Error::Processing { operation, details } => {
                write!(f, "Processing error in {}: {}", operation, details)
            }
            Error::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Parameter { name, reason } => CoreError::InvalidParameter {
                context: "arithmetic",
                message: format!("{}: {}", name, reason),
            },
            Error::Length {
                context,
                expected,
                actual,
            } => CoreError::InvalidLength {
                context,
                expected,
                actual,
            },
            Error::Point { context } => CoreError::InvalidPoint { context },
            Error::Order { context } => CoreError::WrongOrder { context },
            Error::NotInvertible { operation } => CoreError::InvalidParameter {
                context: operation,
                message: "value has no inverse".to_string(),
            },
            Error::Processing { operation, details } => CoreError::Other {
                context: operation,
                message: details.to_string(),
            },
            Error::Other(msg) => CoreError::Other {
                context: "arithmetic",
                message: msg.to_string(),
            },
        }
    }
}

/// Convert an arithmetic result to a protocol result with additional context
#[inline]
pub fn to_core_result<T>(r: Result<T>, ctx: &'static str) -> mpin_api::Result<T> {
    r.map_err(|e| CoreError::from(e).with_context(ctx))
}

pub mod validate;
