//! Error types for structured error handling.
//!
//! This module provides:
//! - `SamplingError`: Errors raised by every generator, distribution and
//!   number-theory entry point of the engine
//!
//! Every failure is deterministic given the same inputs and seed, so there is
//! no distinction between "user error" and "system error" at this layer.

use thiserror::Error;

/// Categorised sampling errors.
///
/// Each variant names the operation that failed so the diagnostic points at
/// the offending call rather than at some internal helper.
///
/// # Variants
/// - `InvalidArgument`: A precondition on the arguments does not hold
/// - `Domain`: A real-valued parameter is outside its mathematical domain
/// - `StructuralImpossibility`: No output satisfying the constraints exists
/// - `RetryBudgetExhausted`: A rejection loop ran out of attempts
/// - `RangeTooLarge`: A request would need more memory than the configured cap
///
/// # Examples
/// ```
/// use judgegen_core::types::SamplingError;
///
/// let err = SamplingError::invalid_argument("integer", "lower must be less than upper");
/// assert_eq!(
///     format!("{}", err),
///     "integer(): invalid argument: lower must be less than upper"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SamplingError {
    /// A precondition on the arguments does not hold.
    #[error("{operation}(): invalid argument: {message}")]
    InvalidArgument {
        /// Name of the failing operation
        operation: &'static str,
        /// Description naming the offending parameter
        message: String,
    },

    /// A real-valued parameter is NaN, infinite or outside its domain.
    #[error("{operation}(): domain error: {message}")]
    Domain {
        /// Name of the failing operation
        operation: &'static str,
        /// Description naming the offending parameter
        message: String,
    },

    /// The request is well-formed but no valid output exists.
    #[error("{operation}(): structurally impossible: {message}")]
    StructuralImpossibility {
        /// Name of the failing operation
        operation: &'static str,
        /// Description of the missing structure
        message: String,
    },

    /// A rejection loop did not produce an accepted value in time.
    #[error("{operation}(): no value accepted after {attempts} attempts")]
    RetryBudgetExhausted {
        /// Name of the failing operation
        operation: &'static str,
        /// Number of attempts made
        attempts: usize,
    },

    /// The requested window exceeds the configured limit.
    #[error("{operation}(): range width {width} exceeds limit {limit}")]
    RangeTooLarge {
        /// Name of the failing operation
        operation: &'static str,
        /// Requested width
        width: i64,
        /// Configured limit
        limit: i64,
    },
}

impl SamplingError {
    /// Builds an [`SamplingError::InvalidArgument`].
    pub fn invalid_argument(operation: &'static str, message: impl Into<String>) -> Self {
        SamplingError::InvalidArgument {
            operation,
            message: message.into(),
        }
    }

    /// Builds a [`SamplingError::Domain`].
    pub fn domain(operation: &'static str, message: impl Into<String>) -> Self {
        SamplingError::Domain {
            operation,
            message: message.into(),
        }
    }

    /// Builds a [`SamplingError::StructuralImpossibility`].
    pub fn impossible(operation: &'static str, message: impl Into<String>) -> Self {
        SamplingError::StructuralImpossibility {
            operation,
            message: message.into(),
        }
    }

    /// Name of the operation that produced this error.
    pub fn operation(&self) -> &'static str {
        match self {
            SamplingError::InvalidArgument { operation, .. }
            | SamplingError::Domain { operation, .. }
            | SamplingError::StructuralImpossibility { operation, .. }
            | SamplingError::RetryBudgetExhausted { operation, .. }
            | SamplingError::RangeTooLarge { operation, .. } => operation,
        }
    }

    /// Whether the error means "no valid output exists" as opposed to a
    /// malformed request.
    ///
    /// An exhausted retry budget counts as structural: the caller asked for
    /// something the engine could not find.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            SamplingError::StructuralImpossibility { .. } | SamplingError::RetryBudgetExhausted { .. }
        )
    }
}

/// Fails with [`SamplingError::InvalidArgument`] unless `condition` holds.
///
/// # Examples
/// ```
/// use judgegen_core::types::error::ensure;
///
/// assert!(ensure(1 < 2, "integer", "lower must be less than upper").is_ok());
/// assert!(ensure(2 < 1, "integer", "lower must be less than upper").is_err());
/// ```
#[inline]
pub fn ensure(condition: bool, operation: &'static str, message: &str) -> Result<(), SamplingError> {
    if condition {
        Ok(())
    } else {
        Err(SamplingError::invalid_argument(operation, message))
    }
}

/// Fails with [`SamplingError::Domain`] unless `condition` holds.
#[inline]
pub fn ensure_domain(
    condition: bool,
    operation: &'static str,
    message: &str,
) -> Result<(), SamplingError> {
    if condition {
        Ok(())
    } else {
        Err(SamplingError::domain(operation, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = SamplingError::invalid_argument("partition", "k too large");
        assert_eq!(format!("{}", err), "partition(): invalid argument: k too large");
    }

    #[test]
    fn test_domain_display() {
        let err = SamplingError::domain("normal", "stddev must be non negative");
        assert_eq!(
            format!("{}", err),
            "normal(): domain error: stddev must be non negative"
        );
    }

    #[test]
    fn test_retry_budget_display() {
        let err = SamplingError::RetryBudgetExhausted {
            operation: "prime",
            attempts: 64,
        };
        assert!(format!("{}", err).contains("64 attempts"));
        assert!(err.is_structural());
    }

    #[test]
    fn test_range_too_large_display() {
        let err = SamplingError::RangeTooLarge {
            operation: "primes",
            width: 10,
            limit: 5,
        };
        assert_eq!(format!("{}", err), "primes(): range width 10 exceeds limit 5");
        assert!(!err.is_structural());
    }

    #[test]
    fn test_operation_accessor() {
        assert_eq!(SamplingError::impossible("prime", "no primes").operation(), "prime");
        assert_eq!(SamplingError::domain("binomial", "p").operation(), "binomial");
    }

    #[test]
    fn test_ensure() {
        assert_eq!(ensure(true, "x", "never"), Ok(()));
        assert_eq!(
            ensure(false, "x", "bad"),
            Err(SamplingError::invalid_argument("x", "bad"))
        );
        assert_eq!(
            ensure_domain(false, "x", "nan"),
            Err(SamplingError::domain("x", "nan"))
        );
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&SamplingError::impossible("x", "y"));
    }
}
