//! Error types for the judgegen CLI.

use judgegen_core::types::SamplingError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// The engine rejected a request or could not satisfy it
    #[error("Sampling error: {0}")]
    Sampling(#[from] SamplingError),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Writing the generated data failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A command line argument is malformed
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// Structural failures (the request is valid but has no answer) are kept
    /// apart from malformed requests so scripts can tell them apart.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Sampling(e) if e.is_structural() => 3,
            CliError::Sampling(_) | CliError::InvalidArgument(_) => 2,
            CliError::Config(_) => 4,
            CliError::Io(_) => 5,
        }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampling_error_conversion() {
        let err: CliError = SamplingError::invalid_argument("integer", "lower must be less than upper").into();
        assert_eq!(
            err.to_string(),
            "Sampling error: integer(): invalid argument: lower must be less than upper"
        );
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_structural_exit_code() {
        let err: CliError = SamplingError::impossible("prime", "range contains no primes").into();
        assert_eq!(err.exit_code(), 3);
        let err: CliError = SamplingError::RetryBudgetExhausted {
            operation: "convex_polygon",
            attempts: 10,
        }
        .into();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_config_and_io_exit_codes() {
        let err: CliError = ConfigError::InvalidSeed("abc".to_string()).into();
        assert_eq!(err.exit_code(), 4);
        let err: CliError = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed").into();
        assert_eq!(err.exit_code(), 5);
    }
}
