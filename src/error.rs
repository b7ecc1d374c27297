//! Error handling for the Tetris testbed
//!
//! One error type for the whole crate so scene code can propagate engine,
//! config and output failures with `?` instead of panicking.

use std::error::Error as StdError;
use std::fmt;

/// Main error type for the testbed
#[derive(Debug)]
pub enum TestbedError {
    // Physics Errors
    BodyNotFound {
        id: String,
    },
    InvalidShape {
        reason: String,
    },

    // Configuration Errors
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    // System Errors
    IoError {
        path: String,
        error: String,
    },
    ParseError {
        context: String,
        error: String,
    },
    SerializationError {
        context: String,
        error: String,
    },
}

impl fmt::Display for TestbedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestbedError::BodyNotFound { id } => write!(f, "Body not found: {}", id),
            TestbedError::InvalidShape { reason } => write!(f, "Invalid shape: {}", reason),

            TestbedError::InvalidConfig {
                field,
                value,
                reason,
            } => write!(
                f,
                "Invalid config value '{}' for '{}': {}",
                value, field, reason
            ),

            TestbedError::IoError { path, error } => {
                if path.is_empty() {
                    write!(f, "IO error: {}", error)
                } else {
                    write!(f, "IO error at {}: {}", path, error)
                }
            }
            TestbedError::ParseError { context, error } => {
                write!(f, "Parse error in {}: {}", context, error)
            }
            TestbedError::SerializationError { context, error } => {
                write!(f, "Serialization error in {}: {}", context, error)
            }
        }
    }
}

impl StdError for TestbedError {}

/// Type alias for Results in the testbed
pub type TestbedResult<T> = Result<T, TestbedError>;

// Conversion traits for common error types

impl From<std::io::Error> for TestbedError {
    fn from(error: std::io::Error) -> Self {
        TestbedError::IoError {
            path: String::new(),
            error: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for TestbedError {
    fn from(error: toml::de::Error) -> Self {
        TestbedError::ParseError {
            context: "toml".to_string(),
            error: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for TestbedError {
    fn from(error: serde_json::Error) -> Self {
        TestbedError::SerializationError {
            context: "json".to_string(),
            error: error.to_string(),
        }
    }
}

// Helper functions for common error patterns

/// Convert Option to Result with context
pub trait OptionExt<T> {
    fn ok_or_testbed<F>(self, f: F) -> TestbedResult<T>
    where
        F: FnOnce() -> TestbedError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_testbed<F>(self, f: F) -> TestbedResult<T>
    where
        F: FnOnce() -> TestbedError,
    {
        self.ok_or_else(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TestbedError::BodyNotFound {
            id: "piece".to_string(),
        };
        assert_eq!(err.to_string(), "Body not found: piece");

        let err = TestbedError::InvalidConfig {
            field: "testbed.hz".to_string(),
            value: "0".to_string(),
            reason: "must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid config value '0' for 'testbed.hz': must be positive"
        );
    }

    #[test]
    fn test_option_ext() {
        let opt: Option<i32> = None;
        let result = opt.ok_or_testbed(|| TestbedError::BodyNotFound {
            id: "piece".to_string(),
        });
        assert!(matches!(result, Err(TestbedError::BodyNotFound { .. })));
    }
}
