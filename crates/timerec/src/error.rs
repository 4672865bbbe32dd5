//! Error types for timerec.
//!
//! This module defines all error types used throughout the timerec crate.
//! Store and time errors are recoverable and reported to the operator; the
//! remaining variants come from configuration and I/O.

use thiserror::Error;

/// The main error type for timerec operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Record Store Errors ===
    /// The store already holds `capacity` records.
    #[error("all {capacity} timers in use")]
    CapacityExceeded {
        /// Fixed capacity of the store.
        capacity: usize,
    },

    /// An index pointed outside the populated range of the store.
    #[error("no timer at index {index} ({count} in use)")]
    InvalidIndex {
        /// The rejected index.
        index: usize,
        /// Number of populated slots at the time of the call.
        count: usize,
    },

    /// Backing storage for the store could not be reserved.
    #[error("failed to allocate storage for {capacity} timers")]
    AllocationFailure {
        /// Requested capacity.
        capacity: usize,
    },

    /// An hour or minute value was out of range.
    #[error("invalid time of day {hour:02}:{minute:02}")]
    InvalidTime {
        /// Hour as entered.
        hour: u32,
        /// Minute as entered.
        minute: u32,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Console read or write failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for timerec operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable by the operator (no state was
    /// changed and the session can continue).
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::CapacityExceeded { .. } | Self::InvalidIndex { .. } | Self::InvalidTime { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_exceeded_display() {
        let err = Error::CapacityExceeded { capacity: 3 };
        assert_eq!(err.to_string(), "all 3 timers in use");
    }

    #[test]
    fn test_invalid_index_display() {
        let err = Error::InvalidIndex { index: 5, count: 2 };
        let msg = err.to_string();
        assert!(msg.contains('5'));
        assert!(msg.contains("2 in use"));
    }

    #[test]
    fn test_invalid_time_display_is_zero_padded() {
        let err = Error::InvalidTime { hour: 7, minute: 75 };
        assert_eq!(err.to_string(), "invalid time of day 07:75");
    }

    #[test]
    fn test_allocation_failure_display() {
        let err = Error::AllocationFailure { capacity: 42 };
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::config_validation("capacity must be greater than 0");
        assert_eq!(
            err.to_string(),
            "invalid configuration: capacity must be greater than 0"
        );
    }

    #[test]
    fn test_is_recoverable() {
        assert!(Error::CapacityExceeded { capacity: 1 }.is_recoverable());
        assert!(Error::InvalidIndex { index: 0, count: 0 }.is_recoverable());
        assert!(Error::InvalidTime { hour: 24, minute: 0 }.is_recoverable());
        assert!(!Error::AllocationFailure { capacity: 1 }.is_recoverable());
        assert!(!Error::config_validation("bad").is_recoverable());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("pipe closed"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }
}
