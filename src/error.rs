//! # Error Types Module
//!
//! This module defines all the error types used throughout fifotail.
//!
//! ## Plain English Explanation
//!
//! When things go wrong (and they will), we need a way to describe WHAT
//! went wrong. These error types are like labels on problem reports:
//!
//! - "Setup: the fifo couldn't be created"
//! - "Multiplex: the wait-for-input call itself failed"
//! - "Io: a read blew up mid-flight"
//!
//! The split matters because each label gets different treatment: setup
//! and config problems abort startup, a multiplex failure terminates the
//! loop, and a per-read I/O failure is logged and shrugged off.

use std::fmt;
use std::io;

use crate::config::ConfigError;

// ============================================
// MAIN APPLICATION ERROR
// ============================================

/// The main error type for fifotail.
///
/// ## Plain English
///
/// This is the "parent" error that can contain any type of error
/// from any part of the application.
#[derive(Debug)]
pub enum TailError {
    /// The named-pipe resource couldn't be set up
    ///
    /// ## Examples
    /// - The path exists but holds a regular file, not a fifo
    /// - mkfifo or open failed
    ///
    /// Always fatal: the loop never starts without its data source.
    Setup(SetupErrorKind),

    /// A configuration value is invalid
    ///
    /// ## Examples
    /// - Zero line capacity
    /// - Empty fifo path
    Config(ConfigError),

    /// The readiness-wait primitive itself failed
    ///
    /// This is the one runtime error that terminates the loop with
    /// failure status. An interrupted wait is retried and never
    /// surfaces here.
    Multiplex(io::Error),

    /// Generic I/O error
    ///
    /// When it comes from a data-stream line read it is reported and
    /// swallowed; the loop keeps running.
    Io(io::Error),
}

// Allow converting from std::io::Error to our error type
impl From<io::Error> for TailError {
    fn from(err: io::Error) -> Self {
        TailError::Io(err)
    }
}

impl From<ConfigError> for TailError {
    fn from(err: ConfigError) -> Self {
        TailError::Config(err)
    }
}

impl fmt::Display for TailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup(e) => write!(f, "Setup error: {}", e),
            Self::Config(e) => write!(f, "Configuration error: {}", e),
            Self::Multiplex(e) => write!(f, "Multiplex error: {}", e),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for TailError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Multiplex(e) | Self::Io(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Setup(_) => None,
        }
    }
}

// ============================================
// SETUP ERRORS
// ============================================

/// Errors that can occur while setting up the named pipe.
///
/// ## Plain English
///
/// These are problems with getting the fifo in place before any data
/// flows. All of them prevent the program from starting.
#[derive(Debug)]
pub enum SetupErrorKind {
    /// The path exists but is not a fifo
    ///
    /// ## What This Means
    /// Something else (a regular file, a directory) already occupies the
    /// path. We refuse to touch it.
    NotAFifo(String),

    /// Creating the fifo failed
    CreateFailed { path: String, reason: String },

    /// Inspecting the path failed
    StatFailed { path: String, reason: String },

    /// Opening the fifo for reading failed
    OpenFailed { path: String, reason: String },
}

impl fmt::Display for SetupErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAFifo(path) => {
                write!(f, "file {} exists but is not a fifo", path)
            }
            Self::CreateFailed { path, reason } => {
                write!(f, "failed to create fifo {}: {}", path, reason)
            }
            Self::StatFailed { path, reason } => {
                write!(f, "failed to inspect {}: {}", path, reason)
            }
            Self::OpenFailed { path, reason } => {
                write!(f, "failed to open fifo {}: {}", path, reason)
            }
        }
    }
}

// ============================================
// RESULT TYPE ALIAS
// ============================================

/// A Result type that uses TailError.
pub type TailResult<T> = Result<T, TailError>;

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TailError::Setup(SetupErrorKind::NotAFifo("debug".to_string()));
        let message = format!("{}", err);
        assert!(message.contains("Setup"));
        assert!(message.contains("not a fifo"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let app_err: TailError = io_err.into();

        match &app_err {
            TailError::Io(_) => {} // Expected
            _ => panic!("Expected Io error variant"),
        }

        // The wrapped form is what the ingestion loop reports for a
        // failed data-stream read.
        let message = format!("{}", app_err);
        assert!(message.contains("I/O error"));
        assert!(message.contains("file not found"));
    }

    #[test]
    fn test_multiplex_error_has_source() {
        let err = TailError::Multiplex(io::Error::new(
            io::ErrorKind::Other,
            "poll failed",
        ));
        assert!(std::error::Error::source(&err).is_some());
    }
}
