//! # Configuration Module
//!
//! This module handles all configurable settings for fifotail.
//!
//! ## Plain English Explanation
//!
//! Just like a car has settings (seat position, mirror angles, radio
//! presets), our app has settings too. This module defines what those
//! settings are and what their default values should be.
//!
//! Settings include:
//! - Where the named pipe lives
//! - How many lines to keep in the retention window

use std::path::PathBuf;

// ============================================
// MAIN CONFIGURATION
// ============================================

/// All configuration options for fifotail.
///
/// ## Plain English
///
/// This is the "settings menu" of our app. Each field is one setting
/// you can adjust to customize how the app behaves.
#[derive(Clone, Debug)]
pub struct Config {
    /// Filesystem path of the named pipe producers write to
    ///
    /// ## Plain English
    /// If the path doesn't exist we create a fifo there. If it exists
    /// and is anything other than a fifo, startup fails rather than
    /// clobbering someone's file.
    pub fifo_path: PathBuf,

    /// How many lines to keep in memory
    ///
    /// ## Limits
    /// - Minimum: 1 (a zero-slot ring has no meaning)
    /// - Maximum: 1,000,000 (the whole point is bounded memory)
    /// - Default: 40
    pub line_capacity: usize,
}

/// Upper bound on the retention window. Keeping more lines than this in
/// a "bounded memory" tool is a configuration mistake, not a use case.
const MAX_LINE_CAPACITY: usize = 1_000_000;

impl Config {
    /// Creates a configuration with all default values.
    pub fn new() -> Self {
        Self {
            // Same defaults as the classic tool: a fifo named "debug"
            // in the working directory, last 40 lines retained.
            fifo_path: PathBuf::from("debug"),
            line_capacity: 40,
        }
    }

    /// Validates the configuration and returns errors if invalid.
    ///
    /// ## Plain English
    /// Makes sure all settings are within reasonable bounds.
    /// Returns a list of problems, or empty if all is well.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.line_capacity == 0 {
            errors.push(ConfigError::ZeroCapacity);
        }
        if self.line_capacity > MAX_LINE_CAPACITY {
            errors.push(ConfigError::CapacityTooLarge(self.line_capacity));
        }

        if self.fifo_path.as_os_str().is_empty() {
            errors.push(ConfigError::EmptyFifoPath);
        }

        errors
    }

    /// Estimates memory usage of a full retention window.
    ///
    /// ## Returns
    /// Estimated usage in kilobytes, assuming typical ~120 byte log lines.
    pub fn estimated_memory_kb(&self) -> usize {
        const TYPICAL_LINE_BYTES: usize = 120;
        self.line_capacity * TYPICAL_LINE_BYTES / 1024
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================
// CONFIGURATION ERRORS
// ============================================

/// Errors that can occur with configuration values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Line capacity is zero
    ZeroCapacity,

    /// Line capacity is unreasonably large
    CapacityTooLarge(usize),

    /// The fifo path is empty
    EmptyFifoPath,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroCapacity => {
                write!(f, "line capacity must be at least 1")
            }
            Self::CapacityTooLarge(val) => {
                write!(
                    f,
                    "line capacity {} exceeds the maximum of {}",
                    val, MAX_LINE_CAPACITY
                )
            }
            Self::EmptyFifoPath => {
                write!(f, "fifo path must not be empty")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.fifo_path, PathBuf::from("debug"));
        assert_eq!(config.line_capacity, 40);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = Config {
            line_capacity: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), vec![ConfigError::ZeroCapacity]);
    }

    #[test]
    fn test_huge_capacity_rejected() {
        let config = Config {
            line_capacity: MAX_LINE_CAPACITY + 1,
            ..Config::default()
        };
        assert!(matches!(
            config.validate().as_slice(),
            [ConfigError::CapacityTooLarge(_)]
        ));
    }

    #[test]
    fn test_empty_path_rejected() {
        let config = Config {
            fifo_path: PathBuf::new(),
            ..Config::default()
        };
        assert_eq!(config.validate(), vec![ConfigError::EmptyFifoPath]);
    }

    #[test]
    fn test_memory_estimation() {
        let config = Config::default();

        // 40 lines at ~120 bytes is a few KB at most.
        assert!(config.estimated_memory_kb() < 10);
    }
}
