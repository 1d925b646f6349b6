//! Error types for the sr-core crate.
//!
//! This module provides the [`ConfigError`] type for failures that can occur
//! while reading, parsing, or creating the script configuration file.

use camino::Utf8PathBuf;

/// Errors that can occur during configuration loading and creation.
///
/// The registry itself never sees these: the lenient
/// [`ConfigSource`](crate::ConfigSource) implementation on
/// [`ConfigFile`](crate::ConfigFile) logs them and yields an empty list.
///
/// # Examples
///
/// ```
/// use sr_core::ConfigError;
/// use camino::Utf8PathBuf;
///
/// let error = ConfigError::AlreadyExists(Utf8PathBuf::from("/tmp/config.json"));
/// assert!(error.to_string().contains("/tmp/config.json"));
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The provided path is invalid or malformed.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        /// The invalid path.
        path: Utf8PathBuf,
        /// Explanation of why the path is invalid.
        reason: String,
    },

    /// Refused to overwrite an existing configuration file.
    #[error("configuration already exists: {0}")]
    AlreadyExists(Utf8PathBuf),

    /// An I/O error occurred while reading or writing configuration.
    #[error("failed to access configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidPath`] error.
    #[inline]
    pub fn invalid_path(path: impl Into<Utf8PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the configuration exists but its content is unusable.
    #[inline]
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}
