//! Error types for the sr-launcher crate.
//!
//! This module provides the [`LaunchError`] type for failures that can occur
//! while building a command line, probing for an interpreter, or spawning a
//! process.
//!
//! # Error Recovery Strategy
//!
//! None of these errors reach the caller of
//! [`ScriptExecutor::execute`](crate::ScriptExecutor::execute). The executor
//! converts each one into a notification and reports `false`.

/// Errors that can occur while dispatching a script.
///
/// # Examples
///
/// ```
/// use sr_launcher::LaunchError;
/// use std::time::Duration;
///
/// let err = LaunchError::probe_timeout("python3", Duration::from_millis(250));
/// assert!(err.is_probe());
/// assert!(err.to_string().contains("python3"));
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LaunchError {
    /// The operating system refused to start a process.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        /// The program that could not be started.
        program: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The interpreter resolution probe did not finish in time.
    #[error("interpreter probe for '{interpreter}' timed out after {timeout_ms} ms")]
    ProbeTimeout {
        /// The interpreter name being resolved.
        interpreter: String,
        /// The timeout that elapsed.
        timeout_ms: u128,
    },

    /// The runtime driving the probe could not be created.
    #[error("failed to start probe runtime: {0}")]
    ProbeRuntime(#[source] std::io::Error),

    /// The configured argument string has an unterminated quote.
    #[error("unterminated quote in arguments '{arguments}'")]
    InvalidArguments {
        /// The offending argument string.
        arguments: String,
    },
}

impl LaunchError {
    /// Creates a new [`LaunchError::Spawn`] error.
    #[inline]
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    /// Creates a new [`LaunchError::ProbeTimeout`] error.
    #[inline]
    pub fn probe_timeout(interpreter: impl Into<String>, timeout: std::time::Duration) -> Self {
        Self::ProbeTimeout {
            interpreter: interpreter.into(),
            timeout_ms: timeout.as_millis(),
        }
    }

    /// Creates a new [`LaunchError::InvalidArguments`] error.
    #[inline]
    pub fn invalid_arguments(arguments: impl Into<String>) -> Self {
        Self::InvalidArguments {
            arguments: arguments.into(),
        }
    }

    /// Returns `true` if this error came from the interpreter probe.
    #[inline]
    #[must_use]
    pub const fn is_probe(&self) -> bool {
        matches!(self, Self::ProbeTimeout { .. } | Self::ProbeRuntime(_))
    }

    /// Title of the notification shown for this error.
    #[must_use]
    pub const fn notification_title(&self) -> &'static str {
        match self {
            Self::Spawn { .. } => "Failed to start script",
            Self::ProbeTimeout { .. } | Self::ProbeRuntime(_) => "Interpreter not found",
            Self::InvalidArguments { .. } => "Invalid arguments",
        }
    }
}
