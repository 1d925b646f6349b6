//! Script kinds.
//!
//! This module provides the [`ScriptKind`] enum describing how a catalog entry
//! is launched. Classification itself lives in the launcher crate.

use serde::{Deserialize, Serialize};

/// How a script is launched.
///
/// # Examples
///
/// ```
/// use sr_core::ScriptKind;
///
/// assert_eq!(ScriptKind::default(), ScriptKind::Unknown);
/// assert_eq!(ScriptKind::Interpreter.label(), "Interpreter");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptKind {
    /// No launch strategy could be inferred.
    #[default]
    Unknown,

    /// A `.bat` file run through the batch host (`cmd.exe /c`).
    Batch,

    /// A `.sh` file run through a POSIX-compatible shell.
    Shell,

    /// Run through an explicitly configured interpreter executable.
    Interpreter,
}

impl ScriptKind {
    /// Returns a human-readable label for this kind.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Batch => "Batch",
            Self::Shell => "Shell",
            Self::Interpreter => "Interpreter",
        }
    }
}

impl std::fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
