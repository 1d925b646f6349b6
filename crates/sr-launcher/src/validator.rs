//! Pre-launch validation.
//!
//! Every check reports its own failure through the [`Notifier`] and returns
//! `false`; callers only see the boolean.

use camino::Utf8Path;
use tracing::debug;

use crate::{InterpreterProbe, Notifier};

/// Notification title for a missing script file.
pub const SCRIPT_NOT_FOUND: &str = "Script not found";
/// Notification title for a missing working directory.
pub const WORKING_DIRECTORY_NOT_FOUND: &str = "Working directory not found";
/// Notification title for an unresolvable interpreter.
pub const INTERPRETER_NOT_FOUND: &str = "Interpreter not found";

/// Checks that an entry can be launched.
pub struct ScriptValidator<'a> {
    notifier: &'a dyn Notifier,
    probe: &'a dyn InterpreterProbe,
}

impl<'a> ScriptValidator<'a> {
    /// Creates a validator reporting to `notifier` and resolving bare
    /// interpreter names with `probe`.
    #[must_use]
    pub fn new(notifier: &'a dyn Notifier, probe: &'a dyn InterpreterProbe) -> Self {
        Self { notifier, probe }
    }

    /// Succeeds if `path` names an existing file.
    pub fn verify_script(&self, path: &str) -> bool {
        if path.trim().is_empty() || !Utf8Path::new(path).is_file() {
            self.notifier.show_message(
                SCRIPT_NOT_FOUND,
                &format!("Configured script '{path}' does not exist."),
            );
            return false;
        }
        true
    }

    /// Succeeds if `path` names an existing directory.
    pub fn verify_working_directory(&self, path: &str) -> bool {
        if path.trim().is_empty() || !Utf8Path::new(path).is_dir() {
            self.notifier.show_message(
                WORKING_DIRECTORY_NOT_FOUND,
                &format!("Configured working directory '{path}' does not exist."),
            );
            return false;
        }
        true
    }

    /// Succeeds if `interpreter` is an existing absolute path or a bare name
    /// the probe can resolve.
    pub fn verify_interpreter(&self, interpreter: &str) -> bool {
        if interpreter.trim().is_empty() {
            self.notifier
                .show_message(INTERPRETER_NOT_FOUND, "Configured interpreter is invalid.");
            return false;
        }

        let path = Utf8Path::new(interpreter);
        let found = if path.is_absolute() {
            path.is_file()
        } else {
            debug!(interpreter, "Resolving interpreter on search path");
            self.probe.is_resolvable(interpreter)
        };

        if !found {
            self.notifier.show_message(
                INTERPRETER_NOT_FOUND,
                &format!("Configured interpreter '{interpreter}' does not exist."),
            );
        }
        found
    }
}

impl std::fmt::Debug for ScriptValidator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptValidator").finish_non_exhaustive()
    }
}
