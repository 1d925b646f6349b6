//! Script execution pipeline.
//!
//! [`ScriptExecutor::execute`] validates an entry, builds its command line,
//! hands it to the [`Launcher`] and promotes the entry in the registry. Each
//! step short-circuits: the first failure shows exactly one notification and
//! `execute` returns `false` without spawning or promoting anything.

use sr_core::{LaunchConfig, ScriptEntry, ScriptKind};
use tracing::{debug, info, warn};

use crate::{
    InterpreterProbe, LaunchCommand, Launcher, LogNotifier, Notifier, ProcessLauncher,
    ScriptRegistry, ScriptValidator, SearchPathProbe,
};

/// Notification title for entries with no launch strategy.
pub const UNSUPPORTED_SCRIPT: &str = "Unsupported script";

/// Validates and launches registry entries.
///
/// # Examples
///
/// ```no_run
/// use sr_core::{LaunchConfig, ScriptConfig};
/// use sr_launcher::{ScriptExecutor, ScriptRegistry};
///
/// let mut registry = ScriptRegistry::new();
/// registry.reload([ScriptConfig::new("build", "/repo/build.sh")]);
///
/// let executor = ScriptExecutor::new(LaunchConfig::default());
/// if let Some(entry) = registry.search("build").into_iter().next() {
///     executor.execute(&entry, &mut registry);
/// }
/// ```
#[derive(Debug)]
pub struct ScriptExecutor<L = ProcessLauncher, N = LogNotifier, P = SearchPathProbe> {
    launcher: L,
    notifier: N,
    probe: P,
    config: LaunchConfig,
}

impl ScriptExecutor {
    /// Creates an executor that spawns real processes and logs notifications.
    #[must_use]
    pub fn new(config: LaunchConfig) -> Self {
        let probe = SearchPathProbe::from_config(&config);
        Self::with_parts(config, ProcessLauncher, LogNotifier, probe)
    }
}

impl<L, N, P> ScriptExecutor<L, N, P>
where
    L: Launcher,
    N: Notifier,
    P: InterpreterProbe,
{
    /// Creates an executor from explicit collaborators.
    #[must_use]
    pub fn with_parts(config: LaunchConfig, launcher: L, notifier: N, probe: P) -> Self {
        Self {
            launcher,
            notifier,
            probe,
            config,
        }
    }

    /// Returns the notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Returns a validator sharing this executor's notifier and probe.
    pub fn validator(&self) -> ScriptValidator<'_> {
        ScriptValidator::new(&self.notifier, &self.probe)
    }

    /// Launches `entry` and promotes it to the front of `registry`.
    ///
    /// Returns `true` only when a process was started. Every failure is
    /// reported through the notifier.
    pub fn execute(&self, entry: &ScriptEntry, registry: &mut ScriptRegistry) -> bool {
        debug!(id = %entry.id, name = %entry.name, kind = %entry.kind, "Executing script");

        let validator = self.validator();
        if !validator.verify_script(&entry.script_path)
            || !validator.verify_working_directory(&entry.working_directory)
        {
            return false;
        }

        if entry.kind == ScriptKind::Interpreter
            && !validator.verify_interpreter(&entry.custom_interpreter)
        {
            return false;
        }

        let command = match LaunchCommand::for_entry(entry, &self.config) {
            Ok(Some(command)) => command,
            Ok(None) => return self.unsupported(entry),
            Err(error) => {
                warn!(name = %entry.name, error = %error, "Could not build command line");
                self.notifier
                    .show_message(error.notification_title(), &error.to_string());
                return false;
            }
        };

        if let Err(error) = self.launcher.spawn(&command) {
            warn!(name = %entry.name, error = %error, "Could not start script");
            self.notifier
                .show_message(error.notification_title(), &error.to_string());
            return false;
        }

        if !registry.notify_selected(entry.id) {
            debug!(id = %entry.id, "Launched entry was not promoted");
        }
        info!(name = %entry.name, "Script started");
        true
    }

    fn unsupported(&self, entry: &ScriptEntry) -> bool {
        if self.config.allow_unknown {
            debug!(name = %entry.name, "Ignoring script with unknown kind");
            return true;
        }

        self.notifier.show_message(
            UNSUPPORTED_SCRIPT,
            &format!("Configured script '{}' has no launch strategy.", entry.script_path),
        );
        false
    }
}
