//! Interpreter resolution probe.
//!
//! Checks whether a bare interpreter name can be found on the executable
//! search path by running `which` (or `where` on Windows) as a child process
//! and looking at its standard output. This is the only blocking child
//! process the launcher waits for, so it is bounded by a timeout and the
//! probe is killed when the timeout elapses.

use std::process::Stdio;
use std::time::Duration;

use sr_core::LaunchConfig;
use tracing::{debug, warn};

use crate::LaunchError;

/// Decides whether a bare interpreter name is resolvable.
pub trait InterpreterProbe {
    /// Returns `true` if `name` resolves to an executable.
    fn is_resolvable(&self, name: &str) -> bool;
}

impl<F> InterpreterProbe for F
where
    F: Fn(&str) -> bool,
{
    fn is_resolvable(&self, name: &str) -> bool {
        self(name)
    }
}

/// Resolves interpreters through a search-path lookup program.
///
/// # Examples
///
/// ```no_run
/// use sr_core::LaunchConfig;
/// use sr_launcher::{InterpreterProbe, SearchPathProbe};
///
/// let probe = SearchPathProbe::from_config(&LaunchConfig::default());
/// if probe.is_resolvable("python3") {
///     println!("python3 is installed");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SearchPathProbe {
    program: String,
    timeout: Duration,
}

impl SearchPathProbe {
    /// Creates a probe that runs `program <name>`.
    #[must_use]
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Creates a probe from launch settings.
    #[must_use]
    pub fn from_config(config: &LaunchConfig) -> Self {
        Self::new(config.probe_program.clone(), config.probe_timeout())
    }

    /// Runs the lookup and reports whether it printed anything.
    ///
    /// Safe to call from inside a tokio runtime: the lookup then runs on a
    /// dedicated thread with its own runtime.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::Spawn`] if the lookup program cannot be started,
    /// [`LaunchError::ProbeTimeout`] if it does not exit in time, and
    /// [`LaunchError::ProbeRuntime`] if the runtime cannot be created.
    pub fn probe(&self, name: &str) -> Result<bool, LaunchError> {
        if tokio::runtime::Handle::try_current().is_err() {
            return self.probe_blocking(name);
        }

        // A runtime cannot be started on a thread that is already driving one.
        std::thread::scope(|scope| {
            scope
                .spawn(|| self.probe_blocking(name))
                .join()
                .unwrap_or_else(|_| {
                    Err(LaunchError::ProbeRuntime(std::io::Error::other(
                        "probe thread panicked",
                    )))
                })
        })
    }

    fn probe_blocking(&self, name: &str) -> Result<bool, LaunchError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(LaunchError::ProbeRuntime)?;

        runtime.block_on(async {
            let mut command = tokio::process::Command::new(&self.program);
            command
                .arg(name)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::null())
                .kill_on_drop(true);

            let output = tokio::time::timeout(self.timeout, command.output())
                .await
                .map_err(|_| LaunchError::probe_timeout(name, self.timeout))?
                .map_err(|source| LaunchError::spawn(self.program.as_str(), source))?;

            let found = !String::from_utf8_lossy(&output.stdout).trim().is_empty();
            debug!(program = %self.program, interpreter = name, found, "Probed interpreter");
            Ok::<bool, LaunchError>(found)
        })
    }
}

impl InterpreterProbe for SearchPathProbe {
    fn is_resolvable(&self, name: &str) -> bool {
        match self.probe(name) {
            Ok(found) => found,
            Err(error) => {
                warn!(interpreter = name, error = %error, "Interpreter probe failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_probe() {
        let probe = |name: &str| name == "python3";
        assert!(probe.is_resolvable("python3"));
        assert!(!probe.is_resolvable("ruby"));
    }

    #[test]
    fn test_missing_probe_program_is_spawn_error() {
        let probe = SearchPathProbe::new("definitely-not-a-real-lookup-tool", Duration::from_secs(1));
        let err = probe.probe("python3").unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
        assert!(!probe.is_resolvable("python3"));
    }

    #[cfg(unix)]
    #[test]
    fn test_output_means_resolvable() {
        let probe = SearchPathProbe::new("echo", Duration::from_secs(5));
        assert!(probe.probe("python3").unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_silent_lookup_means_unresolvable() {
        let probe = SearchPathProbe::new("true", Duration::from_secs(5));
        assert!(!probe.probe("python3").unwrap());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_lookup_inside_current_thread_runtime() {
        let probe = SearchPathProbe::new("echo", Duration::from_secs(5));
        assert!(probe.probe("python3").unwrap());
        assert!(probe.is_resolvable("python3"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_missing_program_inside_multi_thread_runtime() {
        let probe = SearchPathProbe::new("definitely-not-a-real-lookup-tool", Duration::from_secs(1));
        let err = probe.probe("python3").unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
        assert!(!probe.is_resolvable("python3"));
    }

    #[cfg(unix)]
    #[test]
    fn test_slow_lookup_times_out() {
        let probe = SearchPathProbe::new("sleep", Duration::from_millis(100));
        let err = probe.probe("5").unwrap_err();
        assert!(matches!(err, LaunchError::ProbeTimeout { .. }));
        assert!(!probe.is_resolvable("5"));
    }
}
