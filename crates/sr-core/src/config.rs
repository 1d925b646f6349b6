//! Launcher settings.
//!
//! This module provides the settings types for the launcher:
//!
//! - [`LaunchConfig`] - Programs used to host each script kind and probe settings
//! - [`Settings`] - Root settings combining the config file location, theme, and launch options
//!
//! All settings types implement [`Default`] with per-platform values.

use std::time::Duration;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::Theme;

/// Default upper bound for the interpreter resolution probe.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5_000;

/// Programs and options used to turn a catalog entry into a process.
///
/// # Examples
///
/// ```
/// use sr_core::LaunchConfig;
///
/// let config = LaunchConfig::default();
/// assert_eq!(config.batch_program, "cmd.exe");
/// assert_eq!(config.batch_args, vec!["/c"]);
/// assert!(!config.allow_unknown);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// Host for `.bat` scripts.
    pub batch_program: String,

    /// Arguments placed before the script path for batch scripts.
    pub batch_args: Vec<String>,

    /// POSIX-compatible shell for `.sh` scripts.
    pub shell_program: String,

    /// Arguments placed before the script path for shell scripts.
    ///
    /// On Windows this carries `--no-cd` so Git Bash keeps the process
    /// working directory instead of switching to `$HOME`.
    pub shell_args: Vec<String>,

    /// Program that resolves a bare interpreter name on the search path.
    pub probe_program: String,

    /// Upper bound for the resolution probe, in milliseconds.
    pub probe_timeout_ms: u64,

    /// Treat scripts of unknown kind as a silent successful no-op instead of
    /// a validation failure.
    pub allow_unknown: bool,
}

impl LaunchConfig {
    /// Returns the probe timeout as a [`Duration`].
    #[inline]
    #[must_use]
    pub const fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

impl Default for LaunchConfig {
    fn default() -> Self {
        let (shell_program, shell_args, probe_program) = if cfg!(windows) {
            (
                r"C:\Program Files\Git\git-bash.exe",
                vec!["--no-cd".to_owned()],
                "where",
            )
        } else {
            ("sh", Vec::new(), "which")
        };

        Self {
            batch_program: "cmd.exe".to_owned(),
            batch_args: vec!["/c".to_owned()],
            shell_program: shell_program.to_owned(),
            shell_args,
            probe_program: probe_program.to_owned(),
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            allow_unknown: false,
        }
    }
}

/// Root settings for the launcher.
///
/// # Examples
///
/// ```
/// use sr_core::{Settings, Theme};
///
/// let settings = Settings::default();
/// assert!(settings.config_file.is_none());
/// assert_eq!(settings.theme, Theme::Light);
///
/// let json = serde_json::to_string_pretty(&settings).unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Location of the script configuration file.
    pub config_file: Option<Utf8PathBuf>,

    /// Active UI theme.
    pub theme: Theme,

    /// Launch options.
    pub launch: LaunchConfig,
}
