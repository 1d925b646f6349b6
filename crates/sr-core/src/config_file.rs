//! Script configuration file.
//!
//! The configuration file is a JSON document listing launchable scripts:
//!
//! ```json
//! {
//!   "Scripts": [
//!     { "Name": "build", "ScriptPath": "C:\\p\\build.bat", "Arguments": "-x" }
//!   ]
//! }
//! ```
//!
//! Keys are matched case-insensitively. [`ConfigFile::load`] is strict and
//! reports every failure; the [`ConfigSource`] implementation is lenient and
//! turns an unset, missing, or unreadable file into an empty list, because an
//! absent configuration is a normal state for the launcher.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{ConfigError, ScriptConfig, ScriptsDocument, Theme};

/// File name used by [`ConfigFile::create_default`].
pub const DEFAULT_CONFIG_FILE_NAME: &str = "script-runner-config.json";

const DIR_PLACEHOLDER: &str = "$DEFAULT_CONFIG_DIR$";

#[cfg(windows)]
const HELLO_SCRIPT_NAME: &str = "hello-world.bat";
#[cfg(windows)]
const HELLO_SCRIPT_BODY: &str = "@echo off\r\necho Hello World!\r\npause\r\n";
#[cfg(windows)]
const TEMPLATE: &str = r#"{
  "Scripts": [
    {
      "Name": "Hello World",
      "ScriptPath": "$DEFAULT_CONFIG_DIR$\\hello-world.bat",
      "WorkingDirectory": null,
      "Arguments": null,
      "Interpreter": null
    }
  ]
}
"#;

#[cfg(not(windows))]
const HELLO_SCRIPT_NAME: &str = "hello-world.sh";
#[cfg(not(windows))]
const HELLO_SCRIPT_BODY: &str = "#!/bin/sh\necho \"Hello World!\"\n";
#[cfg(not(windows))]
const TEMPLATE: &str = r#"{
  "Scripts": [
    {
      "Name": "Hello World",
      "ScriptPath": "$DEFAULT_CONFIG_DIR$/hello-world.sh",
      "WorkingDirectory": null,
      "Arguments": null,
      "Interpreter": null
    }
  ]
}
"#;

/// Supplies script configuration records on demand.
///
/// Implementations never fail: when no configuration is available they
/// return an empty list.
pub trait ConfigSource {
    /// Returns the current configuration records in declaration order.
    fn script_configs(&self) -> Vec<ScriptConfig>;
}

impl ConfigSource for [ScriptConfig] {
    fn script_configs(&self) -> Vec<ScriptConfig> {
        self.to_vec()
    }
}

impl ConfigSource for Vec<ScriptConfig> {
    fn script_configs(&self) -> Vec<ScriptConfig> {
        self.clone()
    }
}

/// Where the configured file stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigStatus {
    /// No path has been configured.
    Unset,
    /// A path is configured but no file exists there.
    Missing(Utf8PathBuf),
    /// The file exists.
    Ready(Utf8PathBuf),
}

impl ConfigStatus {
    /// Returns `true` if the file exists.
    #[inline]
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// User-facing description of the status.
    #[must_use]
    pub fn subtitle(&self) -> String {
        match self {
            Self::Unset => "Please specify a config json in the plugin options.".to_owned(),
            Self::Missing(path) => format!("{path} does not exist"),
            Self::Ready(path) => path.to_string(),
        }
    }
}

/// Reader for the script configuration file.
///
/// # Examples
///
/// ```
/// use sr_core::{ConfigFile, ConfigSource};
///
/// let file = ConfigFile::new(None);
/// assert!(file.script_configs().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    path: Option<Utf8PathBuf>,
}

impl ConfigFile {
    /// Creates a reader for the given path.
    #[must_use]
    pub fn new(path: Option<Utf8PathBuf>) -> Self {
        Self { path }
    }

    /// Returns the configured path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path
            .as_deref()
            .filter(|path| !path.as_str().trim().is_empty())
    }

    /// Reports whether the configured file exists.
    #[must_use]
    pub fn status(&self) -> ConfigStatus {
        match self.path() {
            None => ConfigStatus::Unset,
            Some(path) if path.is_file() => ConfigStatus::Ready(path.to_owned()),
            Some(path) => ConfigStatus::Missing(path.to_owned()),
        }
    }

    /// Reads and parses the configured file.
    ///
    /// An unset path or a missing file yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not a valid configuration document.
    pub fn load(&self) -> Result<Vec<ScriptConfig>, ConfigError> {
        let ConfigStatus::Ready(path) = self.status() else {
            return Ok(Vec::new());
        };

        let json = fs::read_to_string(path.as_std_path())?;
        let scripts = Self::parse(&json)?;
        debug!(path = %path, count = scripts.len(), "Loaded script configuration");
        Ok(scripts)
    }

    /// Parses a configuration document, matching keys case-insensitively.
    ///
    /// A `null` document yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed JSON or mistyped fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use sr_core::ConfigFile;
    ///
    /// let scripts = ConfigFile::parse(r#"{"SCRIPTS": [{"NAME": "a", "scriptPath": "a.sh"}]}"#).unwrap();
    /// assert_eq!(scripts[0].name, "a");
    /// assert_eq!(scripts[0].script_path, "a.sh");
    /// ```
    pub fn parse(json: &str) -> Result<Vec<ScriptConfig>, ConfigError> {
        let value: Value = serde_json::from_str(json)?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        let document: ScriptsDocument = serde_json::from_value(lowercase_keys(value))?;
        Ok(document.scripts)
    }

    /// Location of the default configuration inside `dir`.
    #[must_use]
    pub fn default_path(dir: &Utf8Path) -> Utf8PathBuf {
        dir.join(DEFAULT_CONFIG_FILE_NAME)
    }

    /// Icon shown next to the configuration status for `theme`.
    #[must_use]
    pub const fn icon_path(theme: Theme) -> &'static str {
        theme.config_icon()
    }

    /// Returns `true` if a default configuration already exists in `dir`.
    #[must_use]
    pub fn default_exists(dir: &Utf8Path) -> bool {
        Self::default_path(dir).is_file()
    }

    /// Writes a default configuration with a hello-world script into `dir`.
    ///
    /// The directory is created if needed. An existing hello-world script is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPath`] if `dir` exists but is not a
    /// directory, [`ConfigError::AlreadyExists`] if a configuration is already
    /// present, and [`ConfigError::Io`] if writing fails.
    pub fn create_default(dir: &Utf8Path) -> Result<Utf8PathBuf, ConfigError> {
        if dir.exists() && !dir.is_dir() {
            return Err(ConfigError::invalid_path(dir, "not a directory"));
        }

        let config_path = Self::default_path(dir);
        if config_path.exists() {
            return Err(ConfigError::AlreadyExists(config_path));
        }

        fs::create_dir_all(dir.as_std_path())?;

        let script_path = dir.join(HELLO_SCRIPT_NAME);
        if !script_path.exists() {
            fs::write(script_path.as_std_path(), HELLO_SCRIPT_BODY)?;
        }

        let escaped_dir = serde_json::to_string(dir.as_str())?;
        let content = TEMPLATE.replace(DIR_PLACEHOLDER, escaped_dir.trim_matches('"'));
        fs::write(config_path.as_std_path(), content)?;

        debug!(path = %config_path, "Created default configuration");
        Ok(config_path)
    }
}

impl ConfigSource for ConfigFile {
    fn script_configs(&self) -> Vec<ScriptConfig> {
        match self.load() {
            Ok(scripts) => scripts,
            Err(error) => {
                warn!(
                    path = self.path().map_or("", Utf8Path::as_str),
                    error = %error,
                    "Ignoring unusable script configuration"
                );
                Vec::new()
            }
        }
    }
}

/// Recursively lowercases every object key.
fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.to_lowercase(), lowercase_keys(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn utf8_dir(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("temp dir is UTF-8")
    }

    #[test]
    fn test_unset_path_yields_empty() {
        let file = ConfigFile::new(None);
        assert_eq!(file.status(), ConfigStatus::Unset);
        assert!(file.load().unwrap().is_empty());
        assert!(file.script_configs().is_empty());
    }

    #[test]
    fn test_blank_path_counts_as_unset() {
        let file = ConfigFile::new(Some(Utf8PathBuf::from("  ")));
        assert_eq!(file.status(), ConfigStatus::Unset);
    }

    #[test]
    fn test_missing_file_yields_empty() {
        let file = ConfigFile::new(Some(Utf8PathBuf::from("nonexistent.json")));
        assert_eq!(
            file.status(),
            ConfigStatus::Missing(Utf8PathBuf::from("nonexistent.json"))
        );
        assert!(file.script_configs().is_empty());
    }

    #[test]
    fn test_reads_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = utf8_dir(&dir).join("testConfig.json");
        fs::write(
            &path,
            r#"{
                "scripts": [{
                    "ScriptPath": "path1",
                    "WorkingDirectory": "dir1",
                    "Arguments": "args1",
                    "Interpreter": "interpreter1"
                }]
            }"#,
        )
        .unwrap();

        let file = ConfigFile::new(Some(path));
        let configs = file.script_configs();

        assert_eq!(configs.len(), 1);
        let config = &configs[0];
        assert_eq!(config.name, "");
        assert_eq!(config.script_path, "path1");
        assert_eq!(config.working_directory.as_deref(), Some("dir1"));
        assert_eq!(config.arguments.as_deref(), Some("args1"));
        assert_eq!(config.interpreter.as_deref(), Some("interpreter1"));
    }

    #[test]
    fn test_invalid_json_is_strict_error_but_lenient_source() {
        let dir = TempDir::new().unwrap();
        let path = utf8_dir(&dir).join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let file = ConfigFile::new(Some(path));
        assert!(file.load().unwrap_err().is_parse());
        assert!(file.script_configs().is_empty());
    }

    #[test]
    fn test_null_document_is_empty() {
        assert!(ConfigFile::parse("null").unwrap().is_empty());
    }

    #[test]
    fn test_status_subtitles() {
        insta::assert_snapshot!(
            ConfigStatus::Unset.subtitle(),
            @"Please specify a config json in the plugin options."
        );
        insta::assert_snapshot!(
            ConfigStatus::Missing(Utf8PathBuf::from("nonexistent.json")).subtitle(),
            @"nonexistent.json does not exist"
        );
        insta::assert_snapshot!(
            ConfigStatus::Ready(Utf8PathBuf::from("testConfig.json")).subtitle(),
            @"testConfig.json"
        );
    }

    #[test]
    fn test_icon_path_follows_theme() {
        assert_eq!(ConfigFile::icon_path(Theme::Light), "Images/Config.light.png");
        assert_eq!(ConfigFile::icon_path(Theme::HighContrastBlack), "Images/Config.dark.png");
    }

    #[test]
    fn test_create_default_round_trips() {
        let dir = TempDir::new().unwrap();
        let root = utf8_dir(&dir).join("DefaultConfig");

        assert!(!ConfigFile::default_exists(&root));
        let path = ConfigFile::create_default(&root).unwrap();
        assert!(ConfigFile::default_exists(&root));

        let configs = ConfigFile::new(Some(path)).load().unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].name, "Hello World");
        assert_eq!(configs[0].script_path, root.join(HELLO_SCRIPT_NAME).as_str());
        assert!(root.join(HELLO_SCRIPT_NAME).is_file());
    }

    #[test]
    fn test_create_default_rejects_file_as_directory() {
        let dir = TempDir::new().unwrap();
        let file = utf8_dir(&dir).join("not-a-dir");
        fs::write(&file, "").unwrap();

        let err = ConfigFile::create_default(&file).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPath { .. }));
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_create_default_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let root = utf8_dir(&dir);
        ConfigFile::create_default(&root).unwrap();

        let err = ConfigFile::create_default(&root).unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists(_)));
    }
}
