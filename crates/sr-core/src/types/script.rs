//! Raw script configuration records.
//!
//! A [`ScriptConfig`] is one element of the `Scripts` array in the JSON
//! configuration file. Records are immutable inputs: the registry derives its
//! own [`ScriptEntry`](crate::ScriptEntry) values from them.
//!
//! Field names are matched case-insensitively. [`ConfigFile`](crate::ConfigFile)
//! lowercases every object key before deserializing, so the types here only
//! accept lowercase keys on input and write PascalCase on output.

use serde::{Deserialize, Deserializer, Serialize};

/// Configuration for a single launchable script.
///
/// # Examples
///
/// ```
/// use sr_core::ScriptConfig;
///
/// let config = ScriptConfig::new("build", "/repo/build.sh").with_arguments("--release");
/// assert_eq!(config.name, "build");
/// assert!(config.working_directory.is_none());
/// assert_eq!(config.arguments.as_deref(), Some("--release"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all(serialize = "PascalCase", deserialize = "lowercase"))]
pub struct ScriptConfig {
    /// Display name used for searching.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,

    /// Path to the script file.
    #[serde(rename(deserialize = "scriptpath"), default, deserialize_with = "null_as_empty")]
    pub script_path: String,

    /// Working directory for the launched process.
    ///
    /// When absent or blank, the directory containing the script is used.
    #[serde(rename(deserialize = "workingdirectory"), default)]
    pub working_directory: Option<String>,

    /// Arguments appended after the script path.
    #[serde(default)]
    pub arguments: Option<String>,

    /// Explicit interpreter executable (absolute path or bare name).
    ///
    /// When absent, the launch strategy is inferred from the file extension.
    #[serde(default)]
    pub interpreter: Option<String>,
}

impl ScriptConfig {
    /// Creates a record with only a name and a script path.
    #[must_use]
    pub fn new(name: impl Into<String>, script_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script_path: script_path.into(),
            ..Self::default()
        }
    }

    /// Sets the working directory.
    #[must_use]
    pub fn with_working_directory(mut self, dir: impl Into<String>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    /// Sets the argument string.
    #[must_use]
    pub fn with_arguments(mut self, arguments: impl Into<String>) -> Self {
        self.arguments = Some(arguments.into());
        self
    }

    /// Sets an explicit interpreter.
    #[must_use]
    pub fn with_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = Some(interpreter.into());
        self
    }
}

/// Top-level shape of the configuration file: `{"Scripts": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "PascalCase", deserialize = "lowercase"))]
pub struct ScriptsDocument {
    /// Script records in declaration order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub scripts: Vec<ScriptConfig>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
