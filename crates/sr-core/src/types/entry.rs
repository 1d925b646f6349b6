//! Catalog entries.
//!
//! A [`ScriptEntry`] is the registry's resolved view of a [`ScriptConfig`]:
//! the working directory and arguments are never absent, the launch
//! [`ScriptKind`] is fixed, and the entry carries the icon for the active theme
//! plus an advisory search rank.
//!
//! # Equivalence
//!
//! Reconciliation compares entries through [`EntryKey`], which borrows every
//! field except [`rank`](ScriptEntry::rank) and [`id`](ScriptEntry::id). Two
//! entries with equal keys describe the same launch and are interchangeable.

use serde::{Deserialize, Serialize};

use super::{ScriptConfig, ScriptKind};

/// Opaque identity of an entry within one registry.
///
/// Handed out by the registry when an entry is created. Survives reloads for
/// as long as the entry stays equivalent to its configuration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(u64);

impl EntryId {
    /// Creates an identifier from its raw value.
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A launchable script held by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEntry {
    /// Registry-assigned identity.
    pub id: EntryId,

    /// Display name.
    pub name: String,

    /// Path to the script file.
    pub script_path: String,

    /// Resolved working directory.
    pub working_directory: String,

    /// Argument string, empty when none were configured.
    pub arguments: String,

    /// Launch strategy.
    pub kind: ScriptKind,

    /// Interpreter executable; empty unless `kind` is [`ScriptKind::Interpreter`].
    pub custom_interpreter: String,

    /// Icon for the active theme.
    pub icon_path: String,

    /// Advisory rank stamped by the most recent search.
    pub rank: usize,
}

impl ScriptEntry {
    /// Derives an entry from a configuration record.
    ///
    /// A missing or blank working directory resolves to the parent directory
    /// of the script path. The interpreter is only kept for
    /// [`ScriptKind::Interpreter`].
    ///
    /// # Examples
    ///
    /// ```
    /// use sr_core::{EntryId, ScriptConfig, ScriptEntry, ScriptKind};
    ///
    /// let config = ScriptConfig::new("build", r"C:\p\build.bat").with_arguments("-x");
    /// let entry = ScriptEntry::from_config(EntryId::new(1), &config, ScriptKind::Batch, "icon.png");
    ///
    /// assert_eq!(entry.working_directory, r"C:\p");
    /// assert_eq!(entry.arguments, "-x");
    /// assert_eq!(entry.rank, 0);
    /// ```
    #[must_use]
    pub fn from_config(
        id: EntryId,
        config: &ScriptConfig,
        kind: ScriptKind,
        icon_path: &str,
    ) -> Self {
        let working_directory = match config.working_directory.as_deref() {
            Some(dir) if !dir.trim().is_empty() => dir.to_owned(),
            _ => parent_dir(&config.script_path).to_owned(),
        };

        let custom_interpreter = match kind {
            ScriptKind::Interpreter => config
                .interpreter
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_owned(),
            ScriptKind::Unknown | ScriptKind::Batch | ScriptKind::Shell => String::new(),
        };

        Self {
            id,
            name: config.name.clone(),
            script_path: config.script_path.clone(),
            working_directory,
            arguments: config.arguments.clone().unwrap_or_default(),
            kind,
            custom_interpreter,
            icon_path: icon_path.to_owned(),
            rank: 0,
        }
    }

    /// Returns the equivalence key of this entry.
    #[inline]
    #[must_use]
    pub fn key(&self) -> EntryKey<'_> {
        EntryKey {
            name: &self.name,
            script_path: &self.script_path,
            working_directory: &self.working_directory,
            arguments: &self.arguments,
            kind: self.kind,
            custom_interpreter: &self.custom_interpreter,
            icon_path: &self.icon_path,
        }
    }

    /// Returns `true` if both entries describe the same launch.
    #[inline]
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

/// Borrowed equivalence key of a [`ScriptEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryKey<'a> {
    name: &'a str,
    script_path: &'a str,
    working_directory: &'a str,
    arguments: &'a str,
    kind: ScriptKind,
    custom_interpreter: &'a str,
    icon_path: &'a str,
}

/// Returns the parent directory of `path`, or `""` if it has none.
///
/// Both `/` and `\` are treated as separators so configurations written on
/// one platform resolve the same way on another. Roots keep their separator.
///
/// # Examples
///
/// ```
/// use sr_core::parent_dir;
///
/// assert_eq!(parent_dir(r"C:\p\build.bat"), r"C:\p");
/// assert_eq!(parent_dir(r"C:\build.bat"), r"C:\");
/// assert_eq!(parent_dir("/opt/tools/run.sh"), "/opt/tools");
/// assert_eq!(parent_dir("/run.sh"), "/");
/// assert_eq!(parent_dir("run.sh"), "");
/// ```
#[must_use]
pub fn parent_dir(path: &str) -> &str {
    let Some(idx) = path.rfind(['/', '\\']) else {
        return "";
    };

    let parent = &path[..idx];
    if parent.is_empty() {
        return &path[..=idx];
    }
    if parent.len() == 2 && parent.ends_with(':') {
        return &path[..=idx];
    }
    parent
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(config: &ScriptConfig, kind: ScriptKind) -> ScriptEntry {
        ScriptEntry::from_config(EntryId::new(7), config, kind, "Images/Script.light.png")
    }

    #[test]
    fn test_explicit_working_directory_kept() {
        let config = ScriptConfig::new("a", "/x/a.sh").with_working_directory("/work");
        assert_eq!(entry(&config, ScriptKind::Shell).working_directory, "/work");
    }

    #[test]
    fn test_blank_working_directory_falls_back_to_parent() {
        let config = ScriptConfig::new("a", "/x/y/a.sh").with_working_directory("   ");
        assert_eq!(entry(&config, ScriptKind::Shell).working_directory, "/x/y");
    }

    #[test]
    fn test_bare_file_name_has_empty_working_directory() {
        let config = ScriptConfig::new("a", "a.sh");
        assert_eq!(entry(&config, ScriptKind::Shell).working_directory, "");
    }

    #[test]
    fn test_interpreter_dropped_for_other_kinds() {
        let config = ScriptConfig::new("a", "a.py").with_interpreter(" python3 ");
        assert_eq!(entry(&config, ScriptKind::Interpreter).custom_interpreter, "python3");
        assert_eq!(entry(&config, ScriptKind::Unknown).custom_interpreter, "");
    }

    #[test]
    fn test_equivalence_ignores_rank_and_id() {
        let config = ScriptConfig::new("a", "/x/a.sh");
        let first = entry(&config, ScriptKind::Shell);
        let mut second = ScriptEntry::from_config(
            EntryId::new(99),
            &config,
            ScriptKind::Shell,
            "Images/Script.light.png",
        );
        second.rank = 42;
        assert!(first.is_equivalent(&second));
        assert_ne!(first, second);
    }

    #[test]
    fn test_equivalence_includes_icon_path() {
        let config = ScriptConfig::new("a", "/x/a.sh");
        let light = entry(&config, ScriptKind::Shell);
        let dark =
            ScriptEntry::from_config(EntryId::new(7), &config, ScriptKind::Shell, "Images/Script.dark.png");
        assert!(!light.is_equivalent(&dark));
    }

    #[test]
    fn test_parent_dir_trailing_separator() {
        assert_eq!(parent_dir("/a/b/"), "/a/b");
        assert_eq!(parent_dir("dir/file"), "dir");
    }
}
