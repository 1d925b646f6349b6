//! Command construction and process launching.
//!
//! [`LaunchCommand::for_entry`] maps each [`ScriptKind`] to a command line.
//! The mapping is one exhaustive `match`, so a new kind cannot be added
//! without deciding how it is launched. [`Launcher`] is the single capability
//! the executor uses to start processes; [`ProcessLauncher`] spawns real
//! processes and never waits for them.

use std::fmt;
use std::process::Command;

use camino::{Utf8Path, Utf8PathBuf};
use smallvec::SmallVec;
use sr_core::{LaunchConfig, ScriptEntry, ScriptKind};
use tracing::info;

use crate::LaunchError;

/// A fully resolved process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    /// Executable to start.
    pub program: String,
    /// Host arguments followed by the script path.
    pub args: SmallVec<[String; 4]>,
    /// The configured argument string split into words.
    pub extra_args: Vec<String>,
    /// The configured argument string, verbatim.
    pub raw_arguments: String,
    /// Working directory of the new process.
    pub working_dir: Utf8PathBuf,
}

impl LaunchCommand {
    /// Builds the command line for an entry.
    ///
    /// Returns `Ok(None)` for [`ScriptKind::Unknown`], which has no launch
    /// strategy.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::InvalidArguments`] if the entry's argument
    /// string has an unterminated quote.
    ///
    /// # Examples
    ///
    /// ```
    /// use sr_core::{EntryId, LaunchConfig, ScriptConfig, ScriptEntry, ScriptKind};
    /// use sr_launcher::LaunchCommand;
    ///
    /// let config = ScriptConfig::new("build", r"C:\p\build.bat").with_arguments("-x");
    /// let entry = ScriptEntry::from_config(EntryId::new(1), &config, ScriptKind::Batch, "");
    ///
    /// let command = LaunchCommand::for_entry(&entry, &LaunchConfig::default())
    ///     .unwrap()
    ///     .unwrap();
    /// assert_eq!(command.program, "cmd.exe");
    /// assert_eq!(command.argv().collect::<Vec<_>>(), ["/c", r"C:\p\build.bat", "-x"]);
    /// assert_eq!(command.working_dir, r"C:\p");
    /// ```
    pub fn for_entry(
        entry: &ScriptEntry,
        config: &LaunchConfig,
    ) -> Result<Option<Self>, LaunchError> {
        let (program, leading) = match entry.kind {
            ScriptKind::Batch => (config.batch_program.as_str(), config.batch_args.as_slice()),
            ScriptKind::Shell => (config.shell_program.as_str(), config.shell_args.as_slice()),
            ScriptKind::Interpreter => (entry.custom_interpreter.as_str(), &[][..]),
            ScriptKind::Unknown => return Ok(None),
        };

        let extra_args = split_arguments(&entry.arguments)?;

        let mut args: SmallVec<[String; 4]> = SmallVec::with_capacity(leading.len() + 1);
        args.extend(leading.iter().cloned());
        args.push(entry.script_path.clone());

        Ok(Some(Self {
            program: program.to_owned(),
            args,
            extra_args,
            raw_arguments: entry.arguments.clone(),
            working_dir: Utf8PathBuf::from(&entry.working_directory),
        }))
    }

    /// Every argument in order, with the configured arguments split.
    pub fn argv(&self) -> impl Iterator<Item = &str> {
        self.args
            .iter()
            .chain(&self.extra_args)
            .map(String::as_str)
    }
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_word(f, &self.program)?;
        for arg in self.argv() {
            f.write_str(" ")?;
            write_word(f, arg)?;
        }
        Ok(())
    }
}

fn write_word(f: &mut fmt::Formatter<'_>, word: &str) -> fmt::Result {
    if word.is_empty() || word.contains(char::is_whitespace) {
        write!(f, "\"{word}\"")
    } else {
        f.write_str(word)
    }
}

/// Splits a configured argument string into words.
///
/// Whitespace separates words and double quotes group them. Backslashes and
/// `#` are ordinary characters, so Windows paths survive unchanged.
fn split_arguments(arguments: &str) -> Result<Vec<String>, LaunchError> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for c in arguments.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            c => {
                word.push(c);
                in_word = true;
            }
        }
    }

    if quoted {
        return Err(LaunchError::invalid_arguments(arguments));
    }
    if in_word {
        words.push(word);
    }
    Ok(words)
}

/// Starts processes without waiting for them.
pub trait Launcher {
    /// Spawns `command` and returns as soon as the process has started.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::Spawn`] if the operating system refuses to
    /// start the process.
    fn spawn(&self, command: &LaunchCommand) -> Result<(), LaunchError>;
}

impl<L: Launcher + ?Sized> Launcher for &L {
    fn spawn(&self, command: &LaunchCommand) -> Result<(), LaunchError> {
        (**self).spawn(command)
    }
}

/// Spawns real child processes.
///
/// The child inherits the standard streams and is detached from the
/// launcher: its exit status is never collected.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn spawn(&self, command: &LaunchCommand) -> Result<(), LaunchError> {
        let mut cmd = rooted_command(&command.program, &command.working_dir);
        cmd.args(&command.args);
        append_arguments(&mut cmd, command);

        let child = cmd
            .spawn()
            .map_err(|source| LaunchError::spawn(command.program.as_str(), source))?;

        info!(pid = child.id(), command = %command, cwd = %command.working_dir, "Launched script");
        Ok(())
    }
}

/// Creates a command that is rooted to a specific working directory.
#[allow(clippy::disallowed_methods)]
fn rooted_command(program: &str, working_dir: &Utf8Path) -> Command {
    let mut cmd = Command::new(program);
    if !working_dir.as_str().is_empty() {
        cmd.current_dir(working_dir.as_std_path());
    }
    cmd
}

/// Windows programs parse their own command line, so the configured string
/// is appended untouched.
#[cfg(windows)]
fn append_arguments(cmd: &mut Command, command: &LaunchCommand) {
    use std::os::windows::process::CommandExt;

    if !command.raw_arguments.trim().is_empty() {
        cmd.raw_arg(&command.raw_arguments);
    }
}

#[cfg(not(windows))]
fn append_arguments(cmd: &mut Command, command: &LaunchCommand) {
    cmd.args(&command.extra_args);
}
