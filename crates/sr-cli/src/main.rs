//! CLI entry point for script-runner.
//!
//! This binary hosts the launcher outside of a desktop shell: it reloads the
//! configured scripts, answers queries, and launches the selected entry.
//!
//! # Usage
//!
//! ```bash
//! script-runner [OPTIONS] <COMMAND>
//!
//! # List every configured script
//! script-runner --config scripts.json list
//!
//! # Launch the best match for a name
//! script-runner run deploy
//!
//! # Interactive query loop with recency promotion
//! script-runner session
//!
//! # Write a starter configuration
//! script-runner init ~/.script-runner
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::{BufRead, Write};
use std::process::ExitCode;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use sr_core::{ConfigFile, ConfigStatus, ScriptEntry, Settings, Theme};
use sr_launcher::{Notifier, ProcessLauncher, ScriptExecutor, ScriptRegistry, SearchPathProbe};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Launch configured scripts by name.
///
/// Scripts are read from a JSON configuration file listing a name, a script
/// path, and optional working directory, arguments, and interpreter.
#[derive(Parser)]
#[command(name = "script-runner", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Path to the script configuration JSON file.
    #[arg(short, long, global = true, env = "SCRIPT_RUNNER_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Theme used to pick icons (light, dark, system, high-contrast-*).
    #[arg(long, global = true, env = "SCRIPT_RUNNER_THEME")]
    theme: Option<Theme>,

    /// Timeout for resolving a bare interpreter name, in milliseconds.
    #[arg(long, global = true)]
    probe_timeout_ms: Option<u64>,

    /// Treat scripts with no launch strategy as a silent success.
    #[arg(long, global = true)]
    allow_unknown: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List configured scripts matching a query.
    List {
        /// Case-insensitive name filter; lists everything when omitted.
        query: Option<String>,

        /// Print entries as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Launch the script whose name best matches NAME.
    Run {
        /// Exact name (case-insensitive) or a search query.
        name: String,
    },

    /// Read queries from stdin and launch hits interactively.
    ///
    /// Each line reloads the configuration and prints numbered hits.
    /// `:<n>` launches hit n, `:theme light|dark` switches icons, `:q` quits.
    Session,

    /// Show the configuration file status.
    Config {
        /// Open the configuration file with the system default handler.
        #[arg(long)]
        open: bool,
    },

    /// Create a default configuration and hello-world script in DIR.
    Init {
        /// Directory that receives the configuration.
        dir: Utf8PathBuf,
    },
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `warn` level by default so that
/// notifications stay readable.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "warn" };
        EnvFilter::new(format!("{level},mio=warn,tokio=warn"))
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Builds [`Settings`] from CLI arguments.
fn build_settings(cli: &Cli) -> Settings {
    let mut settings = Settings {
        config_file: cli.config.clone(),
        ..Settings::default()
    };
    if let Some(theme) = cli.theme {
        settings.theme = theme;
    }
    if let Some(timeout) = cli.probe_timeout_ms {
        settings.launch.probe_timeout_ms = timeout;
    }
    settings.launch.allow_unknown |= cli.allow_unknown;
    settings
}

/// Creates an executor that spawns real processes and reports to stderr.
fn create_executor(
    settings: &Settings,
) -> ScriptExecutor<ProcessLauncher, StderrNotifier, SearchPathProbe> {
    let probe = SearchPathProbe::from_config(&settings.launch);
    ScriptExecutor::with_parts(settings.launch.clone(), ProcessLauncher, StderrNotifier, probe)
}

/// Prints notifications as `<title>: <body>` on stderr.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn show_message(&self, title: &str, body: &str) {
        let stderr = std::io::stderr();
        let mut handle = stderr.lock();
        // A notification that cannot reach stderr has nowhere else to go.
        let _ = writeln!(handle, "{title}: {body}");
    }
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Lists entries matching `query`.
fn run_list(settings: &Settings, query: &str, json: bool) -> color_eyre::Result<()> {
    let file = ConfigFile::new(settings.config_file.clone());
    report_unready(&file);

    let mut registry = ScriptRegistry::with_theme(settings.theme);
    registry.reload_from(&file);
    let hits = registry.search(query);
    debug!(query, hits = hits.len(), "Listed scripts");

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    if json {
        let content = serde_json::to_string_pretty(&hits)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to serialize JSON: {}", e))?;
        writeln!(handle, "{content}")?;
    } else {
        print_entries(&mut handle, &hits, false)?;
    }
    Ok(())
}

/// Launches the best match for `name`.
///
/// Returns `false` if nothing matched or the launch failed.
fn run_script(settings: &Settings, name: &str) -> bool {
    let file = ConfigFile::new(settings.config_file.clone());
    report_unready(&file);

    let mut registry = ScriptRegistry::with_theme(settings.theme);
    registry.reload_from(&file);

    let executor = create_executor(settings);
    let Some(entry) = best_match(registry.search(name), name) else {
        executor
            .notifier()
            .show_message("No matching script", &format!("No script matches '{name}'."));
        return false;
    };

    info!(name = %entry.name, "Running script");
    executor.execute(&entry, &mut registry)
}

/// Runs the interactive query loop until `:q` or end of input.
fn run_session(settings: &Settings) -> color_eyre::Result<()> {
    let file = ConfigFile::new(settings.config_file.clone());
    report_unready(&file);

    let mut registry = ScriptRegistry::with_theme(settings.theme);
    let executor = create_executor(settings);
    let mut hits: Vec<ScriptEntry> = Vec::new();

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let stdout = std::io::stdout();

    loop {
        {
            let mut handle = stdout.lock();
            write!(handle, "> ")?;
            handle.flush()?;
        }

        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let line = line.trim();

        match SessionInput::parse(line) {
            SessionInput::Quit => break,
            SessionInput::Theme(theme) => {
                registry.update_icon_path(theme);
                let mut handle = stdout.lock();
                writeln!(handle, "icon: {}", registry.icon_path())?;
            }
            SessionInput::Execute(index) => {
                match index.checked_sub(1).and_then(|i| hits.get(i)) {
                    Some(entry) => {
                        executor.execute(entry, &mut registry);
                    }
                    None => executor
                        .notifier()
                        .show_message("No such hit", &format!("There is no hit {index}.")),
                }
            }
            SessionInput::Invalid(input) => executor
                .notifier()
                .show_message("Unknown command", &format!("'{input}' is not a session command.")),
            SessionInput::Query(query) => {
                registry.reload_from(&file);
                hits = registry.search(query);
                let mut handle = stdout.lock();
                print_entries(&mut handle, &hits, true)?;
            }
        }
    }

    Ok(())
}

/// Shows the configuration status and optionally opens the file.
fn run_config(settings: &Settings, open: bool) -> color_eyre::Result<()> {
    let file = ConfigFile::new(settings.config_file.clone());
    let status = file.status();

    {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", status.subtitle())?;
        writeln!(handle, "icon: {}", ConfigFile::icon_path(settings.theme))?;
    }

    if !open {
        return Ok(());
    }

    match status {
        ConfigStatus::Ready(path) => {
            info!(path = %path, "Opening configuration");
            open::that(path.as_std_path())
                .map_err(|e| color_eyre::eyre::eyre!("Failed to open {}: {}", path, e))?;
        }
        ConfigStatus::Unset | ConfigStatus::Missing(_) => {
            StderrNotifier.show_message("Config not found", &status.subtitle());
        }
    }
    Ok(())
}

/// Writes the default configuration into `dir`.
fn run_init(dir: &Utf8Path) -> color_eyre::Result<()> {
    let path = ConfigFile::create_default(dir)?;
    info!(path = %path, "Created configuration");

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{path}")?;
    Ok(())
}

// =============================================================================
// SESSION INPUT
// =============================================================================

/// One line of session input.
#[derive(Debug, PartialEq, Eq)]
enum SessionInput<'a> {
    Quit,
    Theme(Theme),
    Execute(usize),
    Invalid(&'a str),
    Query(&'a str),
}

impl<'a> SessionInput<'a> {
    fn parse(line: &'a str) -> Self {
        let Some(command) = line.strip_prefix(':') else {
            return Self::Query(line);
        };

        if command == "q" {
            return Self::Quit;
        }
        if let Some(name) = command.strip_prefix("theme ") {
            return Theme::from_str(name).map_or(Self::Invalid(line), Self::Theme);
        }
        command.parse().map_or(Self::Invalid(line), Self::Execute)
    }
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Prints one line per entry, optionally numbered for session selection.
fn print_entries(
    handle: &mut impl Write,
    entries: &[ScriptEntry],
    numbered: bool,
) -> std::io::Result<()> {
    if entries.is_empty() {
        return writeln!(handle, "no scripts");
    }

    for (index, entry) in entries.iter().enumerate() {
        if numbered {
            write!(handle, "{:>3}. ", index + 1)?;
        }
        writeln!(
            handle,
            "{:>4}  {:<24} {:<11} {}",
            entry.rank,
            entry.name,
            entry.kind.label(),
            entry.script_path
        )?;
    }
    Ok(())
}

/// Warns on stderr when the configuration file cannot be used.
fn report_unready(file: &ConfigFile) {
    let status = file.status();
    if !status.is_ready() {
        StderrNotifier.show_message("Script Runner", &status.subtitle());
    }
}

/// Picks the exact (case-insensitive) name match, or else the top hit.
fn best_match(hits: Vec<ScriptEntry>, name: &str) -> Option<ScriptEntry> {
    let needle = name.trim().to_lowercase();
    let exact = hits
        .iter()
        .position(|entry| entry.name.to_lowercase() == needle);
    let index = exact.unwrap_or(0);
    hits.into_iter().nth(index)
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
fn main() -> color_eyre::Result<ExitCode> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    let settings = build_settings(&cli);

    // 4. Route to appropriate command
    match &cli.command {
        Commands::List { query, json } => {
            run_list(&settings, query.as_deref().unwrap_or(""), *json)?;
        }
        Commands::Run { name } => {
            if !run_script(&settings, name) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Session => run_session(&settings)?,
        Commands::Config { open } => run_config(&settings, *open)?,
        Commands::Init { dir } => run_init(dir)?,
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sr_core::{EntryId, ScriptConfig, ScriptKind};

    fn entry(name: &str) -> ScriptEntry {
        let config = ScriptConfig::new(name, format!("/repo/{name}.sh"));
        ScriptEntry::from_config(EntryId::new(1), &config, ScriptKind::Shell, "")
    }

    #[test]
    fn test_session_input() {
        assert_eq!(SessionInput::parse(":q"), SessionInput::Quit);
        assert_eq!(SessionInput::parse(":2"), SessionInput::Execute(2));
        assert_eq!(SessionInput::parse(":theme dark"), SessionInput::Theme(Theme::Dark));
        assert_eq!(SessionInput::parse(":theme purple"), SessionInput::Invalid(":theme purple"));
        assert_eq!(SessionInput::parse(":x"), SessionInput::Invalid(":x"));
        assert_eq!(SessionInput::parse("dep"), SessionInput::Query("dep"));
        assert_eq!(SessionInput::parse(""), SessionInput::Query(""));
    }

    #[test]
    fn test_best_match_prefers_exact_name() {
        let hits = vec![entry("deploy-staging"), entry("Deploy")];
        assert_eq!(best_match(hits, "deploy").map(|e| e.name).as_deref(), Some("Deploy"));

        let hits = vec![entry("deploy-staging"), entry("deploy-prod")];
        assert_eq!(
            best_match(hits, "deploy").map(|e| e.name).as_deref(),
            Some("deploy-staging")
        );
        assert!(best_match(Vec::new(), "deploy").is_none());
    }

    #[test]
    fn test_best_match_folds_non_ascii_case() {
        let hits = vec![entry("überbuild-nightly"), entry("Überbuild")];
        assert_eq!(
            best_match(hits, "überbuild").map(|e| e.name).as_deref(),
            Some("Überbuild")
        );
    }

    #[test]
    fn test_build_settings_overrides() {
        let cli = Cli::parse_from([
            "script-runner",
            "--config",
            "scripts.json",
            "--theme",
            "dark",
            "--probe-timeout-ms",
            "250",
            "--allow-unknown",
            "list",
        ]);
        let settings = build_settings(&cli);
        assert_eq!(settings.config_file.as_deref().map(|p| p.as_str()), Some("scripts.json"));
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.launch.probe_timeout_ms, 250);
        assert!(settings.launch.allow_unknown);
    }

    #[test]
    fn test_print_entries() {
        let mut first = entry("build");
        first.rank = 2;
        let mut second = entry("deploy");
        second.rank = 1;

        let mut out = Vec::new();
        print_entries(&mut out, &[first, second], true).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(
            lines,
            [
                "  1.    2  build                    Shell       /repo/build.sh",
                "  2.    1  deploy                   Shell       /repo/deploy.sh",
            ]
        );
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
