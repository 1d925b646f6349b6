//! Script registry, validation, and process dispatch for script-runner.
//!
//! This crate turns configured script records into a searchable catalog and
//! launches the entries a user picks.
//!
//! # Overview
//!
//! A host drives one query cycle at a time:
//!
//! 1. [`ScriptRegistry::reload`] reconciles the catalog against the current
//!    configuration, keeping unchanged entries in their recency position.
//! 2. [`ScriptRegistry::search`] stamps ranks and returns matching entries.
//! 3. [`ScriptExecutor::execute`] validates the chosen entry, spawns it, and
//!    promotes it to the front of the catalog.
//!
//! # Example
//!
//! ```no_run
//! use sr_core::{ConfigFile, LaunchConfig};
//! use sr_launcher::{ScriptExecutor, ScriptRegistry};
//!
//! let config = ConfigFile::new(Some("scripts.json".into()));
//! let mut registry = ScriptRegistry::new();
//! registry.reload_from(&config);
//!
//! let executor = ScriptExecutor::new(LaunchConfig::default());
//! for entry in registry.search("deploy") {
//!     if executor.execute(&entry, &mut registry) {
//!         break;
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ScriptRegistry (owned catalog, &mut per cycle)
//!     │
//!     └── classify (extension / interpreter → ScriptKind)
//!
//! ScriptExecutor
//!     │
//!     ├── ScriptValidator
//!     │       ├── Notifier (user-facing messages)
//!     │       └── InterpreterProbe (bounded `which` / `where`)
//!     │
//!     ├── LaunchCommand (kind → command line)
//!     │
//!     └── Launcher (fire-and-forget spawn)
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod classifier;
mod error;
mod executor;
mod launch;
mod notify;
mod probe;
mod registry;
mod validator;

pub use classifier::classify;
pub use error::LaunchError;
pub use executor::{ScriptExecutor, UNSUPPORTED_SCRIPT};
pub use launch::{LaunchCommand, Launcher, ProcessLauncher};
pub use notify::{LogNotifier, MemoryNotifier, Notification, Notifier};
pub use probe::{InterpreterProbe, SearchPathProbe};
pub use registry::{ReloadSummary, ScriptRegistry};
pub use validator::{
    ScriptValidator, INTERPRETER_NOT_FOUND, SCRIPT_NOT_FOUND, WORKING_DIRECTORY_NOT_FOUND,
};
