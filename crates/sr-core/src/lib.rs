//! Core types, errors, and configuration for the script-runner launcher.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - Domain types ([`ScriptConfig`], [`ScriptKind`], [`ScriptEntry`], [`Theme`])
//! - The [`ConfigError`] type for configuration loading failures
//! - Launcher [`Settings`] with sensible per-platform defaults
//! - The [`ConfigFile`] reader and the [`ConfigSource`] trait consumed by the registry

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod config_file;
pub mod error;
pub mod types;

pub use config::{LaunchConfig, Settings};
pub use config_file::{ConfigFile, ConfigSource, ConfigStatus, DEFAULT_CONFIG_FILE_NAME};
pub use error::ConfigError;
pub use types::{
    parent_dir, EntryId, EntryKey, ScriptConfig, ScriptEntry, ScriptKind, ScriptsDocument, Theme,
};
