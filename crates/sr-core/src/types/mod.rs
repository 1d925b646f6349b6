//! Domain types for the script-runner launcher.
//!
//! # Module Organization
//!
//! - [`script`] - Raw script configuration records as read from storage
//! - [`kind`] - How a script is launched
//! - [`entry`] - Catalog entries derived from configuration records
//! - [`theme`] - UI theme and the icon paths it selects
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use sr_core::{ScriptConfig, ScriptEntry, ScriptKind, Theme};
//! ```

pub mod entry;
pub mod kind;
pub mod script;
pub mod theme;

pub use entry::{parent_dir, EntryId, EntryKey, ScriptEntry};
pub use kind::ScriptKind;
pub use script::{ScriptConfig, ScriptsDocument};
pub use theme::Theme;
