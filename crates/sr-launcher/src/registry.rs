//! Script registry.
//!
//! [`ScriptRegistry`] owns the catalog of launchable scripts. The catalog
//! order is the recency order: a successfully executed entry moves to the
//! front, and reloads keep unchanged entries where they are.
//!
//! # Reconciliation
//!
//! [`ScriptRegistry::reload`] compares the current catalog with a fresh
//! configuration snapshot by [equivalence](sr_core::EntryKey):
//!
//! 1. entries no longer equivalent to any record are removed, survivors keep
//!    their relative order and identity;
//! 2. records not equivalent to any current entry are appended in
//!    configuration order.
//!
//! Both differences are computed with hash sets over borrowed keys.
//!
//! # Example
//!
//! ```
//! use sr_core::ScriptConfig;
//! use sr_launcher::ScriptRegistry;
//!
//! let mut registry = ScriptRegistry::new();
//! registry.reload(vec![
//!     ScriptConfig::new("build", "/repo/build.sh"),
//!     ScriptConfig::new("deploy", "/repo/deploy.sh"),
//! ]);
//!
//! let hits = registry.search("DEP");
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].name, "deploy");
//! assert_eq!(hits[0].rank, 2);
//! ```

use rustc_hash::FxHashSet;
use serde::Serialize;
use sr_core::{ConfigSource, EntryId, EntryKey, ScriptConfig, ScriptEntry, Theme};
use tracing::debug;

use crate::classify;

/// Outcome of a [`ScriptRegistry::reload`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReloadSummary {
    /// Entries appended from the new snapshot.
    pub added: usize,
    /// Entries dropped because they no longer appear in the snapshot.
    pub removed: usize,
    /// Entries kept with their identity and position.
    pub retained: usize,
}

impl ReloadSummary {
    /// Returns `true` if the catalog changed.
    #[inline]
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.added > 0 || self.removed > 0
    }
}

/// Ordered catalog of launchable scripts.
#[derive(Debug, Clone, Default)]
pub struct ScriptRegistry {
    entries: Vec<ScriptEntry>,
    theme: Theme,
    next_id: u64,
}

impl ScriptRegistry {
    /// Creates an empty registry using the default theme.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry using the given theme for icons.
    #[must_use]
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    /// Reconciles the catalog against a fresh configuration snapshot.
    pub fn reload<I>(&mut self, configs: I) -> ReloadSummary
    where
        I: IntoIterator<Item = ScriptConfig>,
    {
        let icon_path = self.theme.script_icon();
        let mapped: Vec<ScriptEntry> = configs
            .into_iter()
            .map(|config| {
                let kind = classify(&config.script_path, config.interpreter.as_deref());
                ScriptEntry::from_config(EntryId::new(0), &config, kind, icon_path)
            })
            .collect();

        let stale: Vec<bool> = {
            let incoming: FxHashSet<EntryKey<'_>> = mapped.iter().map(ScriptEntry::key).collect();
            self.entries
                .iter()
                .map(|entry| !incoming.contains(&entry.key()))
                .collect()
        };

        let fresh: Vec<ScriptEntry> = {
            let current: FxHashSet<EntryKey<'_>> =
                self.entries.iter().map(ScriptEntry::key).collect();
            mapped
                .into_iter()
                .filter(|entry| !current.contains(&entry.key()))
                .collect()
        };

        let removed = stale.iter().filter(|is_stale| **is_stale).count();
        let mut stale_flags = stale.into_iter();
        self.entries
            .retain(|_| !stale_flags.next().unwrap_or(false));

        let summary = ReloadSummary {
            added: fresh.len(),
            removed,
            retained: self.entries.len(),
        };

        for mut entry in fresh {
            entry.id = self.allocate_id();
            self.entries.push(entry);
        }

        debug!(
            added = summary.added,
            removed = summary.removed,
            retained = summary.retained,
            "Reloaded script registry"
        );

        summary
    }

    /// Reconciles the catalog against the records of a [`ConfigSource`].
    pub fn reload_from<S>(&mut self, source: &S) -> ReloadSummary
    where
        S: ConfigSource + ?Sized,
    {
        self.reload(source.script_configs())
    }

    /// Returns the entries matching `query`, in catalog order.
    ///
    /// A blank query matches everything. Otherwise an entry matches when its
    /// name contains the query, ignoring case. Every catalog entry is stamped
    /// with `rank = len + 1 - position`, so ranks are comparable across
    /// queries.
    pub fn search(&mut self, query: &str) -> Vec<ScriptEntry> {
        let total = self.entries.len();
        for (index, entry) in self.entries.iter_mut().enumerate() {
            entry.rank = total + 1 - index;
        }

        if query.trim().is_empty() {
            return self.entries.clone();
        }

        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Moves the entry with the given identity to the front.
    ///
    /// Returns `false` if the entry is no longer in the catalog.
    pub fn notify_selected(&mut self, id: EntryId) -> bool {
        let Some(index) = self.entries.iter().position(|entry| entry.id == id) else {
            debug!(id = %id, "Selected entry is no longer registered");
            return false;
        };

        let entry = self.entries.remove(index);
        self.entries.insert(0, entry);
        true
    }

    /// Switches the icon theme for held and future entries.
    pub fn update_icon_path(&mut self, theme: Theme) {
        self.theme = theme;
        let icon_path = theme.script_icon();
        for entry in &mut self.entries {
            icon_path.clone_into(&mut entry.icon_path);
        }
    }

    /// Returns the catalog in recency order.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[ScriptEntry] {
        &self.entries
    }

    /// Looks up an entry by identity.
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&ScriptEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Active theme.
    #[inline]
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Icon path assigned to entries under the active theme.
    #[inline]
    #[must_use]
    pub const fn icon_path(&self) -> &'static str {
        self.theme.script_icon()
    }

    fn allocate_id(&mut self) -> EntryId {
        self.next_id += 1;
        EntryId::new(self.next_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sr_core::ScriptKind;

    fn config(name: &str) -> ScriptConfig {
        ScriptConfig::new(name, format!("/scripts/{name}.sh"))
    }

    fn names(entries: &[ScriptEntry]) -> Vec<&str> {
        entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    #[test]
    fn test_initial_reload() {
        let mut registry = ScriptRegistry::new();
        let summary = registry.reload(vec![
            ScriptConfig::new("name1", "path1")
                .with_working_directory("dir1")
                .with_arguments("args1")
                .with_interpreter("interpreter1"),
        ]);

        assert_eq!(summary.added, 1);
        let scripts = registry.search("");
        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0].kind, ScriptKind::Interpreter);
        assert_eq!(scripts[0].custom_interpreter, "interpreter1");
    }

    #[test]
    fn test_reload_is_idempotent() {
        let configs = vec![config("a"), config("b"), config("c")];
        let mut registry = ScriptRegistry::new();

        registry.reload(configs.clone());
        let first = registry.entries().to_vec();
        let summary = registry.reload(configs);

        assert!(!summary.has_changes());
        assert_eq!(summary.retained, 3);
        assert_eq!(registry.entries(), first.as_slice());
    }

    #[test]
    fn test_reload_preserves_recency_and_identity() {
        let mut registry = ScriptRegistry::new();
        registry.reload(vec![config("a"), config("b"), config("c")]);

        let b_id = registry.entries()[1].id;
        assert!(registry.notify_selected(b_id));
        assert_eq!(names(registry.entries()), ["b", "a", "c"]);

        let summary = registry.reload(vec![config("new"), config("a"), config("b")]);
        assert_eq!(summary, ReloadSummary { added: 1, removed: 1, retained: 2 });
        assert_eq!(names(registry.entries()), ["b", "a", "new"]);
        assert_eq!(registry.entries()[0].id, b_id);
    }

    #[test]
    fn test_changed_config_moves_to_end() {
        let mut registry = ScriptRegistry::new();
        registry.reload(vec![config("a"), config("b")]);
        let old_a = registry.entries()[0].id;

        registry.reload(vec![config("a").with_arguments("--verbose"), config("b")]);

        assert_eq!(names(registry.entries()), ["b", "a"]);
        assert_eq!(registry.entries()[1].arguments, "--verbose");
        assert_ne!(registry.entries()[1].id, old_a);
    }

    #[test]
    fn test_reload_to_empty_clears_catalog() {
        let mut registry = ScriptRegistry::new();
        registry.reload(vec![config("a")]);
        let summary = registry.reload(Vec::new());
        assert_eq!(summary.removed, 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_reload_from_config_source() {
        let mut registry = ScriptRegistry::new();
        let source = vec![config("a"), config("b")];
        registry.reload_from(&source);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_search_empty_returns_everything_ranked() {
        let mut registry = ScriptRegistry::new();
        registry.reload(vec![config("a"), config("b"), config("c")]);

        let hits = registry.search("   ");
        assert_eq!(names(&hits), ["a", "b", "c"]);
        let ranks: Vec<_> = hits.iter().map(|entry| entry.rank).collect();
        assert_eq!(ranks, [4, 3, 2]);
    }

    #[test]
    fn test_search_filters_case_insensitively_with_full_catalog_ranks() {
        let mut registry = ScriptRegistry::new();
        registry.reload(vec![
            config("Backup"),
            config("build-all"),
            config("deploy"),
            config("Rebuild"),
        ]);

        let hits = registry.search("BUI");
        assert_eq!(names(&hits), ["build-all", "Rebuild"]);
        let ranks: Vec<_> = hits.iter().map(|entry| entry.rank).collect();
        assert_eq!(ranks, [4, 2]);
    }

    #[test]
    fn test_search_is_sound_and_complete() {
        let mut registry = ScriptRegistry::new();
        registry.reload(
            ["alpha", "ALPINE", "beta", "Gamma", "alp", "delta"]
                .into_iter()
                .map(config),
        );

        for query in ["al", "A", "ta", "zzz", "ALP"] {
            let hits = registry.search(query);
            let needle = query.to_lowercase();
            assert!(hits.iter().all(|hit| hit.name.to_lowercase().contains(&needle)));
            let expected = registry
                .entries()
                .iter()
                .filter(|entry| entry.name.to_lowercase().contains(&needle))
                .count();
            assert_eq!(hits.len(), expected, "query {query}");
        }
    }

    #[test]
    fn test_search_does_not_reorder_catalog() {
        let mut registry = ScriptRegistry::new();
        registry.reload(vec![config("a"), config("b")]);
        let before = names(registry.entries()).join(",");
        registry.search("b");
        assert_eq!(names(registry.entries()).join(","), before);
    }

    #[test]
    fn test_notify_selected_unknown_is_noop() {
        let mut registry = ScriptRegistry::new();
        registry.reload(vec![config("a"), config("b")]);
        assert!(!registry.notify_selected(EntryId::new(999)));
        assert_eq!(names(registry.entries()), ["a", "b"]);
    }

    #[test]
    fn test_notify_selected_promotes_to_first_rank() {
        let mut registry = ScriptRegistry::new();
        registry.reload(vec![config("a"), config("b"), config("c")]);
        let c_id = registry.entries()[2].id;

        registry.notify_selected(c_id);

        let hits = registry.search("");
        assert_eq!(hits[0].id, c_id);
        assert_eq!(hits[0].rank, 4);
    }

    #[test]
    fn test_update_icon_path_rewrites_entries() {
        let mut registry = ScriptRegistry::with_theme(Theme::Light);
        registry.reload(vec![config("a")]);
        assert_eq!(registry.entries()[0].icon_path, "Images/Script.light.png");

        registry.update_icon_path(Theme::HighContrastBlack);
        assert_eq!(registry.icon_path(), "Images/Script.dark.png");
        assert_eq!(registry.search("")[0].icon_path, "Images/Script.dark.png");

        let summary = registry.reload(vec![config("a")]);
        assert!(!summary.has_changes());
    }

    #[test]
    fn test_duplicate_records_are_both_added() {
        let mut registry = ScriptRegistry::new();
        registry.reload(vec![config("a"), config("a")]);
        assert_eq!(registry.len(), 2);
        assert_ne!(registry.entries()[0].id, registry.entries()[1].id);

        let summary = registry.reload(vec![config("a"), config("a")]);
        assert!(!summary.has_changes());
    }

    #[test]
    fn test_get_by_id() {
        let mut registry = ScriptRegistry::new();
        registry.reload(vec![config("a")]);
        let id = registry.entries()[0].id;
        assert_eq!(registry.get(id).map(|entry| entry.name.as_str()), Some("a"));
        assert!(registry.get(EntryId::new(0)).is_none());
    }

    #[test]
    fn test_reload_summary_serialization() {
        let summary = ReloadSummary { added: 2, removed: 1, retained: 3 };
        insta::assert_snapshot!(
            serde_json::to_string(&summary).unwrap(),
            @r#"{"added":2,"removed":1,"retained":3}"#
        );
    }
}
