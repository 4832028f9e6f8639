//! Keyed store of extracted navigation paths.

use std::collections::HashMap;

use crate::NavigationPath;

/// Registry of [`NavigationPath`] records keyed by `(source_file, function_name)`.
///
/// Recording a path under an existing key replaces the stored value silently
/// (last write wins) while keeping the slot of the first registration, so
/// [`all`](PathRegistry::all) iterates in first-registration order.
///
/// # Examples
///
/// ```
/// use menu_graph_core::{NavigationPath, PathRegistry};
///
/// let mut registry = PathRegistry::new();
/// registry.record(NavigationPath::new("gotoSearch", "Main").with_target("Search"));
/// registry.record(NavigationPath::new("gotoOptions", "Main").with_target("Options"));
/// registry.record(NavigationPath::new("gotoSearch", "Main").with_target("Lobby"));
///
/// let targets: Vec<_> = registry.all().filter_map(|p| p.target()).collect();
/// assert_eq!(targets, ["Lobby", "Options"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathRegistry {
    entries: Vec<NavigationPath>,
    index: HashMap<(String, String), usize>,
}

impl PathRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `path`, replacing any entry with the same key in place.
    pub fn record(&mut self, path: NavigationPath) {
        let key = (path.source_file.clone(), path.function_name.clone());
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot] = path,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(path);
            }
        }
    }

    /// Looks up the path registered for `(source_file, function_name)`.
    pub fn get(&self, source_file: &str, function_name: &str) -> Option<&NavigationPath> {
        self.index
            .get(&(source_file.to_string(), function_name.to_string()))
            .map(|&slot| &self.entries[slot])
    }

    /// Iterates all current entries in first-registration order.
    pub fn all(&self) -> impl Iterator<Item = &NavigationPath> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the registry, returning entries in first-registration order.
    pub fn into_paths(self) -> Vec<NavigationPath> {
        self.entries
    }
}
