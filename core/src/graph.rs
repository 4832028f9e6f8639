//! Page graph assembly.
//!
//! [`build_pages`] folds the registry into one [`PageNode`] per source unit;
//! [`project_graph`] turns pages and paths into the node/edge view. Both are
//! pure and rebuild everything from their inputs.

use std::collections::BTreeSet;

use crate::{GraphEdge, GraphNode, NavigationGraph, NavigationPath, PAGE_NODE_KIND, PageNode};

/// A source unit as seen by the graph builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitRef {
    /// Unit identifier (file stem), used as the page name.
    pub id: String,
    /// File name the unit was read from.
    pub file_name: String,
}

impl UnitRef {
    pub fn new(id: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
        }
    }
}

/// Builds one page per unit, in unit order.
///
/// Units with no navigation functions still produce a page. Repeated unit
/// ids are collapsed onto their first occurrence.
///
/// # Examples
///
/// ```
/// use menu_graph_core::{NavigationPath, UnitRef, build_pages};
///
/// let units = [UnitRef::new("Main", "Main.lua"), UnitRef::new("Search", "Search.lua")];
/// let paths = [NavigationPath::new("gotoSearch", "Main").with_target("Search")];
///
/// let pages = build_pages(&units, &paths);
/// assert_eq!(pages.len(), 2);
/// assert_eq!(pages[0].outgoing_paths, ["Search"]);
/// assert_eq!(pages[1].incoming_paths, ["Main"]);
/// assert!(pages[1].navigation_functions.is_empty());
/// ```
pub fn build_pages(units: &[UnitRef], paths: &[NavigationPath]) -> Vec<PageNode> {
    let mut seen = BTreeSet::new();
    units
        .iter()
        .filter(|unit| seen.insert(unit.id.as_str()))
        .map(|unit| build_page(unit, paths))
        .collect()
}

fn build_page(unit: &UnitRef, paths: &[NavigationPath]) -> PageNode {
    let navigation_functions: Vec<NavigationPath> = paths
        .iter()
        .filter(|path| path.source_file == unit.id)
        .cloned()
        .collect();

    let outgoing: BTreeSet<&str> = navigation_functions
        .iter()
        .filter_map(NavigationPath::target)
        .collect();
    let incoming: BTreeSet<&str> = paths
        .iter()
        .filter(|path| path.target() == Some(unit.id.as_str()))
        .map(|path| path.source_file.as_str())
        .collect();

    PageNode {
        name: unit.id.clone(),
        source_file: unit.file_name.clone(),
        outgoing_paths: outgoing.into_iter().map(String::from).collect(),
        incoming_paths: incoming.into_iter().map(String::from).collect(),
        navigation_functions,
    }
}

/// Projects pages and paths into a [`NavigationGraph`].
///
/// Emits one node per page and one edge per path with a non-empty target,
/// in registry order.
pub fn project_graph(pages: &[PageNode], paths: &[NavigationPath]) -> NavigationGraph {
    let nodes = pages
        .iter()
        .map(|page| GraphNode {
            id: page.name.clone(),
            label: page.name.clone(),
            kind: PAGE_NODE_KIND.to_string(),
            function_count: page.navigation_functions.len(),
            incoming_count: page.incoming_paths.len(),
            outgoing_count: page.outgoing_paths.len(),
        })
        .collect();

    let edges = paths
        .iter()
        .filter_map(|path| {
            path.target().map(|target| GraphEdge {
                source: path.source_file.clone(),
                target: target.to_string(),
                label: path.function_name.clone(),
                conditions: path.conditions.clone(),
                actions: path.actions.clone(),
            })
        })
        .collect();

    NavigationGraph { nodes, edges }
}
