//! Value types for extracted navigation facts and the page graph.
//!
//! This module defines the data model shared by the extraction pipeline and
//! every downstream consumer (report rendering, CLI queries, validation). The
//! types are plain fixed-field records designed for serialization with
//! [`serde`]; their field names are the field names of the persisted report.

use serde::{Deserialize, Serialize};

/// Node kind emitted for every page in the [`NavigationGraph`].
pub const PAGE_NODE_KIND: &str = "page";

/// One navigation function's extracted facts.
///
/// A navigation path is keyed by `(source_file, function_name)` inside a
/// [`PathRegistry`](crate::PathRegistry). `conditions` and `actions` are
/// opaque text fragments in document order; they are never interpreted.
///
/// # Examples
///
/// ```
/// use menu_graph_core::NavigationPath;
///
/// let path = NavigationPath::new("gotoSearch", "Main")
///     .with_target("Search")
///     .with_condition("bOnline");
/// assert_eq!(path.target_page.as_deref(), Some("Search"));
/// assert_eq!(path.key(), ("Main", "gotoSearch"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationPath {
    /// Identifier of the navigation function (e.g. `gotoSearch`).
    pub function_name: String,
    /// Identifier of the source unit (file stem) defining the function.
    pub source_file: String,
    /// First transition target found in the body, if any.
    pub target_page: Option<String>,
    /// Guard expressions found in the body.
    pub conditions: Vec<String>,
    /// Non-control statements found in the body.
    pub actions: Vec<String>,
}

impl NavigationPath {
    /// Creates a path with no target, conditions, or actions.
    pub fn new(function_name: &str, source_file: &str) -> Self {
        Self {
            function_name: function_name.to_string(),
            source_file: source_file.to_string(),
            target_page: None,
            conditions: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Sets the target page.
    pub fn with_target(mut self, target: &str) -> Self {
        self.target_page = Some(target.to_string());
        self
    }

    /// Appends a guard condition.
    pub fn with_condition(mut self, condition: &str) -> Self {
        self.conditions.push(condition.to_string());
        self
    }

    /// Appends an action statement.
    pub fn with_action(mut self, action: &str) -> Self {
        self.actions.push(action.to_string());
        self
    }

    /// Returns the registry key `(source_file, function_name)`.
    pub fn key(&self) -> (&str, &str) {
        (&self.source_file, &self.function_name)
    }

    /// Returns the target page when it is present and non-empty.
    ///
    /// Only paths with a non-empty target produce graph edges and outgoing
    /// links.
    pub fn target(&self) -> Option<&str> {
        self.target_page.as_deref().filter(|t| !t.is_empty())
    }
}

/// Aggregated navigation state of one page.
///
/// Every source unit is a page, whether or not it defines navigation
/// functions. `incoming_paths` and `outgoing_paths` are duplicate-free and
/// sorted; a page lists itself only when it has a genuine self-transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageNode {
    /// Page identifier (the source unit's file stem).
    pub name: String,
    /// File name of the source unit (e.g. `Main.lua`).
    pub source_file: String,
    /// Paths defined by this page, in registry order.
    pub navigation_functions: Vec<NavigationPath>,
    /// Pages that have at least one path targeting this page.
    pub incoming_paths: Vec<String>,
    /// Distinct non-empty targets of this page's own paths.
    pub outgoing_paths: Vec<String>,
}

impl PageNode {
    /// Total number of distinct incoming and outgoing page links.
    pub fn connection_count(&self) -> usize {
        self.incoming_paths.len() + self.outgoing_paths.len()
    }
}

/// Node entry of the [`NavigationGraph`] projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    /// Always [`PAGE_NODE_KIND`]. Serialized as `type`.
    #[serde(rename = "type")]
    pub kind: String,
    pub function_count: usize,
    pub incoming_count: usize,
    pub outgoing_count: usize,
}

/// Edge entry of the [`NavigationGraph`] projection.
///
/// One edge exists per navigation path with a non-empty target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    /// Name of the navigation function producing the edge.
    pub label: String,
    pub conditions: Vec<String>,
    pub actions: Vec<String>,
}

/// Read-only node/edge view over pages and navigation paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// A UI widget recovered from the markup file.
///
/// Widgets are reported next to the graph; the extraction core never reads
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetRecord {
    pub id: String,
    pub name: String,
    pub object_type: String,
    /// Attribute name mapped to `"<type>: item, item"`.
    pub attributes: std::collections::BTreeMap<String, String>,
    /// Event-handler references (null pointers excluded).
    pub event_handlers: Vec<String>,
}

/// Summary counts for one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_widgets: usize,
    pub total_navigation_functions: usize,
    pub total_pages: usize,
    /// File name of the widget markup file that was looked up.
    pub markup_file: String,
    pub source_units_scanned: usize,
}

/// Complete result of one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: ReportSummary,
    pub widgets: Vec<WidgetRecord>,
    pub navigation_paths: Vec<NavigationPath>,
    pub pages: Vec<PageNode>,
    pub navigation_graph: NavigationGraph,
}
