//! Core navigation types and page graph assembly for menu script analysis.
//!
//! This crate defines the data model produced by scanning menu scripts for
//! page-transition functions:
//!
//! - [`NavigationPath`]: one navigation function's target page, guard
//!   conditions, and action statements.
//! - [`PathRegistry`]: paths keyed by `(source_file, function_name)` with
//!   last-write-wins replacement.
//! - [`PageNode`]: a page's own functions plus its incoming and outgoing
//!   page links.
//! - [`NavigationGraph`]: the node/edge projection of pages and paths.
//! - [`AnalysisReport`]: everything above plus widgets and summary counts.
//!
//! Graph building ([`build_pages`], [`project_graph`]) is pure and always
//! recomputes from the full registry. Validation ([`validate_report`])
//! checks the invariants of a report loaded from elsewhere.
//!
//! # Example
//!
//! ```
//! use menu_graph_core::*;
//!
//! let mut registry = PathRegistry::new();
//! registry.record(
//!     NavigationPath::new("gotoSearch", "Main")
//!         .with_target("Search")
//!         .with_condition("bOnline"),
//! );
//!
//! let units = [UnitRef::new("Main", "Main.lua"), UnitRef::new("Search", "Search.lua")];
//! let report = AnalysisReport::assemble(&units, registry, Vec::new(), "Frontend2_Level.xml");
//!
//! assert_eq!(report.find_page("Search").unwrap().incoming_paths, ["Main"]);
//! assert_eq!(report.navigation_graph.edges[0].conditions, ["bOnline"]);
//! assert!(validate_report(&report).is_empty());
//! ```

mod graph;
mod registry;
mod report;
mod types;
mod validate;

pub use graph::{UnitRef, build_pages, project_graph};
pub use registry::PathRegistry;
pub use report::PageSort;
pub use types::*;
pub use validate::{ValidationError, validate_report};
