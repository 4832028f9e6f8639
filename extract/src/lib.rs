//! Heuristic extraction of menu navigation graphs from script sources.
//!
//! The pipeline works on plain text with line and pattern heuristics, not a
//! grammar:
//!
//! 1. [`locate_functions`] finds `function tableData.<name with goto>()`
//!    definitions in a source unit.
//! 2. [`delimit_body`] recovers the body up to the first non-comment line
//!    containing `end` (as a substring, or as a whole word under
//!    [`KeywordMatch::WholeWord`]).
//! 3. A [`FactExtractor`] (by default [`PatternExtractor`]) pulls out the
//!    target page, guard conditions, and action statements.
//! 4. [`Analyzer`] records the facts in a
//!    [`PathRegistry`](menu_graph_core::PathRegistry) and, once every unit
//!    is scanned, assembles pages and graph into an
//!    [`AnalysisReport`](menu_graph_core::AnalysisReport).
//!
//! Widgets from the level markup file ([`scan_widgets`]) are carried in the
//! report next to the graph; they are not an input to extraction.
//!
//! # Example
//!
//! ```
//! use menu_graph_extract::{Analyzer, AnalyzerConfig};
//!
//! let main = "\
//! function tableData.gotoSearch()
//!   if bOnline then
//!     PushPageStack(\"Search\")
//!   end
//! end
//! ";
//!
//! let mut analyzer = Analyzer::new(AnalyzerConfig::default());
//! analyzer.scan_unit("Main", "Main.lua", main);
//! analyzer.scan_unit("Search", "Search.lua", "");
//! let report = analyzer.finish();
//!
//! let search = report.find_page("Search").unwrap();
//! assert_eq!(search.incoming_paths, ["Main"]);
//! assert_eq!(report.navigation_paths[0].conditions, ["bOnline"]);
//! ```

pub mod analyzer;
pub mod body;
pub mod config;
pub mod error;
pub mod facts;
pub mod locator;
pub mod output;
pub mod rules;
pub mod widgets;

pub use analyzer::{Analyzer, analyze_directory, collect_source_paths};
pub use body::{FunctionBody, delimit_body, delimit_body_with};
pub use config::AnalyzerConfig;
pub use error::{ExtractError, Result};
pub use facts::{ExtractedFacts, FactExtractor, PatternExtractor};
pub use locator::{FunctionMatch, locate_functions};
pub use rules::KeywordMatch;
pub use widgets::{scan_markup_file, scan_widgets};
