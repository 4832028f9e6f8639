//! Report validation.
//!
//! Checks the structural invariants of an [`AnalysisReport`]: one page per
//! unit, duplicate-free link lists, and edges that leave from a known page.
//! Reports loaded from disk may have been edited by hand, so these are
//! surfaced as a list of errors instead of panics.
//!
//! # Examples
//!
//! ```
//! use menu_graph_core::*;
//!
//! let units = [UnitRef::new("Main", "Main.lua")];
//! let report = AnalysisReport::assemble(&units, PathRegistry::new(), Vec::new(), "menu.xml");
//! assert!(validate_report(&report).is_empty());
//!
//! let mut bad = report.clone();
//! bad.pages.push(bad.pages[0].clone());
//! assert!(!validate_report(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{AnalysisReport, PageNode};

/// Report validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Page name is empty or whitespace-only.
    #[error("page name cannot be empty")]
    EmptyPageName,
    /// Two pages share a name.
    #[error("duplicate page: {0}")]
    DuplicatePage(String),
    /// A page lists the same incoming page twice.
    #[error("duplicate incoming path on page {page}: {other}")]
    DuplicateIncoming { page: String, other: String },
    /// A page lists the same outgoing page twice.
    #[error("duplicate outgoing path on page {page}: {other}")]
    DuplicateOutgoing { page: String, other: String },
    /// A navigation function is listed under a page it does not belong to.
    #[error("function {function} listed on page {page} belongs to {source_file}")]
    MisplacedFunction {
        page: String,
        function: String,
        source_file: String,
    },
    /// A graph edge starts at a page that does not exist.
    #[error("edge {label} starts at unknown page {source_page}")]
    UnknownEdgeSource { label: String, source_page: String },
}

/// Validates a full report, returning every problem found.
pub fn validate_report(report: &AnalysisReport) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen_pages: HashSet<&str> = HashSet::new();

    for page in &report.pages {
        if page.name.trim().is_empty() {
            errors.push(ValidationError::EmptyPageName);
            continue;
        }
        if !seen_pages.insert(page.name.as_str()) {
            errors.push(ValidationError::DuplicatePage(page.name.clone()));
            continue;
        }
        errors.extend(validate_page(page));
    }

    for edge in &report.navigation_graph.edges {
        if !seen_pages.contains(edge.source.as_str()) {
            errors.push(ValidationError::UnknownEdgeSource {
                label: edge.label.clone(),
                source_page: edge.source.clone(),
            });
        }
    }

    errors
}

fn validate_page(page: &PageNode) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut incoming = HashSet::new();
    for other in &page.incoming_paths {
        if !incoming.insert(other) {
            errors.push(ValidationError::DuplicateIncoming {
                page: page.name.clone(),
                other: other.clone(),
            });
        }
    }

    let mut outgoing = HashSet::new();
    for other in &page.outgoing_paths {
        if !outgoing.insert(other) {
            errors.push(ValidationError::DuplicateOutgoing {
                page: page.name.clone(),
                other: other.clone(),
            });
        }
    }

    for function in &page.navigation_functions {
        if function.source_file != page.name {
            errors.push(ValidationError::MisplacedFunction {
                page: page.name.clone(),
                function: function.function_name.clone(),
                source_file: function.source_file.clone(),
            });
        }
    }

    errors
}
