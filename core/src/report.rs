//! Report assembly and read-side queries.

use std::collections::BTreeSet;

use crate::graph::{UnitRef, build_pages, project_graph};
use crate::{AnalysisReport, NavigationPath, PageNode, PathRegistry, ReportSummary, WidgetRecord};

/// Ordering used when listing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSort {
    /// Ascending by page name.
    #[default]
    Name,
    /// Descending by number of navigation functions.
    Functions,
    /// Descending by incoming plus outgoing links.
    Connections,
}

impl AnalysisReport {
    /// Builds the full report from the scanned units and the final registry.
    ///
    /// Pages and graph are computed from scratch; nothing is carried over
    /// from earlier runs.
    ///
    /// # Examples
    ///
    /// ```
    /// use menu_graph_core::{AnalysisReport, NavigationPath, PathRegistry, UnitRef};
    ///
    /// let mut registry = PathRegistry::new();
    /// registry.record(NavigationPath::new("gotoSearch", "Main").with_target("Search"));
    ///
    /// let units = [UnitRef::new("Main", "Main.lua"), UnitRef::new("Search", "Search.lua")];
    /// let report = AnalysisReport::assemble(&units, registry, Vec::new(), "Frontend2_Level.xml");
    ///
    /// assert_eq!(report.summary.total_pages, 2);
    /// assert_eq!(report.summary.total_navigation_functions, 1);
    /// assert_eq!(report.navigation_graph.edges.len(), 1);
    /// ```
    pub fn assemble(
        units: &[UnitRef],
        registry: PathRegistry,
        widgets: Vec<WidgetRecord>,
        markup_file: &str,
    ) -> Self {
        let navigation_paths = registry.into_paths();
        let pages = build_pages(units, &navigation_paths);
        let navigation_graph = project_graph(&pages, &navigation_paths);

        Self {
            summary: ReportSummary {
                total_widgets: widgets.len(),
                total_navigation_functions: navigation_paths.len(),
                total_pages: pages.len(),
                markup_file: markup_file.to_string(),
                source_units_scanned: units.len(),
            },
            widgets,
            navigation_paths,
            pages,
            navigation_graph,
        }
    }

    /// Finds a page by name, ignoring ASCII case.
    pub fn find_page(&self, name: &str) -> Option<&PageNode> {
        self.pages
            .iter()
            .find(|page| page.name.eq_ignore_ascii_case(name))
    }

    /// Returns paths whose function name, source file, or target contains
    /// `pattern`, ignoring case.
    pub fn search_paths(&self, pattern: &str) -> Vec<&NavigationPath> {
        let pattern = pattern.to_lowercase();
        self.navigation_paths
            .iter()
            .filter(|path| {
                path.function_name.to_lowercase().contains(&pattern)
                    || path.source_file.to_lowercase().contains(&pattern)
                    || path
                        .target_page
                        .as_deref()
                        .is_some_and(|t| t.to_lowercase().contains(&pattern))
            })
            .collect()
    }

    /// Returns pages in the requested order; ties are broken by name.
    pub fn sorted_pages(&self, sort: PageSort) -> Vec<&PageNode> {
        let mut pages: Vec<&PageNode> = self.pages.iter().collect();
        match sort {
            PageSort::Name => pages.sort_by(|a, b| a.name.cmp(&b.name)),
            PageSort::Functions => pages.sort_by(|a, b| {
                b.navigation_functions
                    .len()
                    .cmp(&a.navigation_functions.len())
                    .then_with(|| a.name.cmp(&b.name))
            }),
            PageSort::Connections => pages.sort_by(|a, b| {
                b.connection_count()
                    .cmp(&a.connection_count())
                    .then_with(|| a.name.cmp(&b.name))
            }),
        }
        pages
    }

    /// Returns the `limit` pages with the most connections.
    pub fn most_connected(&self, limit: usize) -> Vec<&PageNode> {
        let mut pages = self.sorted_pages(PageSort::Connections);
        pages.truncate(limit);
        pages
    }

    /// Pages that define navigation functions but are never targeted.
    pub fn entry_points(&self) -> Vec<&PageNode> {
        let targets: BTreeSet<&str> = self
            .navigation_paths
            .iter()
            .filter_map(NavigationPath::target)
            .collect();
        self.pages
            .iter()
            .filter(|page| {
                !page.navigation_functions.is_empty() && !targets.contains(page.name.as_str())
            })
            .collect()
    }

    /// Distinct targets that do not name any scanned page, sorted.
    pub fn dangling_targets(&self) -> Vec<&str> {
        let pages: BTreeSet<&str> = self.pages.iter().map(|p| p.name.as_str()).collect();
        self.navigation_paths
            .iter()
            .filter_map(NavigationPath::target)
            .filter(|target| !pages.contains(target))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
