//! Report persistence and output formatting.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use menu_graph_core::{AnalysisReport, NavigationPath, PageNode, PageSort};

use crate::error::Result;

/// Default file name of the persisted JSON report.
pub const DEFAULT_REPORT_FILE: &str = "menu_graph_report.json";

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

/// Writes `report` as pretty-printed JSON.
pub fn write_report(path: &Path, report: &AnalysisReport) -> Result<()> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    fs::write(path, json)?;
    Ok(())
}

/// Loads a report previously written by [`write_report`].
pub fn load_report(path: &Path) -> Result<AnalysisReport> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Formats a report in the requested output format.
pub fn format_report(
    report: &AnalysisReport,
    format: OutputFormat,
) -> std::result::Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(report).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(report_to_markdown(report)),
        OutputFormat::Table => Ok(report_to_table(report)),
    }
}

/// Renders one path as `Source -> Target (via function)`.
pub fn format_path_line(path: &NavigationPath) -> String {
    format!(
        "{} -> {} (via {})",
        path.source_file,
        path.target().unwrap_or("unknown"),
        path.function_name
    )
}

/// Renders the details of one page.
pub fn format_page(page: &PageNode) -> String {
    let mut out = String::new();

    out.push_str(&format!("Page: {}\n", page.name));
    out.push_str(&format!("File: {}\n", page.source_file));
    out.push_str(&format!(
        "Navigation functions: {}  Incoming: {}  Outgoing: {}\n",
        page.navigation_functions.len(),
        page.incoming_paths.len(),
        page.outgoing_paths.len()
    ));

    if !page.navigation_functions.is_empty() {
        out.push_str("\nFunctions:\n");
        for func in &page.navigation_functions {
            out.push_str(&format!(
                "  {}() -> {}\n",
                func.function_name,
                func.target().unwrap_or("unknown")
            ));
            if !func.conditions.is_empty() {
                out.push_str(&format!("    conditions: {}\n", func.conditions.join(", ")));
            }
            if !func.actions.is_empty() {
                let shown: Vec<&str> = func.actions.iter().take(3).map(String::as_str).collect();
                out.push_str(&format!("    actions: {}\n", shown.join(", ")));
            }
        }
    }

    if !page.incoming_paths.is_empty() {
        out.push_str("\nIncoming from:\n");
        for incoming in &page.incoming_paths {
            out.push_str(&format!("  {incoming}\n"));
        }
    }

    if !page.outgoing_paths.is_empty() {
        out.push_str("\nOutgoing to:\n");
        for outgoing in &page.outgoing_paths {
            out.push_str(&format!("  {outgoing}\n"));
        }
    }

    out
}

/// Renders the text flow diagram: entry points, then the ten sources with
/// the most paths and their first three transitions.
pub fn flow_diagram(report: &AnalysisReport) -> String {
    let mut out = String::new();

    out.push_str("Entry points:\n");
    let entries = report.entry_points();
    if entries.is_empty() {
        out.push_str("  (none)\n");
    }
    for page in entries.iter().take(5) {
        out.push_str(&format!("  {}\n", page.name));
    }

    out.push_str("\nMain navigation paths:\n");
    let mut by_source: BTreeMap<&str, Vec<&NavigationPath>> = BTreeMap::new();
    for path in &report.navigation_paths {
        by_source.entry(path.source_file.as_str()).or_default().push(path);
    }
    let mut sources: Vec<(&str, Vec<&NavigationPath>)> = by_source.into_iter().collect();
    sources.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(b.0)));

    for (source, paths) in sources.iter().take(10) {
        out.push_str(&format!("\n  {source}:\n"));
        for path in paths.iter().take(3) {
            out.push_str(&format!(
                "    |- {}() -> {}\n",
                path.function_name,
                path.target().unwrap_or("unknown")
            ));
        }
        if paths.len() > 3 {
            out.push_str(&format!("    `- ... and {} more\n", paths.len() - 3));
        }
    }

    out
}

fn report_to_markdown(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let summary = &report.summary;

    out.push_str("# Menu Navigation Report\n\n");
    out.push_str(&format!("- **Source units:** {}\n", summary.source_units_scanned));
    out.push_str(&format!("- **Pages:** {}\n", summary.total_pages));
    out.push_str(&format!(
        "- **Navigation functions:** {}\n",
        summary.total_navigation_functions
    ));
    out.push_str(&format!(
        "- **Widgets:** {} (from `{}`)\n",
        summary.total_widgets, summary.markup_file
    ));
    out.push_str(&format!(
        "- **Graph:** {} nodes, {} edges\n\n",
        report.navigation_graph.nodes.len(),
        report.navigation_graph.edges.len()
    ));

    if !report.navigation_paths.is_empty() {
        out.push_str("## Navigation Paths\n\n");
        out.push_str("| Source | Function | Target | Conditions | Actions |\n");
        out.push_str("|--------|----------|--------|------------|---------|\n");
        let mut paths: Vec<&NavigationPath> = report.navigation_paths.iter().collect();
        paths.sort_by(|a, b| a.source_file.cmp(&b.source_file));
        for path in paths {
            let conditions = if path.conditions.is_empty() {
                "None".to_string()
            } else {
                path.conditions.join(", ")
            };
            let mut actions = if path.actions.is_empty() {
                "None".to_string()
            } else {
                path.actions.iter().take(2).cloned().collect::<Vec<_>>().join(", ")
            };
            if path.actions.len() > 2 {
                actions.push_str("...");
            }
            out.push_str(&format!(
                "| {} | `{}` | {} | {} | {} |\n",
                path.source_file,
                path.function_name,
                path.target().unwrap_or("Unknown"),
                escape_cell(&conditions),
                escape_cell(&actions)
            ));
        }
        out.push('\n');
    }

    if !report.pages.is_empty() {
        out.push_str("## Pages\n\n");
        out.push_str("| Page | Functions | Incoming | Outgoing |\n");
        out.push_str("|------|-----------|----------|----------|\n");
        for page in report.sorted_pages(PageSort::Functions) {
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                page.name,
                page.navigation_functions.len(),
                page.incoming_paths.len(),
                page.outgoing_paths.len()
            ));
        }
        out.push('\n');
    }

    out.push_str("## Flow\n\n```text\n");
    out.push_str(&flow_diagram(report));
    out.push_str("```\n");

    out
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn report_to_table(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let summary = &report.summary;

    out.push_str(&format!(
        "Widgets: {}  Navigation functions: {}  Pages: {}  Units: {}\n",
        summary.total_widgets,
        summary.total_navigation_functions,
        summary.total_pages,
        summary.source_units_scanned
    ));

    out.push_str("\nTop pages by navigation functions:\n");
    for page in report.sorted_pages(PageSort::Functions).iter().take(5) {
        out.push_str(&format!(
            "  {}: {} functions\n",
            page.name,
            page.navigation_functions.len()
        ));
    }

    out.push_str("\nNavigation flow examples:\n");
    for path in report.navigation_paths.iter().take(5) {
        out.push_str(&format!("  {}\n", format_path_line(path)));
    }

    out.push_str("\nMost connected pages:\n");
    for page in report.most_connected(5) {
        out.push_str(&format!(
            "  {}: {} connections\n",
            page.name,
            page.connection_count()
        ));
    }

    out.push('\n');
    out.push_str(&flow_diagram(report));
    out
}

/// Renders the page listing used by `list`.
pub fn format_page_list(report: &AnalysisReport, sort: PageSort) -> String {
    let mut out = String::new();
    let pages = report.sorted_pages(sort);
    let width = pages.iter().map(|p| p.name.len()).max().unwrap_or(4).max(4);

    out.push_str(&format!("All menu pages ({} total)\n", pages.len()));
    for page in pages {
        out.push_str(&format!(
            "{:<width$} | Functions: {:>2} | In: {:>2} | Out: {:>2} | Total: {:>2}\n",
            page.name,
            page.navigation_functions.len(),
            page.incoming_paths.len(),
            page.outgoing_paths.len(),
            page.connection_count(),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_graph_core::{PathRegistry, UnitRef};

    fn sample_report() -> AnalysisReport {
        let mut registry = PathRegistry::new();
        registry.record(
            NavigationPath::new("gotoSearch", "Main")
                .with_target("Search")
                .with_condition("bOnline")
                .with_action("gA = 1")
                .with_action("gB = 2")
                .with_action("gC = a | b"),
        );
        for i in 0..4 {
            registry.record(
                NavigationPath::new(&format!("gotoSlot{i}"), "Title").with_target("Main"),
            );
        }
        registry.record(NavigationPath::new("gotoNowhere", "Search"));

        let units: Vec<UnitRef> = ["Main", "Search", "Title"]
            .iter()
            .map(|id| UnitRef::new(*id, format!("{id}.lua")))
            .collect();
        AnalysisReport::assemble(&units, registry, Vec::new(), "Frontend2_Level.xml")
    }

    #[test]
    fn test_format_report_json() {
        let json = format_report(&sample_report(), OutputFormat::Json).unwrap();
        assert!(json.contains("\"function_name\": \"gotoSearch\""));
        assert!(json.contains("\"navigation_graph\""));
    }

    #[test]
    fn test_format_report_yaml() {
        let yaml = format_report(&sample_report(), OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("function_name: gotoSearch"));
    }

    #[test]
    fn test_format_report_markdown() {
        let md = format_report(&sample_report(), OutputFormat::Markdown).unwrap();
        assert!(md.contains("# Menu Navigation Report"));
        assert!(md.contains("| Main | `gotoSearch` | Search | bOnline | gA = 1, gB = 2... |"));
        assert!(md.contains("| Search | `gotoNowhere` | Unknown | None | None |"));
        assert!(md.contains("## Flow"));
    }

    #[test]
    fn test_format_report_table() {
        let table = format_report(&sample_report(), OutputFormat::Table).unwrap();
        assert!(table.contains("Navigation functions: 6"));
        assert!(table.contains("Title: 4 functions"));
        assert!(table.contains("Main -> Search (via gotoSearch)"));
    }

    #[test]
    fn test_flow_diagram_truncates_long_sources() {
        let diagram = flow_diagram(&sample_report());
        assert!(diagram.starts_with("Entry points:\n  Title\n"));
        assert!(diagram.contains("  Title:\n    |- gotoSlot0() -> Main\n"));
        assert!(diagram.contains("... and 1 more"));
        assert!(diagram.contains("gotoNowhere() -> unknown"));
        let title = diagram.find("  Title:").unwrap();
        let main = diagram.find("  Main:").unwrap();
        assert!(title < main);
    }

    #[test]
    fn test_format_page_lists_links() {
        let report = sample_report();
        let page = format_page(report.find_page("main").unwrap());
        assert!(page.contains("Page: Main"));
        assert!(page.contains("File: Main.lua"));
        assert!(page.contains("gotoSearch() -> Search"));
        assert!(page.contains("conditions: bOnline"));
        assert!(page.contains("Incoming from:\n  Title\n"));
        assert!(page.contains("Outgoing to:\n  Search\n"));
    }

    #[test]
    fn test_format_page_list_sorts() {
        let list = format_page_list(&sample_report(), PageSort::Connections);
        let lines: Vec<&str> = list.lines().collect();
        assert_eq!(lines[0], "All menu pages (3 total)");
        assert!(lines[1].starts_with("Main "));
    }

    #[test]
    fn test_write_and_load_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_REPORT_FILE);
        let report = sample_report();

        write_report(&path, &report).unwrap();
        assert_eq!(load_report(&path).unwrap(), report);
    }
}
