//! Corpus scanning pipeline.
//!
//! An [`Analyzer`] owns the state of one run: the path registry, the list of
//! scanned units, and the widgets. Units are scanned one at a time; the page
//! graph is built only once, in [`Analyzer::finish`], after every unit has
//! been recorded.

use std::fs;
use std::path::{Path, PathBuf};

use menu_graph_core::{AnalysisReport, NavigationPath, PathRegistry, UnitRef, WidgetRecord};
use tracing::{debug, info, warn};

use crate::body::delimit_body_with;
use crate::config::AnalyzerConfig;
use crate::error::{ExtractError, Result};
use crate::facts::{FactExtractor, PatternExtractor};
use crate::locator::locate_functions;
use crate::widgets::scan_markup_file;

/// Extracts navigation paths from source units and assembles the report.
///
/// # Examples
///
/// ```
/// use menu_graph_extract::{Analyzer, AnalyzerConfig};
///
/// let mut analyzer = Analyzer::new(AnalyzerConfig::default());
/// analyzer.scan_unit("Main", "Main.lua", "function tableData.gotoSearch()\n  PushPageStack(\"Search\")\nend\n");
/// analyzer.scan_unit("Search", "Search.lua", "-- no navigation here\n");
///
/// let report = analyzer.finish();
/// assert_eq!(report.pages.len(), 2);
/// assert_eq!(report.navigation_graph.edges[0].target, "Search");
/// ```
pub struct Analyzer {
    config: AnalyzerConfig,
    extractor: Box<dyn FactExtractor>,
    registry: PathRegistry,
    units: Vec<UnitRef>,
    widgets: Vec<WidgetRecord>,
}

impl Analyzer {
    /// Creates an analyzer using a [`PatternExtractor`] with the configured
    /// keyword matching.
    pub fn new(config: AnalyzerConfig) -> Self {
        let extractor = PatternExtractor::new(config.keyword_match);
        Self::with_extractor(config, Box::new(extractor))
    }

    /// Creates an analyzer using an alternative fact extractor.
    pub fn with_extractor(config: AnalyzerConfig, extractor: Box<dyn FactExtractor>) -> Self {
        Self {
            config,
            extractor,
            registry: PathRegistry::new(),
            units: Vec::new(),
            widgets: Vec::new(),
        }
    }

    pub fn registry(&self) -> &PathRegistry {
        &self.registry
    }

    /// Scans every source unit directly inside `dir`, in file-name order.
    ///
    /// A missing directory is logged and contributes no units. A unit that
    /// cannot be read is logged and still becomes a page. Returns the number
    /// of units scanned.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`](ExtractError::InvalidInput) when `dir` is not
    /// a directory, or [`Io`](ExtractError::Io) when it cannot be listed.
    pub fn scan_directory(&mut self, dir: &Path) -> Result<usize> {
        if !dir.exists() {
            warn!(path = %dir.display(), "Corpus directory not found; no units scanned");
            return Ok(0);
        }
        if !dir.is_dir() {
            return Err(ExtractError::InvalidInput(format!(
                "corpus path '{}' is not a directory",
                dir.display()
            )));
        }

        let paths = collect_source_paths(dir, &self.config)?;
        for path in &paths {
            self.scan_file(path);
        }
        Ok(paths.len())
    }

    /// Reads and scans one source file; the unit id is the file stem.
    ///
    /// Returns `false` when the file could not be read. The unit is then
    /// registered with no functions.
    pub fn scan_file(&mut self, path: &Path) -> bool {
        let unit_id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        match fs::read(path) {
            Ok(bytes) => {
                self.scan_unit(&unit_id, &file_name, &String::from_utf8_lossy(&bytes));
                true
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Failed to read source unit");
                self.scan_unit(&unit_id, &file_name, "");
                false
            }
        }
    }

    /// Extracts every navigation function of one unit into the registry.
    ///
    /// Re-scanning a unit replaces its paths key by key and keeps the unit's
    /// original position in the page list.
    pub fn scan_unit(&mut self, unit_id: &str, file_name: &str, text: &str) {
        if !self.units.iter().any(|unit| unit.id == unit_id) {
            self.units.push(UnitRef::new(unit_id, file_name));
        }

        let mut found = 0usize;
        for found_fn in locate_functions(unit_id, text) {
            let body = delimit_body_with(&text[found_fn.body_start..], self.config.keyword_match);
            if !body.terminated {
                debug!(unit = unit_id, function = found_fn.name, "Function body runs to end of unit");
            }
            let facts = self.extractor.extract(&body);
            self.registry.record(NavigationPath {
                function_name: found_fn.name.to_string(),
                source_file: found_fn.unit.to_string(),
                target_page: facts.target_page,
                conditions: facts.conditions,
                actions: facts.actions,
            });
            found += 1;
        }
        debug!(unit = unit_id, functions = found, "Scanned source unit");
    }

    /// Scans the configured markup file inside `dir` for widgets.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](ExtractError::Io) when the markup file exists but
    /// cannot be read. A missing file is not an error.
    pub fn scan_markup(&mut self, dir: &Path) -> Result<usize> {
        let path = dir.join(&self.config.markup_file);
        self.widgets = scan_markup_file(&path, &self.config)?;
        Ok(self.widgets.len())
    }

    /// Builds pages, graph, and summary from everything scanned so far.
    pub fn finish(self) -> AnalysisReport {
        let report = AnalysisReport::assemble(
            &self.units,
            self.registry,
            self.widgets,
            &self.config.markup_file,
        );
        info!(
            units = report.summary.source_units_scanned,
            paths = report.summary.total_navigation_functions,
            edges = report.navigation_graph.edges.len(),
            widgets = report.summary.total_widgets,
            "Navigation analysis complete"
        );
        report
    }
}

/// Lists the source files directly inside `dir`, sorted by file name.
pub fn collect_source_paths(dir: &Path, config: &AnalyzerConfig) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && config.is_source_file(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Runs the full pipeline over one corpus directory.
///
/// # Errors
///
/// Propagates the I/O errors of [`Analyzer::scan_directory`] and
/// [`Analyzer::scan_markup`].
pub fn analyze_directory(dir: &Path, config: &AnalyzerConfig) -> Result<AnalysisReport> {
    let mut analyzer = Analyzer::new(config.clone());
    analyzer.scan_markup(dir)?;
    analyzer.scan_directory(dir)?;
    Ok(analyzer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::ExtractedFacts;
    use crate::body::FunctionBody;

    const MAIN: &str = r#"
function tableData.gotoSearch()
  if bOnline then
    PushPageStack("Search")
  end
end

function tableData.gotoOptions()
  gLastPage = "Main"
  PushPageStack("Options")
end

function tableData.refresh()
  gDirty = true
end
"#;

    #[test]
    fn test_scan_unit_records_each_navigation_function() {
        let mut analyzer = Analyzer::new(AnalyzerConfig::default());
        analyzer.scan_unit("Main", "Main.lua", MAIN);

        let registry = analyzer.registry();
        assert_eq!(registry.len(), 2);

        let search = registry.get("Main", "gotoSearch").unwrap();
        assert_eq!(search.target_page.as_deref(), Some("Search"));
        assert_eq!(search.conditions, ["bOnline"]);

        let options = registry.get("Main", "gotoOptions").unwrap();
        assert_eq!(options.actions, ["gLastPage = \"Main\""]);
    }

    #[test]
    fn test_rescanning_a_unit_keeps_one_page() {
        let mut analyzer = Analyzer::new(AnalyzerConfig::default());
        analyzer.scan_unit("Main", "Main.lua", MAIN);
        analyzer.scan_unit("Main", "Main.lua", MAIN);

        let report = analyzer.finish();
        assert_eq!(report.pages.len(), 1);
        assert_eq!(report.navigation_paths.len(), 2);
    }

    #[test]
    fn test_later_duplicate_definition_wins() {
        let text = "function tableData.gotoBack()\n  PushPageStack(\"Main\")\nend\nfunction tableData.gotoBack()\n  PushPageStack(\"Title\")\nend\n";
        let mut analyzer = Analyzer::new(AnalyzerConfig::default());
        analyzer.scan_unit("Options", "Options.lua", text);

        assert_eq!(analyzer.registry().len(), 1);
        assert_eq!(
            analyzer.registry().get("Options", "gotoBack").and_then(|p| p.target()),
            Some("Title")
        );
    }

    struct FixedTarget;

    impl FactExtractor for FixedTarget {
        fn extract(&self, _body: &FunctionBody<'_>) -> ExtractedFacts {
            ExtractedFacts {
                target_page: Some("Fixed".to_string()),
                ..ExtractedFacts::default()
            }
        }
    }

    #[test]
    fn test_alternative_extractor_is_used() {
        let mut analyzer = Analyzer::with_extractor(AnalyzerConfig::default(), Box::new(FixedTarget));
        analyzer.scan_unit("Main", "Main.lua", MAIN);

        assert!(analyzer.registry().all().all(|p| p.target() == Some("Fixed")));
    }

    #[test]
    fn test_missing_directory_scans_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut analyzer = Analyzer::new(AnalyzerConfig::default());
        let scanned = analyzer.scan_directory(&dir.path().join("absent")).unwrap();

        assert_eq!(scanned, 0);
        assert!(analyzer.finish().pages.is_empty());
    }

    #[test]
    fn test_unreadable_unit_still_becomes_a_page() {
        let dir = tempfile::tempdir().unwrap();
        let mut analyzer = Analyzer::new(AnalyzerConfig::default());
        analyzer.scan_unit("Main", "Main.lua", MAIN);

        assert!(!analyzer.scan_file(&dir.path().join("Broken.lua")));

        let report = analyzer.finish();
        let pages: Vec<_> = report.pages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(pages, ["Main", "Broken"]);
        assert!(report.pages[1].navigation_functions.is_empty());
        assert_eq!(report.navigation_paths.len(), 2);
    }

    #[test]
    fn test_scan_file_uses_stem_as_unit_id() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Options.lua");
        fs::write(&file, "function tableData.gotoBack()\n  PushPageStack(\"Main\")\nend\n").unwrap();

        let mut analyzer = Analyzer::new(AnalyzerConfig::default());
        assert!(analyzer.scan_file(&file));
        assert!(analyzer.registry().get("Options", "gotoBack").is_some());
    }

    #[test]
    fn test_whole_word_config_reaches_delimiter() {
        let text = "function tableData.gotoLobby()\n  SendData(x)\n  PushPageStack(\"Lobby\")\nend\n";
        let config = AnalyzerConfig {
            keyword_match: crate::rules::KeywordMatch::WholeWord,
            ..AnalyzerConfig::default()
        };

        let mut strict = Analyzer::new(config);
        strict.scan_unit("Main", "Main.lua", text);
        assert_eq!(
            strict.registry().get("Main", "gotoLobby").and_then(|p| p.target()),
            Some("Lobby")
        );

        let mut default = Analyzer::new(AnalyzerConfig::default());
        default.scan_unit("Main", "Main.lua", text);
        assert_eq!(default.registry().get("Main", "gotoLobby").and_then(|p| p.target()), None);
    }

    #[test]
    fn test_file_as_corpus_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Main.lua");
        fs::write(&file, MAIN).unwrap();

        let mut analyzer = Analyzer::new(AnalyzerConfig::default());
        let err = analyzer.scan_directory(&file).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidInput(_)));
    }
}
