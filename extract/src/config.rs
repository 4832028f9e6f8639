//! Analyzer configuration.
//!
//! Controls which files are treated as source units and how the widget
//! markup file is read. The navigation pattern rules are fixed and live in
//! [`crate::rules`]; only their keyword matching mode is configurable.
//!
//! # Example YAML
//!
//! ```yaml
//! source_extension: lua
//! markup_file: Frontend2_Level.xml
//! widget_type: cGUIButtonWidget
//! event_handler_pointer: mpEventHandler
//! keyword_match: substring   # or whole_word
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rules::KeywordMatch;

pub const DEFAULT_SOURCE_EXTENSION: &str = "lua";
pub const DEFAULT_MARKUP_FILE: &str = "Frontend2_Level.xml";
pub const DEFAULT_WIDGET_TYPE: &str = "cGUIButtonWidget";
pub const DEFAULT_EVENT_HANDLER_POINTER: &str = "mpEventHandler";

/// Settings for one analysis run.
///
/// Every field is optional in YAML; missing fields take their defaults.
///
/// # Examples
///
/// ```
/// use menu_graph_extract::AnalyzerConfig;
///
/// let config: AnalyzerConfig = serde_yaml::from_str("markup_file: menu.xml\n").unwrap();
/// assert_eq!(config.markup_file, "menu.xml");
/// assert_eq!(config.source_extension, "lua");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Extension (without the dot) selecting source units. Case-sensitive.
    pub source_extension: String,
    /// Name of the widget markup file inside the corpus directory.
    pub markup_file: String,
    /// Object type attribute selecting widgets in the markup.
    pub widget_type: String,
    /// Pointer name whose items are event-handler references.
    pub event_handler_pointer: String,
    /// How `end`, `if` and `then` are matched by the body delimiter and the
    /// default extractor.
    pub keyword_match: KeywordMatch,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            markup_file: DEFAULT_MARKUP_FILE.to_string(),
            widget_type: DEFAULT_WIDGET_TYPE.to_string(),
            event_handler_pointer: DEFAULT_EVENT_HANDLER_POINTER.to_string(),
            keyword_match: KeywordMatch::Substring,
        }
    }
}

impl AnalyzerConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::ExtractError::Io) if the file cannot be read,
    /// or [`Yaml`](crate::ExtractError::Yaml) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Returns `true` if `path` has the configured source extension.
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.source_extension)
    }
}
