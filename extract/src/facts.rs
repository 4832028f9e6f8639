//! Fact extraction over a recovered function body.

use crate::body::FunctionBody;
use crate::rules::{
    KeywordMatch, PATTERNS, contains_assignment, contains_control_keyword, is_comment_line,
};

/// Facts pulled out of one function body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFacts {
    pub target_page: Option<String>,
    pub conditions: Vec<String>,
    pub actions: Vec<String>,
}

/// Turns a function body into [`ExtractedFacts`].
///
/// Implementations must be pure and total: malformed input yields empty
/// facts, never an error.
pub trait FactExtractor {
    fn extract(&self, body: &FunctionBody<'_>) -> ExtractedFacts;
}

/// Default extractor driven by the fixed rules in [`crate::rules`].
///
/// - target page: the first transition call's argument, later calls ignored
/// - conditions: every guard clause expression, in document order
/// - actions: every non-comment line with an assignment and no control
///   keyword, in document order
///
/// Keyword tests follow the extractor's [`KeywordMatch`]; the default is
/// substring matching.
///
/// # Examples
///
/// ```
/// use menu_graph_extract::{FactExtractor, PatternExtractor, delimit_body};
///
/// let body = delimit_body(" if x then PushPageStack(\"Search\") end end");
/// let facts = PatternExtractor::default().extract(&body);
/// assert_eq!(facts.target_page.as_deref(), Some("Search"));
/// assert_eq!(facts.conditions, ["x"]);
/// assert!(facts.actions.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternExtractor {
    keywords: KeywordMatch,
}

impl PatternExtractor {
    pub fn new(keywords: KeywordMatch) -> Self {
        Self { keywords }
    }
}

impl FactExtractor for PatternExtractor {
    fn extract(&self, body: &FunctionBody<'_>) -> ExtractedFacts {
        let text = body.text();

        let target_page = PATTERNS
            .transition_call
            .captures(&text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());

        let conditions = PATTERNS
            .guard_clause
            .captures_iter(&text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .collect();

        let actions = body
            .lines
            .iter()
            .filter(|line| {
                contains_assignment(line)
                    && !is_comment_line(line)
                    && !contains_control_keyword(line, self.keywords)
            })
            .map(|line| line.trim().to_string())
            .collect();

        ExtractedFacts {
            target_page,
            conditions,
            actions,
        }
    }
}
