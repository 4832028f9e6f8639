//! Pattern rules for navigation extraction.
//!
//! The extractor does not parse the scripting language. It recognizes a
//! narrow set of statement shapes with the fixed rules below:
//!
//! | rule | pattern | tie-break |
//! |------|---------|-----------|
//! | declaration | `function tableData.<name containing "goto">()` | every match |
//! | transition | `PushPageStack("<page>")` | first match wins |
//! | guard | `if <expr> then` / `elseif <expr> then` | every match, in order |
//! | terminator | `end` on a non-comment line | first line wins |
//!
//! Keyword tests default to plain substring checks, so `end` inside
//! `friendIndex` or `SendData` terminates a body and `gNotifyCount = 1` is
//! not an action. [`KeywordMatch::WholeWord`] is the stricter alternative.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Prefix that marks a comment line once leading whitespace is stripped.
pub const COMMENT_MARKER: &str = "--";

/// Keyword closing a function body.
pub const TERMINATOR_KEYWORD: &str = "end";

/// Keywords opening and closing a guard clause.
pub const GUARD_KEYWORDS: [&str; 2] = ["if", "then"];

/// How keyword tests match a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordMatch {
    /// Any occurrence counts, including inside identifiers.
    #[default]
    Substring,
    /// Only occurrences not adjacent to `[A-Za-z0-9_]` count.
    WholeWord,
}

pub(crate) static PATTERNS: LazyLock<NavigationPatterns> = LazyLock::new(NavigationPatterns::new);

pub(crate) struct NavigationPatterns {
    pub(crate) declaration: Regex,
    pub(crate) transition_call: Regex,
    pub(crate) guard_clause: Regex,
    terminator_word: Regex,
    control_word: Regex,
}

impl NavigationPatterns {
    fn new() -> Self {
        Self {
            // function tableData.gotoSearch()
            declaration: Regex::new(r"function\s+tableData\.(\w*goto\w*)\(\)")
                .expect("static regex must compile"),
            // PushPageStack("Search")
            transition_call: Regex::new(r#"PushPageStack\("([^"]+)"\)"#)
                .expect("static regex must compile"),
            // if bOnline then / elseif x > 0 then
            guard_clause: Regex::new(r"\b(?:else)?if\s+(.+?)\s+then\b")
                .expect("static regex must compile"),
            terminator_word: Regex::new(r"\bend\b").expect("static regex must compile"),
            control_word: Regex::new(r"\b(?:if|then|end)\b").expect("static regex must compile"),
        }
    }
}

/// Returns `true` when the line, after stripping leading whitespace, starts
/// with [`COMMENT_MARKER`].
///
/// Trailing comments do not make a line a comment line.
pub fn is_comment_line(line: &str) -> bool {
    line.trim_start().starts_with(COMMENT_MARKER)
}

/// Returns `true` for a non-comment line containing [`TERMINATOR_KEYWORD`].
pub fn is_terminator_line(line: &str, keywords: KeywordMatch) -> bool {
    if is_comment_line(line) {
        return false;
    }
    match keywords {
        KeywordMatch::Substring => line.contains(TERMINATOR_KEYWORD),
        KeywordMatch::WholeWord => PATTERNS.terminator_word.is_match(line),
    }
}

/// Returns `true` when the line contains a guard keyword or the terminator.
pub fn contains_control_keyword(line: &str, keywords: KeywordMatch) -> bool {
    match keywords {
        KeywordMatch::Substring => GUARD_KEYWORDS
            .iter()
            .chain(std::iter::once(&TERMINATOR_KEYWORD))
            .any(|keyword| line.contains(keyword)),
        KeywordMatch::WholeWord => PATTERNS.control_word.is_match(line),
    }
}

/// Returns `true` when the line contains a single `=` that is not part of a
/// comparison operator (`==`, `~=`, `<=`, `>=`).
pub fn contains_assignment(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        if b != b'=' {
            return false;
        }
        let prev = i.checked_sub(1).map(|p| bytes[p]);
        let next = bytes.get(i + 1).copied();
        !matches!(prev, Some(b'=' | b'~' | b'<' | b'>')) && next != Some(b'=')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_line_detection_uses_leading_content_only() {
        assert!(is_comment_line("-- end of menu"));
        assert!(is_comment_line("    --[[ block ]]"));
        assert!(!is_comment_line("x = 1 -- trailing"));
        assert!(!is_comment_line(""));
    }

    #[test]
    fn test_terminator_matches_substring_by_default() {
        let sub = KeywordMatch::Substring;
        assert!(is_terminator_line("end", sub));
        assert!(is_terminator_line("  end)", sub));
        assert!(is_terminator_line("x = 1 -- end", sub));
        assert!(is_terminator_line("local friendIndex = 1", sub));
        assert!(is_terminator_line("SendData(pending)", sub));
        assert!(!is_terminator_line("-- end", sub));
        assert!(!is_terminator_line("PushPageStack(\"Main\")", sub));
    }

    #[test]
    fn test_terminator_whole_word() {
        let word = KeywordMatch::WholeWord;
        assert!(is_terminator_line("end", word));
        assert!(is_terminator_line("PushPageStack(\"Main\") end", word));
        assert!(!is_terminator_line("-- end", word));
        assert!(!is_terminator_line("local friendIndex = 1", word));
        assert!(!is_terminator_line("SendData(pending)", word));
    }

    #[test]
    fn test_control_keywords_substring() {
        let sub = KeywordMatch::Substring;
        assert!(contains_control_keyword("if x then", sub));
        assert!(contains_control_keyword("gNotifyCount = 1", sub));
        assert!(contains_control_keyword("gThenable = 2", sub));
        assert!(contains_control_keyword("gFriendIndex = 2", sub));
        assert!(!contains_control_keyword("gSelected = 1", sub));
    }

    #[test]
    fn test_control_keywords_whole_word() {
        let word = KeywordMatch::WholeWord;
        assert!(contains_control_keyword("elseif x then", word));
        assert!(contains_control_keyword("end", word));
        assert!(!contains_control_keyword("gIfEnabled = thenValue", word));
        assert!(!contains_control_keyword("gNotifyCount = 1", word));
    }

    #[test]
    fn test_keyword_match_yaml_names() {
        let parsed: KeywordMatch = serde_yaml::from_str("whole_word").unwrap();
        assert_eq!(parsed, KeywordMatch::WholeWord);
        assert_eq!(KeywordMatch::default(), KeywordMatch::Substring);
    }

    #[test]
    fn test_assignment_excludes_comparisons() {
        assert!(contains_assignment("gSelected = 1"));
        assert!(contains_assignment("a.b=c"));
        assert!(contains_assignment("x = y == z"));
        assert!(!contains_assignment("return a == b"));
        assert!(!contains_assignment("a ~= b"));
        assert!(!contains_assignment("a <= b and c >= d"));
        assert!(!contains_assignment("PlaySound(SoundID.UI_FE_Open)"));
    }

    #[test]
    fn test_declaration_pattern_is_case_sensitive() {
        let re = &PATTERNS.declaration;
        assert!(re.is_match("function tableData.gotoSearch()"));
        assert!(re.is_match("function   tableData.backgotoMain()"));
        assert!(!re.is_match("function tableData.GotoSearch()"));
        assert!(!re.is_match("function tableData.gotoSearch(owner)"));
        assert!(!re.is_match("function other.gotoSearch()"));
    }
}
