//! Body delimiter.
//!
//! Recovers an approximate function body by scanning lines forward until the
//! first non-comment line that contains the terminator keyword. Nested
//! blocks are not tracked: the first `end` closes the body, even when it
//! belongs to an inner `if`.

use crate::rules::{KeywordMatch, is_terminator_line};

/// Lines of a recovered function body, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionBody<'a> {
    pub lines: Vec<&'a str>,
    /// `false` when the text ran out before a terminator line was seen.
    pub terminated: bool,
}

impl FunctionBody<'_> {
    /// Joins the body lines with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Delimits the body that starts at the beginning of `text`.
///
/// The first line is the remainder of the declaration line. The terminator
/// line is included. Without a terminator the body runs to the end of the
/// text.
///
/// # Examples
///
/// ```
/// use menu_graph_extract::delimit_body;
///
/// let body = delimit_body("\n  -- end soon\n  PushPageStack(\"Main\")\nend\nfunction other()\n");
/// assert_eq!(body.lines, ["", "-- end soon", "PushPageStack(\"Main\")", "end"]);
/// assert!(body.terminated);
/// ```
pub fn delimit_body(text: &str) -> FunctionBody<'_> {
    delimit_body_with(text, KeywordMatch::Substring)
}

/// Like [`delimit_body`], with an explicit keyword matching mode.
pub fn delimit_body_with(text: &str, keywords: KeywordMatch) -> FunctionBody<'_> {
    let mut lines = Vec::new();
    for line in text.split('\n') {
        let trimmed = line.trim();
        lines.push(trimmed);
        if is_terminator_line(trimmed, keywords) {
            return FunctionBody {
                lines,
                terminated: true,
            };
        }
    }
    FunctionBody {
        lines,
        terminated: false,
    }
}
