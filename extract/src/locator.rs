//! Navigation function locator.

use crate::rules::PATTERNS;

/// One navigation function definition found in a source unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionMatch<'a> {
    /// Function identifier (e.g. `gotoSearch`).
    pub name: &'a str,
    /// Identifier of the unit the definition was found in.
    pub unit: &'a str,
    /// Byte offset just past the declaration's `()`; the body starts here.
    pub body_start: usize,
}

/// Lazily yields every navigation function definition in `text`, in
/// document order.
///
/// Repeated definitions of the same name are all yielded. Nothing about the
/// rest of the file is validated.
///
/// # Examples
///
/// ```
/// use menu_graph_extract::locate_functions;
///
/// let text = "function tableData.gotoSearch()\nend\nfunction tableData.init()\nend\n";
/// let names: Vec<_> = locate_functions("Main", text).map(|m| m.name).collect();
/// assert_eq!(names, ["gotoSearch"]);
/// ```
pub fn locate_functions<'a>(
    unit: &'a str,
    text: &'a str,
) -> impl Iterator<Item = FunctionMatch<'a>> + 'a {
    PATTERNS.declaration.captures_iter(text).filter_map(move |caps| {
        let whole = caps.get(0)?;
        let name = caps.get(1)?;
        Some(FunctionMatch {
            name: name.as_str(),
            unit,
            body_start: whole.end(),
        })
    })
}
