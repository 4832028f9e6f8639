//! Widget scanner for the level markup file.
//!
//! This is a tolerant tag scan, not an XML parser. It recognizes flat
//! `<Object>` elements with `<Attribute>`/`<Pointer>` children holding
//! `<Item>` texts, which is the shape the level markup uses for GUI widgets.
//! Malformed markup yields fewer widgets, never an error.
//!
//! An element's body ends at its closing tag or at the first nested
//! `<Object>`, whichever comes first, so a widget never collects the
//! attributes of objects nested inside it. Children that follow a nested
//! object are lost, and `<Attribute>` or `<Pointer>` nested inside another
//! one are read as siblings.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::LazyLock;

use menu_graph_core::WidgetRecord;
use regex::Regex;
use tracing::{debug, warn};

use crate::config::AnalyzerConfig;
use crate::error::Result;

static MARKUP: LazyLock<MarkupPatterns> = LazyLock::new(MarkupPatterns::new);

struct MarkupPatterns {
    object_open: Regex,
    attribute_open: Regex,
    pointer_open: Regex,
    item: Regex,
    tag_attribute: Regex,
}

impl MarkupPatterns {
    fn new() -> Self {
        Self {
            object_open: Regex::new(r"<Object\b([^>]*)>").expect("static regex must compile"),
            attribute_open: Regex::new(r"<Attribute\b([^>]*)>")
                .expect("static regex must compile"),
            pointer_open: Regex::new(r"<Pointer\b([^>]*)>").expect("static regex must compile"),
            item: Regex::new(r"<Item>([^<]*)</Item>").expect("static regex must compile"),
            tag_attribute: Regex::new(r#"([A-Za-z_][\w.-]*)\s*=\s*"([^"]*)""#)
                .expect("static regex must compile"),
        }
    }
}

/// One element: its open-tag attributes and its inner text.
struct Element<'a> {
    attrs: &'a str,
    body: &'a str,
}

impl Element<'_> {
    fn attr(&self, name: &str) -> Option<String> {
        MARKUP
            .tag_attribute
            .captures_iter(self.attrs)
            .find(|caps| &caps[1] == name)
            .map(|caps| unescape(&caps[2]))
    }

    fn items(&self) -> Vec<String> {
        MARKUP
            .item
            .captures_iter(self.body)
            .map(|caps| unescape(caps[1].trim()))
            .filter(|text| !text.is_empty())
            .collect()
    }
}

/// Finds every element opened by `open`, with the body running to the next
/// `close` tag or nested object. Self-closing tags get an empty body.
fn elements<'a>(open: &Regex, close: &str, text: &'a str) -> Vec<Element<'a>> {
    open.captures_iter(text)
        .filter_map(|caps| {
            let tag = caps.get(0)?;
            let attrs = caps.get(1)?.as_str();
            if let Some(attrs) = attrs.strip_suffix('/') {
                return Some(Element { attrs, body: "" });
            }
            let rest = &text[tag.end()..];
            let mut end = rest.find(close).unwrap_or(rest.len());
            if let Some(nested) = MARKUP.object_open.find(&rest[..end]) {
                end = nested.start();
            }
            Some(Element {
                attrs,
                body: &rest[..end],
            })
        })
        .collect()
}

fn unescape(raw: &str) -> String {
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Scans markup text for widgets of the configured type.
///
/// Widgets are keyed by id; a later object with the same id replaces the
/// earlier one in place.
///
/// # Examples
///
/// ```
/// use menu_graph_extract::{AnalyzerConfig, scan_widgets};
///
/// let markup = r#"<Level>
///   <Object type="cGUIButtonWidget" id="42">
///     <Attribute name="mText" type="string"><Item>Start</Item></Attribute>
///     <Pointer name="mpEventHandler" type="cGUIEventHandler"><Item>77</Item><Item>0</Item></Pointer>
///   </Object>
/// </Level>"#;
///
/// let widgets = scan_widgets(markup, &AnalyzerConfig::default());
/// assert_eq!(widgets[0].name, "Button_42");
/// assert_eq!(widgets[0].attributes["mText"], "string: Start");
/// assert_eq!(widgets[0].event_handlers, ["77"]);
/// ```
pub fn scan_widgets(markup: &str, config: &AnalyzerConfig) -> Vec<WidgetRecord> {
    let mut widgets: Vec<WidgetRecord> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for object in elements(&MARKUP.object_open, "</Object>", markup) {
        if object.attr("type").as_deref() != Some(config.widget_type.as_str()) {
            continue;
        }
        let widget = build_widget(&object, config);
        match index.get(&widget.id) {
            Some(&slot) => widgets[slot] = widget,
            None => {
                index.insert(widget.id.clone(), widgets.len());
                widgets.push(widget);
            }
        }
    }

    widgets
}

fn build_widget(object: &Element<'_>, config: &AnalyzerConfig) -> WidgetRecord {
    let id = object.attr("id").unwrap_or_else(|| "unknown".to_string());

    let mut attributes = BTreeMap::new();
    for attribute in elements(&MARKUP.attribute_open, "</Attribute>", object.body) {
        let items = attribute.items();
        if items.is_empty() {
            continue;
        }
        let name = attribute.attr("name").unwrap_or_default();
        let kind = attribute.attr("type").unwrap_or_default();
        attributes.insert(name, format!("{kind}: {}", items.join(", ")));
    }

    let event_handlers = elements(&MARKUP.pointer_open, "</Pointer>", object.body)
        .into_iter()
        .filter(|pointer| pointer.attr("name").as_deref() == Some(config.event_handler_pointer.as_str()))
        .flat_map(|pointer| pointer.items())
        .filter(|item| item != "0")
        .collect();

    WidgetRecord {
        name: format!("Button_{id}"),
        object_type: config.widget_type.clone(),
        id,
        attributes,
        event_handlers,
    }
}

/// Reads and scans the markup file at `path`.
///
/// A missing file is logged and yields no widgets. Invalid UTF-8 is
/// replaced, not rejected.
///
/// # Errors
///
/// Returns [`Io`](crate::ExtractError::Io) when the file exists but cannot
/// be read.
pub fn scan_markup_file(path: &Path, config: &AnalyzerConfig) -> Result<Vec<WidgetRecord>> {
    if !path.exists() {
        warn!(path = %path.display(), "Markup file not found; no widgets extracted");
        return Ok(Vec::new());
    }
    let bytes = std::fs::read(path)?;
    let widgets = scan_widgets(&String::from_utf8_lossy(&bytes), config);
    debug!(path = %path.display(), widgets = widgets.len(), "Scanned markup file");
    Ok(widgets)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<Level>
  <Object type="cGUIButtonWidget" id="100">
    <Attribute name="mPosition" type="cFloat"><Item>1.0</Item><Item>2.5</Item></Attribute>
    <Attribute name="mEmpty" type="cInt"></Attribute>
    <Attribute name="mFlags" type="cInt" />
    <Attribute name="mLabel" type="string"><Item>Tom &amp; Jerry</Item></Attribute>
    <Pointer name="mpEventHandler" type="cGUIEventHandler"><Item>0</Item><Item>501</Item></Pointer>
    <Pointer name="mpParent" type="cGUIWidget"><Item>7</Item></Pointer>
  </Object>
  <Object type="cTextureResource" id="200">
    <Attribute name="mName" type="string"><Item>tex.tpl</Item></Attribute>
  </Object>
  <Object type="cGUIButtonWidget">
  </Object>
  <Object type="cGUIButtonWidget" id="100">
    <Pointer name="mpEventHandler"><Item>900</Item></Pointer>
  </Object>
</Level>
"#;

    #[test]
    fn test_selects_configured_type_only() {
        let widgets = scan_widgets(SAMPLE, &AnalyzerConfig::default());
        let ids: Vec<_> = widgets.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, ["100", "unknown"]);
        assert!(widgets.iter().all(|w| w.object_type == "cGUIButtonWidget"));
    }

    #[test]
    fn test_duplicate_id_replaces_in_place() {
        let widgets = scan_widgets(SAMPLE, &AnalyzerConfig::default());
        assert_eq!(widgets[0].event_handlers, ["900"]);
        assert!(widgets[0].attributes.is_empty());
    }

    #[test]
    fn test_attributes_and_handlers() {
        let first_object = SAMPLE.split("<Object type=\"cTextureResource\"").next().unwrap();
        let widgets = scan_widgets(first_object, &AnalyzerConfig::default());
        let widget = &widgets[0];

        assert_eq!(widget.name, "Button_100");
        assert_eq!(widget.attributes.len(), 2);
        assert_eq!(widget.attributes["mPosition"], "cFloat: 1.0, 2.5");
        assert_eq!(widget.attributes["mLabel"], "string: Tom & Jerry");
        assert_eq!(widget.event_handlers, ["501"]);
    }

    #[test]
    fn test_custom_widget_type() {
        let config = AnalyzerConfig {
            widget_type: "cTextureResource".to_string(),
            ..AnalyzerConfig::default()
        };
        let widgets = scan_widgets(SAMPLE, &config);
        assert_eq!(widgets.len(), 1);
        assert_eq!(widgets[0].attributes["mName"], "string: tex.tpl");
    }

    #[test]
    fn test_nested_object_children_stay_with_nested_object() {
        let markup = r#"<Level>
  <Object type="cGUIButtonWidget" id="1">
    <Attribute name="mText" type="cString"><Item>Play</Item></Attribute>
    <Object type="cGUIButtonWidget" id="2">
      <Attribute name="mFont" type="cString"><Item>big</Item></Attribute>
      <Pointer name="mpEventHandler"><Item>555</Item></Pointer>
    </Object>
  </Object>
</Level>"#;
        let widgets = scan_widgets(markup, &AnalyzerConfig::default());
        assert_eq!(widgets.len(), 2);

        let outer = &widgets[0];
        assert_eq!(outer.id, "1");
        assert_eq!(outer.attributes.keys().collect::<Vec<_>>(), ["mText"]);
        assert!(outer.event_handlers.is_empty());

        let inner = &widgets[1];
        assert_eq!(inner.attributes["mFont"], "cString: big");
        assert_eq!(inner.event_handlers, ["555"]);
    }

    #[test]
    fn test_garbage_yields_nothing() {
        assert!(scan_widgets("<Object type=\"cGUIButtonWidget\"", &AnalyzerConfig::default()).is_empty());
        assert!(scan_widgets("", &AnalyzerConfig::default()).is_empty());
    }

    #[test]
    fn test_missing_markup_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let widgets =
            scan_markup_file(&dir.path().join("missing.xml"), &AnalyzerConfig::default()).unwrap();
        assert!(widgets.is_empty());
    }
}
