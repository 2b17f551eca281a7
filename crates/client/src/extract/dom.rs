//! Small helpers over the scraper document tree.

use jobparse_core::Error;
use scraper::{ElementRef, Html, Selector};

/// Compile a CSS selector, surfacing bad selectors as parse errors.
pub fn css(selector: &str) -> Result<Selector, Error> {
    Selector::parse(selector).map_err(|e| Error::ParseFailed(format!("invalid selector `{selector}`: {e}")))
}

/// Collapse runs of whitespace (including non-breaking spaces) to one space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Concatenated text of an element with whitespace collapsed.
pub fn inline_text(element: ElementRef<'_>) -> String {
    let text: String = visible_text(element).collect();
    collapse_whitespace(&text)
}

/// Text of an element with one line per text node.
pub fn block_text(element: ElementRef<'_>) -> String {
    visible_text(element)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Raw text nodes under `element`, skipping scripts and styles.
fn visible_text<'a>(element: ElementRef<'a>) -> impl Iterator<Item = &'a str> {
    element.descendants().filter_map(|node| {
        let text = node.value().as_text()?;
        if in_script(node.parent().and_then(ElementRef::wrap)) {
            return None;
        }
        Some(&**text)
    })
}

/// Text of the element's direct text children only.
pub fn own_text(element: ElementRef<'_>) -> String {
    let text: String = element.children().filter_map(|node| node.value().as_text().map(|t| &**t)).collect();
    collapse_whitespace(&text)
}

/// Non-empty inline text of the first element matching `selector`.
pub fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(inline_text)
        .filter(|text| !text.is_empty())
}

/// `<body>` when present, otherwise the document root.
pub fn body(document: &Html) -> ElementRef<'_> {
    let root = document.root_element();
    root.children()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "body")
        .unwrap_or(root)
}

/// Every trimmed, non-empty text node under `<body>` in document order.
pub fn text_nodes(document: &Html) -> impl Iterator<Item = &str> {
    visible_text(body(document)).map(str::trim).filter(|t| !t.is_empty())
}

/// Next sibling that is an element, skipping text and comment nodes.
pub fn next_element_sibling(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

/// Elements matching `selector` whose text contains `needle`, keeping only
/// the innermost ones (no matching descendant also contains the needle).
pub fn innermost_containing<'a>(document: &'a Html, selector: &Selector, needle: &str) -> Vec<ElementRef<'a>> {
    let matches: Vec<ElementRef<'a>> = document
        .select(selector)
        .filter(|el| el.text().collect::<String>().contains(needle))
        .collect();

    matches
        .iter()
        .filter(|candidate| {
            !matches
                .iter()
                .any(|other| other.id() != candidate.id() && other.ancestors().any(|a| a.id() == candidate.id()))
        })
        .copied()
        .collect()
}

/// Whether the element carries the given class.
pub fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

fn in_script(parent: Option<ElementRef<'_>>) -> bool {
    parent.is_some_and(|p| matches!(p.value().name(), "script" | "style" | "noscript"))
}
