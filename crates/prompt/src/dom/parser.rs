// ABOUTME: Parser collaborator boundary: the HtmlParser trait and the scraper/html5ever adapter.
// ABOUTME: Converts scraper's ego_tree into the owned Node tree, dropping comments and doctypes.

use std::fmt;

use ego_tree::iter::Edge;
use ego_tree::NodeRef;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

use super::node::{Document, Element, Node};
use crate::error::FormatError;

/// Input that starts like a full document (doctype or `<html>`, optionally
/// after a BOM, whitespace or comments).
static DOCUMENT_START_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^\x{feff}?\s*(?:<!--.*?-->\s*)*(?:<!doctype|<html[\s>/])").unwrap()
});

/// Turns an HTML string into an owned tree.
///
/// Malformed markup handling is the parser's own contract; errors returned
/// here reach the caller of `Formatter::format` unchanged.
pub trait HtmlParser: fmt::Debug + Send + Sync {
    fn parse(&self, html: &str) -> Result<Document, FormatError>;
}

/// Default parser built on scraper (html5ever). Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Html5everParser;

impl HtmlParser for Html5everParser {
    fn parse(&self, html: &str) -> Result<Document, FormatError> {
        if is_full_document(html) {
            let doc = Html::parse_document(html);
            let root = doc.root_element();
            let nodes = convert_node(*root).into_iter().collect();
            return Ok(Document::new(nodes));
        }

        let fragment = Html::parse_fragment(html);
        let nodes = fragment
            .root_element()
            .children()
            .filter_map(convert_node)
            .collect();
        Ok(Document::new(nodes))
    }
}

/// Returns true when the input should be parsed as a whole document rather
/// than a body fragment.
pub fn is_full_document(html: &str) -> bool {
    DOCUMENT_START_RE.is_match(html)
}

/// Convert a scraper subtree into an owned node.
///
/// Walks open/close edges with an explicit stack of unfinished elements so
/// nesting depth is bounded by the heap, not the call stack.
fn convert_node(node: NodeRef<scraper::Node>) -> Option<Node> {
    let mut open: Vec<Element> = Vec::new();
    let mut finished = None;

    for edge in node.traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                scraper::Node::Element(el) => open.push(Element {
                    tag: el.name().to_string(),
                    attrs: el
                        .attrs
                        .iter()
                        .map(|(name, value)| {
                            // Foreign content keeps its prefix (`xlink:href`) so names stay unique.
                            let name = match &name.prefix {
                                Some(prefix) => format!("{}:{}", prefix, name.local),
                                None => name.local.to_string(),
                            };
                            (name, value.to_string())
                        })
                        .collect(),
                    children: Vec::new(),
                }),
                scraper::Node::Text(text) => {
                    attach(&mut open, &mut finished, Node::Text(String::from(&**text)))
                }
                _ => {}
            },
            Edge::Close(node) => {
                if node.value().is_element() {
                    if let Some(el) = open.pop() {
                        attach(&mut open, &mut finished, Node::Element(el));
                    }
                }
            }
        }
    }

    finished
}

fn attach(open: &mut [Element], finished: &mut Option<Node>, node: Node) {
    match open.last_mut() {
        Some(parent) => parent.children.push(node),
        None => *finished = Some(node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Document {
        Html5everParser.parse(html).unwrap()
    }

    #[test]
    fn detects_full_documents() {
        assert!(is_full_document("<!DOCTYPE html><html></html>"));
        assert!(is_full_document("  \n<html lang=\"en\"><body></body></html>"));
        assert!(is_full_document("<!-- saved page --><!doctype html>"));
        assert!(is_full_document("\u{feff}<HTML>"));
        assert!(!is_full_document("<div>x</div>"));
        assert!(!is_full_document("<htmlfoo>"));
        assert!(!is_full_document("text <html>"));
    }

    #[test]
    fn fragment_keeps_top_level_nodes() {
        let doc = parse("<p>a</p> <span>b</span>");
        assert_eq!(doc.nodes.len(), 3);
        assert_eq!(doc.nodes[0].as_element().unwrap().tag, "p");
        assert_eq!(doc.nodes[1], Node::text(" "));
        assert_eq!(doc.nodes[2].as_element().unwrap().tag, "span");
    }

    #[test]
    fn document_root_is_html_element() {
        let doc = parse("<!DOCTYPE html><html lang=\"en\"><head></head><body><p>hi</p></body></html>");
        let root = doc.root_element().unwrap();
        assert_eq!(root.tag, "html");
        assert_eq!(root.attr("lang"), Some("en"));
        let tags: Vec<&str> = root
            .children
            .iter()
            .filter_map(|n| n.as_element())
            .map(|el| el.tag.as_str())
            .collect();
        assert_eq!(tags, vec!["head", "body"]);
    }

    #[test]
    fn attributes_keep_source_order() {
        let doc = parse(r#"<a zeta="1" href="/x" alpha="2" data-testid="go">go</a>"#);
        let el = doc.root_element().unwrap();
        let names: Vec<&str> = el.attrs.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["zeta", "href", "alpha", "data-testid"]);
    }

    #[test]
    fn comments_are_dropped() {
        let doc = parse("<div><!-- note --><p>x</p></div>");
        let div = doc.root_element().unwrap();
        assert_eq!(div.children.len(), 1);
        assert_eq!(div.children[0].as_element().unwrap().tag, "p");
    }

    #[test]
    fn entities_are_decoded_in_text_and_attributes() {
        let doc = parse(r#"<a title="Tom &amp; Jerry">a &lt; b</a>"#);
        let a = doc.root_element().unwrap();
        assert_eq!(a.attr("title"), Some("Tom & Jerry"));
        assert_eq!(a.children, vec![Node::text("a < b")]);
    }

    #[test]
    fn namespaced_attributes_keep_their_prefix() {
        let doc = parse(r##"<svg><use href="#a" xlink:href="#b"></use></svg>"##);
        let svg = doc.root_element().unwrap();
        let use_el = svg.children[0].as_element().unwrap();
        assert_eq!(use_el.attr("href"), Some("#a"));
        assert_eq!(use_el.attr("xlink:href"), Some("#b"));
        assert_eq!(use_el.attrs.len(), 2);
    }

    #[test]
    fn deeply_nested_input_converts_without_recursion() {
        let depth = 10_000;
        let html = format!("{}<p>deep</p>{}", "<div>".repeat(depth), "</div>".repeat(depth));
        let doc = parse(&html);
        let mut el = doc.root_element().unwrap();
        let mut levels = 1;
        while let Some(child) = el.children.first().and_then(Node::as_element) {
            el = child;
            levels += 1;
        }
        assert_eq!(levels, depth + 1);
        assert_eq!(el.tag, "p");
        assert_eq!(el.children, vec![Node::text("deep")]);
    }

    #[test]
    fn empty_input_yields_no_nodes() {
        assert!(parse("").nodes.is_empty());
    }
}
