// ABOUTME: Serializer rendering a reduced tree as indented pseudo-HTML for prompts.
// ABOUTME: Truncates attribute values and text at emission time; inline form for text-only elements.

use std::borrow::Cow;

use crate::dom::{Document, Element, Node};
use crate::options::Options;

/// Truncate to `max` characters, appending `...{n} more characters` when
/// anything was cut. Lengths count `char`s, not bytes.
pub fn truncate(value: &str, max: usize) -> Cow<'_, str> {
    let Some((cut, _)) = value.char_indices().nth(max) else {
        return Cow::Borrowed(value);
    };
    let remaining = value[cut..].chars().count();
    Cow::Owned(format!("{}...{} more characters", &value[..cut], remaining))
}

/// Check if tag is a void element.
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag.to_lowercase().as_str(),
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

// Only the delimiter needs escaping; the output is read, not re-parsed.
fn escape_attr(s: &str) -> Cow<'_, str> {
    if s.contains('"') {
        Cow::Owned(s.replace('"', "&quot;"))
    } else {
        Cow::Borrowed(s)
    }
}

/// Serialize a reduced node at the given depth.
///
/// Every emitted line ends with a line break. Text has its whitespace
/// collapsed before it is truncated so indentation stays readable.
pub fn serialize(node: &Node, depth: usize, opts: &Options) -> String {
    let mut out = String::new();
    write_node(node, depth, opts, &mut out);
    out
}

/// Serialize every top-level node of a reduced document at depth 0.
///
/// An empty document renders as a single line break.
pub fn serialize_document(doc: &Document, opts: &Options) -> String {
    let mut out = String::new();
    for node in &doc.nodes {
        write_node(node, 0, opts, &mut out);
    }
    if out.is_empty() {
        out.push('\n');
    }
    out
}

fn write_indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push(' ');
    }
}

/// Collapse whitespace runs to single spaces and strip the ends, so text
/// always fits on the line it is written to.
pub fn normalize_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn write_text(text: &str, opts: &Options, out: &mut String) {
    out.push_str(&truncate(&normalize_spaces(text), opts.max_content_len));
}

/// Pending serializer work. Closing tags are queued behind their children so
/// nesting depth never grows the call stack.
enum Emit<'a> {
    Node(&'a Node, usize),
    Close(&'a Element, usize),
}

fn write_node(node: &Node, depth: usize, opts: &Options, out: &mut String) {
    let mut work = vec![Emit::Node(node, depth)];
    while let Some(item) = work.pop() {
        match item {
            Emit::Node(node, depth) => {
                write_indent(depth, out);
                match node {
                    Node::Text(text) => write_text(text, opts, out),
                    Node::Element(el) => {
                        write_open_tag(el, opts, out);
                        match el.children.as_slice() {
                            [] => {
                                if !is_void_element(&el.tag) {
                                    write_close_tag(el, out);
                                }
                            }
                            [Node::Text(text)] => {
                                write_text(text, opts, out);
                                write_close_tag(el, out);
                            }
                            children => {
                                out.push('\n');
                                work.push(Emit::Close(el, depth));
                                work.extend(
                                    children
                                        .iter()
                                        .rev()
                                        .map(|child| Emit::Node(child, depth + 1)),
                                );
                                continue;
                            }
                        }
                    }
                }
            }
            Emit::Close(el, depth) => {
                write_indent(depth, out);
                write_close_tag(el, out);
            }
        }
        out.push('\n');
    }
}

fn write_open_tag(el: &Element, opts: &Options, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);
    for (name, value) in &el.attrs {
        out.push(' ');
        out.push_str(name);
        if value.is_empty() {
            continue;
        }
        out.push_str("=\"");
        out.push_str(&escape_attr(&truncate(value, opts.max_attr_len)));
        out.push('"');
    }
    out.push('>');
}

fn write_close_tag(el: &Element, out: &mut String) {
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}
