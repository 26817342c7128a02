// ABOUTME: Bottom-up node reducer: drops blank text, prunes empty elements, collapses bare wrappers.
// ABOUTME: One post-order pass; parents only ever see their children's final reduced state.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::dom::{Document, Element, Node};
use crate::filter::filter_attrs;
use crate::options::Options;

/// Generic grouping tags that may be replaced by their only element child.
pub const COLLAPSIBLE_TAGS: &[&str] = &["div", "span"];

/// Returns true if the tag is a semantics-free wrapper eligible for collapse.
pub fn is_collapsible(tag: &str) -> bool {
    COLLAPSIBLE_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

/// Counters describing what one reduction removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReduceStats {
    /// Elements removed for having neither attributes nor children.
    pub pruned: usize,
    /// Wrappers replaced by their single element child.
    pub collapsed: usize,
    /// Text nodes removed for being blank.
    pub blank_text: usize,
    /// Attributes removed by the attribute filter.
    pub dropped_attrs: usize,
    /// Subtrees removed because their tag is in `skip_tags`.
    pub skipped: usize,
}

/// A reduced document plus what the reduction removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduced {
    pub document: Document,
    pub stats: ReduceStats,
}

/// An element whose children are still being reduced.
struct Frame {
    tag: String,
    attrs: Vec<(String, String)>,
    pending: std::vec::IntoIter<Node>,
    kept: Vec<Node>,
    is_root: bool,
}

/// Result of visiting a node before its children are known.
enum Visit {
    Done(Option<Node>),
    Descend(Frame),
}

struct Reducer<'a> {
    opts: &'a Options,
    stats: ReduceStats,
}

impl<'a> Reducer<'a> {
    fn new(opts: &'a Options) -> Self {
        Self {
            opts,
            stats: ReduceStats::default(),
        }
    }

    /// Post-order reduction driven by an explicit frame stack, so arbitrarily
    /// deep input cannot exhaust the call stack.
    fn reduce(&mut self, node: Node, is_root: bool) -> Option<Node> {
        let mut stack = match self.visit(node, is_root) {
            Visit::Done(out) => return out,
            Visit::Descend(frame) => vec![frame],
        };

        loop {
            let next = stack.last_mut()?.pending.next();
            let done = match next {
                Some(child) => match self.visit(child, false) {
                    Visit::Descend(frame) => {
                        stack.push(frame);
                        continue;
                    }
                    Visit::Done(out) => out,
                },
                None => {
                    let frame = stack.pop()?;
                    let out = self.finish(frame);
                    if stack.is_empty() {
                        return out;
                    }
                    out
                }
            };
            if let (Some(node), Some(parent)) = (done, stack.last_mut()) {
                push_merging_text(&mut parent.kept, node);
            }
        }
    }

    fn visit(&mut self, node: Node, is_root: bool) -> Visit {
        match node {
            Node::Text(text) => {
                if text.trim().is_empty() {
                    self.stats.blank_text += 1;
                    Visit::Done(None)
                } else {
                    Visit::Done(Some(Node::Text(text)))
                }
            }
            Node::Element(mut el) => {
                if !is_root && self.opts.is_skipped(&el.tag) {
                    trace!(tag = %el.tag, "skipped subtree");
                    self.stats.skipped += 1;
                    return Visit::Done(None);
                }
                let children = std::mem::take(&mut el.children);
                Visit::Descend(Frame {
                    tag: std::mem::take(&mut el.tag),
                    attrs: std::mem::take(&mut el.attrs),
                    kept: Vec::with_capacity(children.len()),
                    pending: children.into_iter(),
                    is_root,
                })
            }
        }
    }

    /// Filter, prune and collapse an element once all its children are final.
    fn finish(&mut self, frame: Frame) -> Option<Node> {
        let Frame {
            tag,
            attrs,
            kept: children,
            is_root,
            ..
        } = frame;

        let before = attrs.len();
        let attrs = filter_attrs(attrs, self.opts);
        self.stats.dropped_attrs += before - attrs.len();

        if attrs.is_empty() && children.is_empty() && !is_root {
            trace!(tag = %tag, "pruned empty element");
            self.stats.pruned += 1;
            return None;
        }

        let only_element_child = children.len() == 1 && children[0].is_element();
        if attrs.is_empty() && is_collapsible(&tag) && only_element_child {
            trace!(tag = %tag, "collapsed wrapper");
            self.stats.collapsed += 1;
            return children.into_iter().next();
        }

        Some(Node::Element(Element {
            tag,
            attrs,
            children,
        }))
    }
}

/// Append a surviving node, joining it onto a preceding text sibling.
///
/// Removing an element between two text runs must not leave two text nodes
/// side by side: a parser would read them back as one.
fn push_merging_text(siblings: &mut Vec<Node>, node: Node) {
    if let Node::Text(text) = &node {
        if let Some(Node::Text(prev)) = siblings.last_mut() {
            prev.push_str(text);
            return;
        }
    }
    siblings.push(node);
}

/// Reduce a non-root node. `None` means the node is discarded.
pub fn reduce(node: Node, opts: &Options) -> Option<Node> {
    Reducer::new(opts).reduce(node, false)
}

/// Reduce the tree's root. The root element is never pruned, although it may
/// still collapse into its only element child. A blank text root yields `None`.
pub fn reduce_root(node: Node, opts: &Options) -> Option<Node> {
    Reducer::new(opts).reduce(node, true)
}

/// Reduce a parsed document.
///
/// A document with a single significant top-level element reduces it as the
/// root. Otherwise the top-level nodes are siblings under an implicit fragment
/// root: each is reduced as an ordinary child.
pub fn reduce_document(doc: Document, opts: &Options) -> Reduced {
    let mut reducer = Reducer::new(opts);
    let single_root = doc.root_element().is_some();

    let mut nodes = Vec::with_capacity(doc.nodes.len());
    for node in doc.nodes {
        let is_root = single_root && node.is_element();
        if let Some(node) = reducer.reduce(node, is_root) {
            push_merging_text(&mut nodes, node);
        }
    }

    Reduced {
        document: Document::new(nodes),
        stats: reducer.stats,
    }
}
