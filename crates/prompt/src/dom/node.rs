// ABOUTME: Owned HTML tree used by the prompt pipeline: Node (element or text), Element and Document.
// ABOUTME: Built fresh per call by a parser collaborator and consumed by the reducer.

/// A node in the owned tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    /// Returns true for text nodes that are empty after trimming.
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text(t) if t.trim().is_empty())
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// An element: tag name, attributes in source order, children in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes and no children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append an attribute, replacing the value if the name is already present.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Append a child node.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a text child.
    pub fn with_text(self, content: impl Into<String>) -> Self {
        self.with_child(Node::Text(content.into()))
    }

    /// Look up an attribute value by exact name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

// The derived drop glue recurses once per nesting level, which overflows the
// stack on deeply nested input. Detach descendants onto a heap stack instead.
impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let Node::Element(mut el) = node {
                pending.append(&mut el.children);
            }
        }
    }
}

/// The top-level nodes produced by a parser.
///
/// A full document yields a single `html` element. A fragment yields whatever
/// appeared at its top level.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Document {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// The document's single root element, if it has exactly one significant
    /// top-level node and that node is an element.
    pub fn root_element(&self) -> Option<&Element> {
        let mut significant = self.nodes.iter().filter(|n| !n.is_blank_text());
        match (significant.next(), significant.next()) {
            (Some(Node::Element(el)), None) => Some(el),
            _ => None,
        }
    }
}
