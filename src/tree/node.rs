// src/tree/node.rs
// =============================================================================
// The document tree: one `Node` type for every kind of block and inline.
//
// The shape follows mdast (the markdown syntax tree used by remark/unified):
// every node has a `type`, most have `children`, and leaves carry a `value`.
// Keeping that shape means a host written in another ecosystem can hand us its
// tree as JSON and read the mutated tree back.
//
// Fields are optional on purpose. A tree that comes in over JSON might be
// missing a field its kind needs (a text node with no value), and the embed
// pass has to notice that instead of panicking.
//
// Rust concepts:
// - serde attributes: rename fields/variants to match the JSON format
// - Option<T>: fields that only some node kinds use
// - From conversions: NodeKind <-> String for the `type` key
// =============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Every node kind the tree knows about
//
// `RawFragment` is a blob of pre-formatted HTML that later rendering emits
// verbatim. In mdast it is called "html", and that is the name on the wire.
// Anything we don't recognize is kept as `Other` so it survives a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Root,
    Paragraph,
    Heading,
    BlockQuote,
    List,
    ListItem,
    ThematicBreak,
    Code,
    Text,
    Emphasis,
    Strong,
    Delete,
    InlineCode,
    Break,
    Link,
    Image,
    RawFragment,
    Other(String),
}

impl NodeKind {
    /// The mdast `type` string for this kind
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading => "heading",
            NodeKind::BlockQuote => "blockquote",
            NodeKind::List => "list",
            NodeKind::ListItem => "listItem",
            NodeKind::ThematicBreak => "thematicBreak",
            NodeKind::Code => "code",
            NodeKind::Text => "text",
            NodeKind::Emphasis => "emphasis",
            NodeKind::Strong => "strong",
            NodeKind::Delete => "delete",
            NodeKind::InlineCode => "inlineCode",
            NodeKind::Break => "break",
            NodeKind::Link => "link",
            NodeKind::Image => "image",
            NodeKind::RawFragment => "html",
            NodeKind::Other(name) => name,
        }
    }
}

impl From<String> for NodeKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "root" => NodeKind::Root,
            "paragraph" => NodeKind::Paragraph,
            "heading" => NodeKind::Heading,
            "blockquote" => NodeKind::BlockQuote,
            "list" => NodeKind::List,
            "listItem" => NodeKind::ListItem,
            "thematicBreak" => NodeKind::ThematicBreak,
            "code" => NodeKind::Code,
            "text" => NodeKind::Text,
            "emphasis" => NodeKind::Emphasis,
            "strong" => NodeKind::Strong,
            "delete" => NodeKind::Delete,
            "inlineCode" => NodeKind::InlineCode,
            "break" => NodeKind::Break,
            "link" => NodeKind::Link,
            "image" => NodeKind::Image,
            "html" => NodeKind::RawFragment,
            _ => NodeKind::Other(name),
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// One node of the document tree
//
// Which optional fields are meaningful depends on `kind`:
//   value    -> text, inlineCode, code, html
//   url      -> link, image
//   title    -> link, image
//   alt      -> image
//   depth    -> heading
//   ordered  -> list (start is the first number of an ordered list)
//   lang     -> code
//
// Every other key (position, data, checked, spread, meta, identifier, ...)
// lands in `extra` untouched and is written back out as it came in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: NodeKind,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordered: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    /// A bare node of the given kind with no children and no fields set
    pub fn new(kind: NodeKind) -> Self {
        Node {
            kind,
            children: Vec::new(),
            value: None,
            url: None,
            title: None,
            alt: None,
            depth: None,
            ordered: None,
            start: None,
            lang: None,
            extra: Map::new(),
        }
    }

    pub fn root(children: Vec<Node>) -> Self {
        Node::new(NodeKind::Root).with_children(children)
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::new(NodeKind::Paragraph).with_children(children)
    }

    pub fn blockquote(children: Vec<Node>) -> Self {
        Node::new(NodeKind::BlockQuote).with_children(children)
    }

    pub fn emphasis(children: Vec<Node>) -> Self {
        Node::new(NodeKind::Emphasis).with_children(children)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Node::new(NodeKind::Text).with_value(value)
    }

    pub fn link(url: impl Into<String>, children: Vec<Node>) -> Self {
        let mut node = Node::new(NodeKind::Link).with_children(children);
        node.url = Some(url.into());
        node
    }

    /// A pre-rendered HTML fragment, emitted verbatim by the renderer
    pub fn raw_fragment(html: impl Into<String>) -> Self {
        Node::new(NodeKind::RawFragment).with_value(html)
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn is(&self, kind: &NodeKind) -> bool {
        &self.kind == kind
    }

    /// Concatenated text of this node and everything below it
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(node: &Node, out: &mut String) {
    match node.kind {
        NodeKind::Text | NodeKind::InlineCode => {
            if let Some(value) = &node.value {
                out.push_str(value);
            }
        }
        _ => {
            for child in &node.children {
                collect_text(child, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for name in ["root", "paragraph", "blockquote", "listItem", "inlineCode", "html"] {
            let kind = NodeKind::from(name.to_string());
            assert!(!matches!(kind, NodeKind::Other(_)), "{name} should be known");
            assert_eq!(String::from(kind), name);
        }
    }

    #[test]
    fn test_unknown_kind_is_preserved() {
        let kind = NodeKind::from("footnoteReference".to_string());
        assert_eq!(kind, NodeKind::Other("footnoteReference".to_string()));
        assert_eq!(kind.to_string(), "footnoteReference");
    }

    #[test]
    fn test_raw_fragment_serializes_as_html() {
        let node = Node::raw_fragment("<hr>");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "html", "value": "<hr>" }));
    }

    #[test]
    fn test_unmodelled_keys_are_kept() {
        let json = serde_json::json!({
            "type": "listItem",
            "checked": true,
            "spread": false,
            "children": [{ "type": "text", "value": "hi" }],
            "position": { "start": { "line": 1, "column": 1 } }
        });
        let node: Node = serde_json::from_value(json.clone()).unwrap();

        assert_eq!(node.kind, NodeKind::ListItem);
        assert_eq!(node.children, vec![Node::text("hi")]);
        assert_eq!(node.extra["checked"], Value::Bool(true));
        assert!(node.extra.contains_key("position"));
        assert_eq!(serde_json::to_value(&node).unwrap(), json);
    }

    #[test]
    fn test_plain_text_walks_inlines() {
        let node = Node::paragraph(vec![
            Node::text("see "),
            Node::emphasis(vec![Node::text("this")]),
        ]);
        assert_eq!(node.plain_text(), "see this");
    }
}
