// src/tree/parse.rs
// =============================================================================
// This module builds a document tree from Markdown text (or mdast JSON).
//
// We use the `pulldown-cmark` crate which:
// - Parses Markdown into events (heading, paragraph, link, etc.)
// - Follows the CommonMark specification
// - Is a streaming parser, so it gives us a flat list of Start/End events
//
// The embed pass wants a tree, not a stream, so we fold the events back into
// nested `Node`s with a stack: Start pushes, End pops and attaches the node to
// its parent.
//
// A host that already has an mdast tree (remark, unified, ...) can skip the
// Markdown step entirely and hand us JSON instead.
// =============================================================================

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

use super::node::{Node, NodeKind};
use crate::error::Result;

// Parses Markdown text into a document tree
//
// Example input:
//   "https://youtu.be/abc\n\n> quoted"
//
// Example output:
//   root
//   ├── paragraph
//   │   └── text "https://youtu.be/abc"
//   └── blockquote
//       └── paragraph
//           └── text "quoted"
pub fn parse_markdown(markdown: &str) -> Node {
    let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH);

    let mut builder = TreeBuilder::new();

    for event in parser {
        match event {
            Event::Start(tag) => builder.open(tag_node(tag)),
            Event::End(_) => builder.close(),
            Event::Text(text) => builder.push_text(&text),
            Event::Code(code) => {
                builder.append(Node::new(NodeKind::InlineCode).with_value(code.to_string()))
            }
            Event::Html(html) => builder.push_html(&html),
            // mdast keeps soft line breaks inside the text value
            Event::SoftBreak => builder.push_text("\n"),
            Event::HardBreak => builder.append(Node::new(NodeKind::Break)),
            Event::Rule => builder.append(Node::new(NodeKind::ThematicBreak)),
            Event::FootnoteReference(label) => {
                let node = Node::new(NodeKind::Other("footnoteReference".into()));
                builder.append(node.with_value(label.to_string()));
            }
            // Task lists aren't enabled, so this never fires
            Event::TaskListMarker(_) => {}
        }
    }

    builder.finish()
}

// Parses an mdast JSON document into a tree
pub fn parse_mdast(json: &str) -> Result<Node> {
    Ok(serde_json::from_str(json)?)
}

// Serializes a tree back to pretty-printed mdast JSON
pub fn to_mdast(tree: &Node) -> Result<String> {
    Ok(serde_json::to_string_pretty(tree)?)
}

// Maps a pulldown-cmark tag to an empty node of the matching kind
fn tag_node(tag: Tag<'_>) -> Node {
    match tag {
        Tag::Paragraph => Node::new(NodeKind::Paragraph),
        Tag::Heading(level, _, _) => {
            let mut node = Node::new(NodeKind::Heading);
            node.depth = Some(level as u8);
            node
        }
        Tag::BlockQuote => Node::new(NodeKind::BlockQuote),
        Tag::CodeBlock(kind) => {
            let mut node = Node::new(NodeKind::Code).with_value("");
            if let CodeBlockKind::Fenced(info) = kind {
                node.lang = info.split_whitespace().next().map(str::to_string);
            }
            node
        }
        Tag::List(start) => {
            let mut node = Node::new(NodeKind::List);
            node.ordered = Some(start.is_some());
            node.start = start;
            node
        }
        Tag::Item => Node::new(NodeKind::ListItem),
        Tag::Emphasis => Node::new(NodeKind::Emphasis),
        Tag::Strong => Node::new(NodeKind::Strong),
        Tag::Strikethrough => Node::new(NodeKind::Delete),
        Tag::Link(_link_type, dest_url, title) => {
            let mut node = Node::new(NodeKind::Link);
            node.url = Some(dest_url.to_string());
            node.title = non_empty(&title);
            node
        }
        Tag::Image(_link_type, dest_url, title) => {
            let mut node = Node::new(NodeKind::Image);
            node.url = Some(dest_url.to_string());
            node.title = non_empty(&title);
            node.alt = Some(String::new());
            node
        }
        Tag::FootnoteDefinition(_) => Node::new(NodeKind::Other("footnoteDefinition".into())),
        Tag::Table(_) => Node::new(NodeKind::Other("table".into())),
        Tag::TableHead | Tag::TableRow => Node::new(NodeKind::Other("tableRow".into())),
        Tag::TableCell => Node::new(NodeKind::Other("tableCell".into())),
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

// Folds the flat event stream back into a tree
//
// `open` holds the nodes whose End event we haven't seen yet, innermost last.
// Anything appended goes to the innermost open node, or to the root.
struct TreeBuilder {
    root: Node,
    open: Vec<Node>,
}

impl TreeBuilder {
    fn new() -> Self {
        TreeBuilder {
            root: Node::root(Vec::new()),
            open: Vec::new(),
        }
    }

    fn current(&mut self) -> &mut Node {
        self.open.last_mut().unwrap_or(&mut self.root)
    }

    fn open(&mut self, node: Node) {
        self.open.push(node);
    }

    fn close(&mut self) {
        if let Some(node) = self.open.pop() {
            self.append(node);
        }
    }

    fn append(&mut self, node: Node) {
        self.current().children.push(node);
    }

    // Text lands in different places depending on where we are:
    // - inside a code block it is the block's value
    // - inside an image it is the alt text
    // - anywhere else it is a text node, merged with a text node right before
    //   it (pulldown-cmark may split one run of text into several events)
    fn push_text(&mut self, text: &str) {
        let current = self.current();
        match current.kind {
            NodeKind::Code => push_str(&mut current.value, text),
            NodeKind::Image => push_str(&mut current.alt, text),
            _ => {
                if last_is(&current.children, &NodeKind::Text) {
                    if let Some(last) = current.children.last_mut() {
                        push_str(&mut last.value, text);
                    }
                } else {
                    current.children.push(Node::text(text));
                }
            }
        }
    }

    // Consecutive HTML events belong to the same HTML block or inline run
    fn push_html(&mut self, html: &str) {
        let current = self.current();
        if last_is(&current.children, &NodeKind::RawFragment) {
            if let Some(last) = current.children.last_mut() {
                push_str(&mut last.value, html);
            }
        } else {
            current.children.push(Node::raw_fragment(html));
        }
    }

    fn finish(mut self) -> Node {
        while !self.open.is_empty() {
            self.close();
        }
        self.root
    }
}

fn last_is(children: &[Node], kind: &NodeKind) -> bool {
    children.last().is_some_and(|last| last.is(kind))
}

fn push_str(slot: &mut Option<String>, text: &str) {
    slot.get_or_insert_with(String::new).push_str(text);
}
