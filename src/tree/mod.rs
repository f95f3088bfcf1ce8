// src/tree/mod.rs
// =============================================================================
// The document tree and everything that reads or writes it.
//
// Submodules:
// - node: the `Node` type (mdast-shaped, serde-friendly)
// - parse: Markdown / mdast JSON -> tree, tree -> mdast JSON
// - visit: pre-order traversal that hands out replaceable child slots
// - render: tree -> HTML, raw fragments emitted verbatim
// =============================================================================

mod node;
mod parse;
mod render;
mod visit;

pub use node::{Node, NodeKind};
pub use parse::{parse_markdown, parse_mdast, to_mdast};
pub use render::render_html;
pub use visit::{visit_kind_mut, ChildSlot};
