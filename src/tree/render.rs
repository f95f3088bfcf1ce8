// src/tree/render.rs
// =============================================================================
// Turns a document tree into HTML.
//
// This is the "later rendering stage" the embed pass feeds into. Text is
// escaped with pulldown-cmark's escaping helpers; raw fragments (`html` nodes)
// are written out verbatim, which is how the embed markup reaches the page.
// =============================================================================

use pulldown_cmark::escape::{escape_href, escape_html};

use super::node::{Node, NodeKind};

pub fn render_html(tree: &Node) -> String {
    let mut out = String::new();
    render_node(tree, &mut out);
    out
}

fn render_node(node: &Node, out: &mut String) {
    match &node.kind {
        NodeKind::Root | NodeKind::Other(_) => render_blocks(&node.children, out),
        NodeKind::Paragraph => {
            out.push_str("<p>");
            render_inlines(&node.children, out);
            out.push_str("</p>\n");
        }
        NodeKind::Heading => {
            let depth = node.depth.unwrap_or(1).clamp(1, 6);
            out.push_str(&format!("<h{depth}>"));
            render_inlines(&node.children, out);
            out.push_str(&format!("</h{depth}>\n"));
        }
        NodeKind::BlockQuote => {
            out.push_str("<blockquote>\n");
            render_blocks(&node.children, out);
            out.push_str("</blockquote>\n");
        }
        NodeKind::List => {
            match (node.ordered, node.start) {
                (Some(true), Some(start)) if start != 1 => {
                    out.push_str(&format!("<ol start=\"{start}\">\n"))
                }
                (Some(true), _) => out.push_str("<ol>\n"),
                _ => out.push_str("<ul>\n"),
            }
            render_blocks(&node.children, out);
            out.push_str(if node.ordered == Some(true) { "</ol>\n" } else { "</ul>\n" });
        }
        NodeKind::ListItem => {
            out.push_str("<li>");
            render_blocks(&node.children, out);
            out.push_str("</li>\n");
        }
        NodeKind::ThematicBreak => out.push_str("<hr />\n"),
        NodeKind::Code => {
            match &node.lang {
                Some(lang) => {
                    out.push_str("<pre><code class=\"language-");
                    push_escaped(out, lang);
                    out.push_str("\">");
                }
                None => out.push_str("<pre><code>"),
            }
            push_escaped(out, node.value.as_deref().unwrap_or_default());
            out.push_str("</code></pre>\n");
        }
        NodeKind::Text => push_escaped(out, node.value.as_deref().unwrap_or_default()),
        NodeKind::Emphasis => wrap_inlines("em", node, out),
        NodeKind::Strong => wrap_inlines("strong", node, out),
        NodeKind::Delete => wrap_inlines("del", node, out),
        NodeKind::InlineCode => {
            out.push_str("<code>");
            push_escaped(out, node.value.as_deref().unwrap_or_default());
            out.push_str("</code>");
        }
        NodeKind::Break => out.push_str("<br />\n"),
        NodeKind::Link => {
            out.push_str("<a href=\"");
            push_href(out, node.url.as_deref().unwrap_or_default());
            out.push('"');
            push_title(out, node.title.as_deref());
            out.push('>');
            render_inlines(&node.children, out);
            out.push_str("</a>");
        }
        NodeKind::Image => {
            out.push_str("<img src=\"");
            push_href(out, node.url.as_deref().unwrap_or_default());
            out.push_str("\" alt=\"");
            push_escaped(out, node.alt.as_deref().unwrap_or_default());
            out.push('"');
            push_title(out, node.title.as_deref());
            out.push_str(" />");
        }
        NodeKind::RawFragment => out.push_str(node.value.as_deref().unwrap_or_default()),
    }
}

// Block children each end on their own line, so a raw fragment sitting where
// a paragraph used to be doesn't run into the next block
fn render_blocks(children: &[Node], out: &mut String) {
    for child in children {
        render_node(child, out);
        if child.is(&NodeKind::RawFragment) && !out.ends_with('\n') {
            out.push('\n');
        }
    }
}

fn render_inlines(children: &[Node], out: &mut String) {
    for child in children {
        render_node(child, out);
    }
}

fn wrap_inlines(tag: &str, node: &Node, out: &mut String) {
    out.push_str(&format!("<{tag}>"));
    render_inlines(&node.children, out);
    out.push_str(&format!("</{tag}>"));
}

fn push_title(out: &mut String, title: Option<&str>) {
    if let Some(title) = title {
        out.push_str(" title=\"");
        push_escaped(out, title);
        out.push('"');
    }
}

fn push_escaped(out: &mut String, text: &str) {
    let _ = escape_html(&mut *out, text);
}

fn push_href(out: &mut String, href: &str) {
    let _ = escape_href(&mut *out, href);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parse_markdown;

    #[test]
    fn test_render_paragraph_escapes_text() {
        let tree = Node::root(vec![Node::paragraph(vec![Node::text("a < b & c")])]);
        assert_eq!(render_html(&tree), "<p>a &lt; b &amp; c</p>\n");
    }

    #[test]
    fn test_raw_fragment_is_verbatim() {
        let tree = Node::root(vec![
            Node::raw_fragment("<div class=\"x\">&</div>"),
            Node::paragraph(vec![Node::text("after")]),
        ]);
        assert_eq!(render_html(&tree), "<div class=\"x\">&</div>\n<p>after</p>\n");
    }

    #[test]
    fn test_render_markdown_document() {
        let tree = parse_markdown("# Hi\n\nSee [docs](https://example.com \"Docs\").\n\n---\n");
        assert_eq!(
            render_html(&tree),
            "<h1>Hi</h1>\n<p>See <a href=\"https://example.com\" title=\"Docs\">docs</a>.</p>\n<hr />\n"
        );
    }

    #[test]
    fn test_render_ordered_list_with_start() {
        let tree = parse_markdown("3. three\n4. four\n");
        assert_eq!(
            render_html(&tree),
            "<ol start=\"3\">\n<li>three</li>\n<li>four</li>\n</ol>\n"
        );
    }
}
