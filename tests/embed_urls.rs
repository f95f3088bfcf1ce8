// tests/embed_urls.rs
// =============================================================================
// End-to-end tests: markdown (or mdast JSON) in, pipeline, HTML out.
//
// Embed fragments are checked by parsing them with `scraper` and looking at
// the elements and attributes, not by comparing whole strings.
// =============================================================================

use embed_urls::tree::{parse_markdown, parse_mdast, render_html, to_mdast};
use embed_urls::{embed_markdown, EmbedOptions, EmbedUrls, Node, NodeKind, Pipeline};
use scraper::{Html, Selector};

fn embed(markdown: &str) -> String {
    embed_markdown(markdown, &EmbedOptions::default()).unwrap()
}

fn select_attr(html: &str, selector: &str, attr: &str) -> Option<String> {
    let fragment = Html::parse_fragment(html);
    let selector = Selector::parse(selector).unwrap();
    let element = fragment.select(&selector).next()?;
    element.value().attr(attr).map(str::to_string)
}

fn select_text(html: &str, selector: &str) -> Option<String> {
    let fragment = Html::parse_fragment(html);
    let selector = Selector::parse(selector).unwrap();
    let element = fragment.select(&selector).next()?;
    Some(element.text().collect())
}

#[test]
fn test_youtube_paragraph_becomes_player() {
    let html = embed("https://www.youtube.com/watch?v=dQw4w9WgXcQ\n");

    assert_eq!(
        select_attr(&html, "div.embed-container > iframe", "src").as_deref(),
        Some("https://www.youtube.com/embed/dQw4w9WgXcQ")
    );
    assert_eq!(select_attr(&html, "iframe", "width").as_deref(), Some("100%"));
    assert!(select_attr(&html, "iframe", "allowfullscreen").is_some());
    let allow = select_attr(&html, "iframe", "allow").unwrap();
    assert!(allow.contains("autoplay"));
    assert!(allow.contains("clipboard-write"));
    assert!(!html.contains("<p>"));
}

#[test]
fn test_x_post_becomes_quote_block() {
    let url = "https://x.com/someuser/status/1234567890";
    let html = embed(&format!("{url}\n"));

    assert_eq!(
        select_attr(&html, "blockquote.twitter-tweet > a", "href").as_deref(),
        Some(url)
    );
    assert_eq!(
        select_attr(&html, "blockquote.twitter-tweet", "data-tweet-id").as_deref(),
        Some("1234567890")
    );
    assert_eq!(
        select_attr(&html, "script", "src").as_deref(),
        Some("https://platform.twitter.com/widgets.js")
    );
}

#[test]
fn test_github_repository_becomes_card() {
    let html = embed("https://github.com/owner/repo\n");

    assert_eq!(
        select_attr(&html, "div.github-embed > a", "href").as_deref(),
        Some("https://github.com/owner/repo")
    );
    assert_eq!(select_text(&html, "strong").as_deref(), Some("owner/repo"));
}

#[test]
fn test_github_deep_link_stays_a_paragraph() {
    let html = embed("https://github.com/owner/repo/tree/main\n");
    assert_eq!(html, "<p>https://github.com/owner/repo/tree/main</p>\n");
}

#[test]
fn test_zenn_article_becomes_card() {
    let url = "https://zenn.dev/user/articles/abc123";
    let html = embed(&format!("{url}\n"));

    assert_eq!(select_attr(&html, "div.zenn-embed > a", "href").as_deref(), Some(url));
    assert!(select_text(&html, "span").unwrap().contains("Zenn"));
    assert_eq!(select_text(&html, "strong").as_deref(), Some(url));
}

#[test]
fn test_link_with_custom_label_is_untouched() {
    let html = embed("[click here](https://example.com/foo)\n");
    assert_eq!(html, "<p><a href=\"https://example.com/foo\">click here</a></p>\n");

    let html = embed("[click here](https://youtu.be/abc)\n");
    assert!(html.starts_with("<p><a "));
}

#[test]
fn test_autolink_is_embedded() {
    let html = embed("<https://youtu.be/abc123>\n");
    assert_eq!(
        select_attr(&html, "iframe", "src").as_deref(),
        Some("https://www.youtube.com/embed/abc123")
    );
}

#[test]
fn test_url_inside_sentence_is_untouched() {
    let html = embed("Watch https://youtu.be/abc123 now\n");
    assert_eq!(html, "<p>Watch https://youtu.be/abc123 now</p>\n");
}

#[test]
fn test_emphasized_url_is_untouched() {
    let html = embed("*https://youtu.be/abc123*\n");
    assert_eq!(html, "<p><em>https://youtu.be/abc123</em></p>\n");
}

#[test]
fn test_nested_paragraphs_are_embedded() {
    let markdown = "> https://github.com/owner/repo\n\n- https://youtu.be/abc123\n\n- plain\n";
    let mut tree = parse_markdown(markdown);
    let report = EmbedUrls::default().transform(&mut tree);

    assert_eq!(report.rewrites.len(), 2);
    let quote = &tree.children[0];
    assert_eq!(quote.kind, NodeKind::BlockQuote);
    assert_eq!(quote.children[0].kind, NodeKind::RawFragment);

    let html = render_html(&tree);
    assert!(html.contains("<blockquote>\n<div class=\"github-embed\">"));
    assert!(html.contains("<li><div class=\"embed-container\">"));
    assert!(html.contains("<li><p>plain</p>\n</li>"));
}

#[test]
fn test_order_preserved_when_middle_paragraph_matches() {
    let markdown = "First paragraph.\n\nhttps://youtu.be/abc123\n\nThird paragraph.\n";
    let mut tree = parse_markdown(markdown);
    let before = tree.clone();
    EmbedUrls::default().transform(&mut tree);

    assert_eq!(tree.children.len(), 3);
    assert_eq!(tree.children[0], before.children[0]);
    assert_eq!(tree.children[1].kind, NodeKind::RawFragment);
    assert!(tree.children[1].children.is_empty());
    assert_eq!(tree.children[2], before.children[2]);
}

#[test]
fn test_second_run_changes_nothing() {
    let markdown = "https://youtu.be/abc123\n\nhttps://example.com\n";
    let embed = EmbedUrls::default();

    let mut tree = parse_markdown(markdown);
    embed.transform(&mut tree);
    let once = tree.clone();
    let report = embed.transform(&mut tree);

    assert_eq!(tree, once);
    assert!(report.rewrites.is_empty());
}

#[test]
fn test_mdast_from_remark_host() {
    // Roughly what remark-gfm hands over for a bare URL on its own line
    let json = r#"{
        "type": "root",
        "children": [
            {
                "type": "paragraph",
                "children": [
                    {
                        "type": "link",
                        "url": "https://twitter.com/someuser/status/42",
                        "title": null,
                        "children": [{ "type": "text", "value": "https://twitter.com/someuser/status/42" }]
                    }
                ]
            },
            { "type": "paragraph", "children": [{ "type": "text" }] },
            { "type": "math", "value": "x^2" }
        ]
    }"#;
    let mut tree = parse_mdast(json).unwrap();
    let build = Pipeline::new()
        .with(EmbedUrls::default())
        .run(&mut tree)
        .unwrap();

    assert_eq!(build.rewrites().count(), 1);
    assert_eq!(build.diagnostics().count(), 1);
    assert_eq!(tree.children[2].kind, NodeKind::Other("math".to_string()));

    let out: serde_json::Value = serde_json::from_str(&to_mdast(&tree).unwrap()).unwrap();
    assert_eq!(out["children"][0]["type"], "html");
    assert!(out["children"][0]["value"]
        .as_str()
        .unwrap()
        .contains("twitter-tweet"));
    assert_eq!(out["children"][2]["type"], "math");
}

#[test]
fn test_options_limit_providers() {
    let options =
        EmbedOptions::from_toml_str("providers = [\"github\"]\nvideo_height = 300\n").unwrap();
    let html = embed_markdown(
        "https://youtu.be/abc123\n\nhttps://github.com/owner/repo\n",
        &options,
    )
    .unwrap();

    assert!(html.starts_with("<p>https://youtu.be/abc123</p>\n"));
    assert!(html.contains("github-embed"));
}

#[test]
fn test_pipeline_rejects_non_root_tree() {
    let mut tree = Node::paragraph(vec![Node::text("https://youtu.be/abc123")]);
    let result = Pipeline::new().with(EmbedUrls::default()).run(&mut tree);
    assert!(result.is_err());
    assert_eq!(tree.kind, NodeKind::Paragraph);
}

#[test]
fn test_remark_tree_without_embeds_round_trips() {
    let json = r#"{
        "type": "root",
        "children": [
            {
                "type": "list",
                "ordered": false,
                "spread": false,
                "children": [
                    {
                        "type": "listItem",
                        "checked": true,
                        "spread": false,
                        "children": [
                            {
                                "type": "paragraph",
                                "children": [{ "type": "text", "value": "done" }]
                            }
                        ]
                    }
                ]
            },
            {
                "type": "paragraph",
                "children": [
                    {
                        "type": "linkReference",
                        "identifier": "docs",
                        "label": "Docs",
                        "referenceType": "full",
                        "children": [{ "type": "text", "value": "the docs" }]
                    }
                ],
                "position": {
                    "start": { "line": 3, "column": 1, "offset": 10 },
                    "end": { "line": 3, "column": 19, "offset": 28 }
                }
            },
            { "type": "code", "lang": "rust", "meta": "title=main.rs", "value": "fn main() {}" }
        ],
        "data": { "frontmatter": "none" }
    }"#;
    let before: serde_json::Value = serde_json::from_str(json).unwrap();

    let mut tree = parse_mdast(json).unwrap();
    let build = Pipeline::new()
        .with(EmbedUrls::default())
        .run(&mut tree)
        .unwrap();
    assert_eq!(build.rewrites().count(), 0);
    assert!(!build.has_diagnostics());

    let after: serde_json::Value = serde_json::from_str(&to_mdast(&tree).unwrap()).unwrap();
    assert_eq!(after, before);
}
