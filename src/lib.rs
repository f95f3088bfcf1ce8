// src/lib.rs
// =============================================================================
// embed-urls: a markdown pipeline stage that turns bare URLs into embeds.
//
// A paragraph that is nothing but a link to a YouTube video, a tweet, a GitHub
// repository or a Zenn article gets replaced by a ready-made HTML block: a
// video player, a tweet card, a repository card, an article card.
//
// Layout:
// - tree: the document tree, plus Markdown/mdast parsing and HTML rendering
// - embed: the EmbedUrls transformer (matching, templates, rewriting)
// - pipeline: the host side; composes transformers and runs their passes
// - config: EmbedOptions, loadable from TOML
// - error: EmbedError
//
// Quick use:
//   let html = embed_urls::embed_markdown("https://youtu.be/abc", &Default::default())?;
// =============================================================================

pub mod config;
pub mod embed;
pub mod error;
pub mod pipeline;
pub mod tree;

pub use config::EmbedOptions;
pub use embed::{EmbedUrls, Provider, ProviderMatch};
pub use error::{EmbedError, Result};
pub use pipeline::{BuildReport, PassReport, Pipeline, Transformer, TreePass};
pub use tree::{Node, NodeKind};

// Markdown in, HTML out, with the embed pass in between
pub fn embed_markdown(markdown: &str, options: &EmbedOptions) -> Result<String> {
    let mut tree = tree::parse_markdown(markdown);
    Pipeline::new()
        .with(EmbedUrls::new(options.clone()))
        .run(&mut tree)?;
    Ok(tree::render_html(&tree))
}
