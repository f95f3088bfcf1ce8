// src/embed/template.rs
// =============================================================================
// HTML templates, one per provider.
//
// Every fragment is a single self-contained block: it doesn't rely on any
// state in the renderer, because the renderer just pastes it in. Nothing here
// is escaped; the URLs that reach this point already matched a strict pattern.
// =============================================================================

use super::provider::ProviderMatch;
use crate::config::EmbedOptions;

const CARD_STYLE: &str =
    "border: 1px solid var(--lightgray); border-radius: 6px; padding: 16px; margin: 16px 0;";
const HINT_STYLE: &str = "color: var(--gray); font-size: 0.9rem;";

// Builds the embed fragment for a match
pub fn render_embed(found: &ProviderMatch, options: &EmbedOptions) -> String {
    match found {
        ProviderMatch::Video { id } => video_player(id, options.video_height),
        ProviderMatch::Post { id, url } => post_quote(id, url),
        ProviderMatch::Repository { owner, repo, url } => repository_card(owner, repo, url),
        ProviderMatch::Article { url } => article_card(url),
    }
}

fn video_player(id: &str, height: u32) -> String {
    format!(
        concat!(
            r#"<div class="embed-container">"#,
            r#"<iframe width="100%" height="{height}" src="https://www.youtube.com/embed/{id}" frameborder="0" "#,
            r#"allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture" allowfullscreen>"#,
            r#"</iframe></div>"#,
        ),
        height = height,
        id = id,
    )
}

// The quote is a placeholder; Twitter's widgets.js swaps it for the real card
fn post_quote(id: &str, url: &str) -> String {
    format!(
        concat!(
            r#"<div class="embed-container">"#,
            r#"<blockquote class="twitter-tweet" data-tweet-id="{id}">"#,
            r#"<a href="{url}"></a></blockquote>"#,
            r#"<script async src="https://platform.twitter.com/widgets.js" charset="utf-8"></script>"#,
            r#"</div>"#,
        ),
        id = id,
        url = url,
    )
}

fn repository_card(owner: &str, repo: &str, url: &str) -> String {
    format!(
        concat!(
            r#"<div class="github-embed">"#,
            r#"<a href="{url}" target="_blank" rel="noopener noreferrer">"#,
            r#"<div style="{card}"><strong>{owner}/{repo}</strong><br>"#,
            r#"<span style="{hint}">View on GitHub →</span></div>"#,
            r#"</a></div>"#,
        ),
        url = url,
        card = CARD_STYLE,
        owner = owner,
        repo = repo,
        hint = HINT_STYLE,
    )
}

fn article_card(url: &str) -> String {
    format!(
        concat!(
            r#"<div class="zenn-embed">"#,
            r#"<a href="{url}" target="_blank" rel="noopener noreferrer">"#,
            r#"<div style="{card}"><span style="{hint}">📝 Zenn →</span><br>"#,
            r#"<strong>{url}</strong></div>"#,
            r#"</a></div>"#,
        ),
        url = url,
        card = CARD_STYLE,
        hint = HINT_STYLE,
    )
}
