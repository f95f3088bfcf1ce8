// src/embed/mod.rs
// =============================================================================
// The URL-to-embed transformer.
//
// It walks every paragraph of a document and looks for one shape: a paragraph
// that holds nothing but a single URL. When that URL belongs to a provider we
// know (YouTube, Twitter/X, GitHub, Zenn), the paragraph is replaced in place
// by a raw HTML fragment with the provider's embed markup.
//
// Per paragraph the decision goes:
//   candidate?  -> matched?  -> rendered  -> replaced
// and nothing carries over from one paragraph to the next.
//
// Submodules:
// - provider: URL recognizers and the match type
// - template: the HTML for each provider
// =============================================================================

mod provider;
mod template;

use std::sync::Arc;

use tracing::{debug, trace, warn};

pub use provider::{match_url, Provider, ProviderMatch};
pub use template::render_embed;

use crate::config::EmbedOptions;
use crate::error::{EmbedError, Result};
use crate::pipeline::{PassReport, Rewrite, Transformer, TreePass};
use crate::tree::{visit_kind_mut, ChildSlot, Node, NodeKind};

// The transformer the host registers
//
// Cloning is cheap; the options are shared.
#[derive(Debug, Clone, Default)]
pub struct EmbedUrls {
    options: Arc<EmbedOptions>,
}

impl EmbedUrls {
    pub fn new(options: EmbedOptions) -> Self {
        EmbedUrls {
            options: Arc::new(options),
        }
    }

    pub fn options(&self) -> &EmbedOptions {
        &self.options
    }

    // Runs the embed pass directly, without a pipeline around it
    pub fn transform(&self, tree: &mut Node) -> PassReport {
        EmbedPass {
            options: Arc::clone(&self.options),
        }
        .run(tree)
    }
}

impl Transformer for EmbedUrls {
    fn name(&self) -> &'static str {
        "EmbedUrls"
    }

    fn markdown_passes(&self) -> Vec<Box<dyn TreePass>> {
        vec![Box::new(EmbedPass {
            options: Arc::clone(&self.options),
        })]
    }
}

struct EmbedPass {
    options: Arc<EmbedOptions>,
}

impl TreePass for EmbedPass {
    fn run(&self, tree: &mut Node) -> PassReport {
        let mut report = PassReport::default();

        visit_kind_mut(tree, &NodeKind::Paragraph, |mut slot| {
            report.visited += 1;

            // A malformed paragraph is skipped, not fatal
            let url = match candidate_url(slot.node()) {
                Ok(Some(url)) => url.to_string(),
                Ok(None) => return,
                Err(err) => {
                    warn!(index = slot.index(), error = %err, "skipping malformed paragraph");
                    report.diagnostics.push(err);
                    return;
                }
            };

            let Some(found) = match_url(&url, &self.options.providers) else {
                trace!(%url, "no provider for candidate url");
                return;
            };

            debug!(provider = %found.provider(), %url, "embedding url");
            report.rewrites.push(Rewrite {
                provider: found.provider().name().to_string(),
                url,
            });
            replace_with_embed(&mut slot, &found, &self.options);
        });

        report
    }
}

// Finds the single URL a paragraph consists of, if it is that kind of paragraph
//
// Two shapes qualify:
// - exactly one text child: its value, trimmed
// - exactly one link child whose label is one text node equal to the link's
//   destination (an autolink), giving the destination
//
// Anything else, including a link with its own label text, is not a
// candidate. An error means a node lacks a field its kind requires.
fn candidate_url(paragraph: &Node) -> Result<Option<&str>> {
    let [child] = paragraph.children.as_slice() else {
        return Ok(None);
    };

    let candidate = match child.kind {
        NodeKind::Text => required_value(child)?.trim(),
        NodeKind::Link => {
            let url = child
                .url
                .as_deref()
                .ok_or_else(|| EmbedError::MissingUrl {
                    kind: child.kind.clone(),
                })?;
            let [label] = child.children.as_slice() else {
                return Ok(None);
            };
            if !label.is(&NodeKind::Text) || required_value(label)? != url {
                return Ok(None);
            }
            url
        }
        _ => return Ok(None),
    };

    Ok((!candidate.is_empty()).then_some(candidate))
}

fn required_value(node: &Node) -> Result<&str> {
    node.value.as_deref().ok_or_else(|| EmbedError::MissingValue {
        kind: node.kind.clone(),
    })
}

// Replaces the paragraph in `slot` with the rendered embed
//
// The match is required, so this can only be called for a paragraph that
// actually matched. The new node takes the same index; siblings are untouched.
fn replace_with_embed(slot: &mut ChildSlot<'_>, found: &ProviderMatch, options: &EmbedOptions) {
    let fragment = render_embed(found, options);
    slot.replace(Node::raw_fragment(fragment));
}
