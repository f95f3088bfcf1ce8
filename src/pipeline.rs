// src/pipeline.rs
// =============================================================================
// A minimal build pipeline host.
//
// The host knows nothing about embeds. It only understands the registration
// contract every transformer follows:
// - a stable name, used for ordering and diagnostics
// - a list of tree passes to run during the markdown phase
//
// Passes run in registration order, one document at a time. A pass gets the
// whole tree by `&mut` for the duration of its run, so no locking is needed;
// different documents can go through the same pipeline from different
// threads because transformers and passes are `Send + Sync`.
// =============================================================================

use serde::Serialize;
use tracing::debug;

use crate::error::{EmbedError, Result};
use crate::tree::{Node, NodeKind};

// Something the host can compose with other transformers
pub trait Transformer: Send + Sync {
    /// Stable name, shown in logs and reports
    fn name(&self) -> &'static str;

    /// The passes to run over each document's tree
    fn markdown_passes(&self) -> Vec<Box<dyn TreePass>>;
}

// One tree-visitor run
pub trait TreePass: Send + Sync {
    fn run(&self, tree: &mut Node) -> PassReport;
}

// One paragraph that a pass rewrote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rewrite {
    pub provider: String,
    pub url: String,
}

// What a single pass did to a single document
//
// Diagnostics are problems with the input tree that made the pass skip a node.
// They are reported, never raised.
#[derive(Debug, Default)]
pub struct PassReport {
    pub visited: usize,
    pub rewrites: Vec<Rewrite>,
    pub diagnostics: Vec<EmbedError>,
}

impl PassReport {
    fn absorb(&mut self, other: PassReport) {
        self.visited += other.visited;
        self.rewrites.extend(other.rewrites);
        self.diagnostics.extend(other.diagnostics);
    }
}

#[derive(Debug)]
pub struct StageReport {
    pub name: &'static str,
    pub report: PassReport,
}

// Everything the pipeline did to one document, stage by stage
#[derive(Debug, Default)]
pub struct BuildReport {
    pub stages: Vec<StageReport>,
}

impl BuildReport {
    pub fn rewrites(&self) -> impl Iterator<Item = &Rewrite> {
        self.stages.iter().flat_map(|stage| &stage.report.rewrites)
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = (&'static str, &EmbedError)> {
        self.stages
            .iter()
            .flat_map(|stage| stage.report.diagnostics.iter().map(move |d| (stage.name, d)))
    }

    pub fn has_diagnostics(&self) -> bool {
        self.diagnostics().next().is_some()
    }
}

struct Registered {
    name: &'static str,
    passes: Vec<Box<dyn TreePass>>,
}

#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Registered>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    // Registers a transformer; its passes are produced once, here
    pub fn with<T: Transformer>(mut self, transformer: T) -> Self {
        self.stages.push(Registered {
            name: transformer.name(),
            passes: transformer.markdown_passes(),
        });
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name).collect()
    }

    // Runs every registered pass over one document tree, in order
    //
    // The tree must be rooted at a `root` node; anything else is refused
    // before any pass touches it.
    pub fn run(&self, tree: &mut Node) -> Result<BuildReport> {
        if tree.kind != NodeKind::Root {
            return Err(EmbedError::InvalidTree(format!(
                "expected a root node, found {}",
                tree.kind
            )));
        }

        let mut build = BuildReport::default();
        for stage in &self.stages {
            let mut report = PassReport::default();
            for pass in &stage.passes {
                report.absorb(pass.run(tree));
            }
            debug!(
                stage = stage.name,
                visited = report.visited,
                rewrites = report.rewrites.len(),
                diagnostics = report.diagnostics.len(),
                "stage finished"
            );
            build.stages.push(StageReport {
                name: stage.name,
                report,
            });
        }
        Ok(build)
    }
}
