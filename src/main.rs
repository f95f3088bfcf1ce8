// src/main.rs
// =============================================================================
// This is the entry point of the embed-urls command-line host.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, to stderr)
// 3. Read the document(s), build the tree, run the pipeline
// 4. Print the result, exit with a proper code
//    (0 = success, 1 = a document had malformed nodes, 2 = error)
//
// All the real work lives in the library; this file is glue.
// =============================================================================

mod cli;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, InputFormat, OutputFormat};
use embed_urls::pipeline::Rewrite;
use embed_urls::{tree, BuildReport, EmbedOptions, EmbedUrls, Node, Pipeline};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG wins if it is set; otherwise --verbose picks debug over warn
fn init_logging(verbose: bool) {
    let default = if verbose { "embed_urls=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Render {
            file,
            from,
            to,
            config,
        } => {
            let pipeline = build_pipeline(config.as_deref())?;
            handle_render(&pipeline, &file, from, to)
        }
        Commands::Check {
            files,
            from,
            json,
            config,
        } => {
            let pipeline = build_pipeline(config.as_deref())?;
            handle_check(&pipeline, &files, from, json)
        }
    }
}

fn build_pipeline(config: Option<&Path>) -> Result<Pipeline> {
    let options = match config {
        Some(path) => EmbedOptions::load(path)
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => EmbedOptions::default(),
    };
    Ok(Pipeline::new().with(EmbedUrls::new(options)))
}

// Reads one document and runs the pipeline over it
fn process(pipeline: &Pipeline, file: &Path, from: InputFormat) -> Result<(Node, BuildReport)> {
    let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;

    let mut doc = match from {
        InputFormat::Markdown => tree::parse_markdown(&text),
        InputFormat::Mdast => tree::parse_mdast(&text)
            .with_context(|| format!("parsing mdast from {}", file.display()))?,
    };

    let report = pipeline
        .run(&mut doc)
        .with_context(|| format!("transforming {}", file.display()))?;

    info!(
        file = %file.display(),
        embeds = report.rewrites().count(),
        "document processed"
    );
    Ok((doc, report))
}

// Handles the 'render' subcommand
fn handle_render(
    pipeline: &Pipeline,
    file: &Path,
    from: InputFormat,
    to: OutputFormat,
) -> Result<i32> {
    let (doc, report) = process(pipeline, file, from)?;

    for (stage, diagnostic) in report.diagnostics() {
        eprintln!("⚠️  {}: {}: {}", file.display(), stage, diagnostic);
    }

    match to {
        OutputFormat::Html => print!("{}", tree::render_html(&doc)),
        OutputFormat::Mdast => println!("{}", tree::to_mdast(&doc)?),
    }

    Ok(0)
}

// One document's findings, as printed by `check --json`
#[derive(Debug, Serialize)]
struct DocumentCheck {
    file: String,
    embeds: Vec<Rewrite>,
    diagnostics: Vec<String>,
}

// Handles the 'check' subcommand
fn handle_check(
    pipeline: &Pipeline,
    files: &[PathBuf],
    from: InputFormat,
    json: bool,
) -> Result<i32> {
    let mut checks = Vec::new();
    for file in files {
        let (_doc, report) = process(pipeline, file, from)?;
        checks.push(DocumentCheck {
            file: file.display().to_string(),
            embeds: report.rewrites().cloned().collect(),
            diagnostics: report
                .diagnostics()
                .map(|(stage, d)| format!("{}: {}", stage, d))
                .collect(),
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&checks)?);
    } else {
        print_table(&checks);
    }

    let has_problems = checks.iter().any(|c| !c.diagnostics.is_empty());
    Ok(if has_problems { 1 } else { 0 })
}

// Prints results as a human-readable table in the terminal
fn print_table(checks: &[DocumentCheck]) {
    println!("{:<30} {:<10} {:<60}", "FILE", "PROVIDER", "URL");
    println!("{}", "=".repeat(100));

    for check in checks {
        let file_display = truncate(&check.file, 27);
        for embed in &check.embeds {
            println!("{:<30} {:<10} {:<60}", file_display, embed.provider, embed.url);
        }
        for diagnostic in &check.diagnostics {
            println!("{:<30} {:<10} {:<60}", file_display, "⚠️", diagnostic);
        }
    }

    println!();

    let embed_count: usize = checks.iter().map(|c| c.embeds.len()).sum();
    let problem_count: usize = checks.iter().map(|c| c.diagnostics.len()).sum();

    println!("📊 Summary:");
    println!("   📄 Documents: {}", checks.len());
    println!("   🔗 Embeds: {}", embed_count);
    println!("   ⚠️  Malformed nodes: {}", problem_count);
}

// Shortens long paths so the table stays aligned
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
