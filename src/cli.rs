// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Two subcommands:
// - render: run the embed pass over a document and print the result
// - check: run the embed pass and report what it would embed
// =============================================================================

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "embed-urls",
    version,
    about = "Turn bare YouTube, Twitter/X, GitHub and Zenn URLs in markdown into embeds",
    long_about = "embed-urls finds paragraphs that contain nothing but a single URL from a known \
                  provider and replaces them with embed markup (video players, tweet cards, \
                  repository and article cards)."
)]
pub struct Cli {
    /// Print debug logs to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

// What kind of document we are reading
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    /// CommonMark text
    Markdown,
    /// An mdast JSON tree
    Mdast,
}

// What we print after the pass
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Rendered HTML
    Html,
    /// The mutated tree as mdast JSON
    Mdast,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Embed URLs in a document and print the result
    ///
    /// Example: embed-urls render post.md > post.html
    Render {
        /// Document to read
        file: PathBuf,

        /// Input format
        #[arg(long, value_enum, default_value_t = InputFormat::Markdown)]
        from: InputFormat,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
        to: OutputFormat,

        /// TOML file with embed options
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List the paragraphs that would become embeds
    ///
    /// Example: embed-urls check docs/*.md --json
    Check {
        /// Documents to read
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Input format
        #[arg(long, value_enum, default_value_t = InputFormat::Markdown)]
        from: InputFormat,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,

        /// TOML file with embed options
        #[arg(long)]
        config: Option<PathBuf>,
    },
}
