// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the lexis command-line interface.
//!
//! Three subcommands: `index` builds a snapshot file from a crawl directory,
//! `search` queries one, and `inspect` prints what is inside it.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lexis",
    about = "BM25 full-text search over crawled web pages",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a snapshot file from a directory of crawled pages
    Index {
        /// Input directory containing manifest.json and page files
        #[arg(short, long)]
        input: PathBuf,

        /// Snapshot file to write (replaced atomically)
        #[arg(short, long)]
        output: PathBuf,

        /// Engine configuration as JSON (analyzer, fields, BM25 constants)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Search a snapshot file and display ranked results
    Search {
        /// Path to the snapshot file
        file: PathBuf,

        /// Query, e.g. `+cat -dog title:pets`
        query: String,

        /// Maximum number of results to return
        #[arg(short, long)]
        limit: Option<usize>,

        /// Maximum preview length in characters
        #[arg(short, long)]
        preview_length: Option<usize>,

        /// Treat bare terms as required instead of optional
        #[arg(long)]
        and: bool,

        /// Use the console preset (30 results, 30-character previews)
        #[arg(long)]
        console: bool,

        /// Engine configuration as JSON; must match the one used to index
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the response as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Inspect a snapshot file
    Inspect {
        /// Path to the snapshot file
        file: PathBuf,
    },
}
