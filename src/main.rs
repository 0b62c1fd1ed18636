// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;
use std::time::Instant;

use clap::Parser;
#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use lexis::binary::{decode_snapshot, SnapshotFooter, SnapshotHeader};
use lexis::{
    DefaultOperator, EngineConfig, ManifestSource, QueryResponse, RebuildReport, Result,
    SearchEngine, Snapshot,
};

mod cli;
use cli::display::*;
use cli::{Cli, Commands};

/// Log filter env var; defaults to warnings only so command output stays clean.
const LOG_ENV: &str = "LEXIS_LOG";

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("{}: {}", error_label(), e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Index {
            input,
            output,
            config,
        } => {
            let config = load_config(config.as_deref())?.with_index_path(&output);
            run_index(&input, config)
        }
        Commands::Search {
            file,
            query,
            limit,
            preview_length,
            and,
            console,
            config,
            json,
        } => {
            let mut config = match config {
                Some(path) => EngineConfig::from_json_file(&path)?,
                None if console => EngineConfig::console(),
                None => EngineConfig::default(),
            };
            if let Some(limit) = limit {
                config = config.with_top_k(limit);
            }
            if let Some(chars) = preview_length {
                config = config.with_preview_length(chars);
            }
            if and {
                config = config.with_default_operator(DefaultOperator::And);
            }
            run_search(&query, config.with_index_path(&file), json)
        }
        Commands::Inspect { file } => run_inspect(&file),
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_json_file(path),
        None => Ok(EngineConfig::default()),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// INDEX
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(feature = "parallel")]
fn manifest_source(input: &Path) -> (ManifestSource, ProgressBar) {
    let progress = ProgressBar::new(0).with_prefix("loading");
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    ) {
        progress.set_style(style.progress_chars("━━╸"));
    }
    let source = ManifestSource::new(input).with_progress(progress.clone());
    (source, progress)
}

#[cfg(feature = "parallel")]
fn finish_progress(progress: ProgressBar) {
    progress.finish_and_clear();
}

#[cfg(not(feature = "parallel"))]
fn manifest_source(input: &Path) -> (ManifestSource, ()) {
    (ManifestSource::new(input), ())
}

#[cfg(not(feature = "parallel"))]
fn finish_progress(_progress: ()) {}

fn run_index(input: &Path, config: EngineConfig) -> Result<()> {
    let start = Instant::now();
    let engine = SearchEngine::new(config)?;
    let (source, progress) = manifest_source(input);

    let report = engine.rebuild(&source);
    finish_progress(progress);
    let report = report?;

    let elapsed = start.elapsed().as_secs_f64() * 1000.0;
    print_rebuild_report(&report, engine.config(), elapsed);
    Ok(())
}

fn print_rebuild_report(report: &RebuildReport, config: &EngineConfig, elapsed_ms: f64) {
    section_top("INDEX");
    let path = config
        .index_path
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    row(&format!(" {} {}", pad_right("file", 16), path));
    row(&format!(" {} {}", pad_right("generation", 16), report.generation));
    row(&format!(
        " {} {}",
        pad_right("indexed", 16),
        themed(GREEN, &[BOLD], &report.indexed.to_string())
    ));
    row(&format!(" {} {}", pad_right("skipped", 16), report.skipped));
    row(&format!(
        " {} {}",
        pad_right("unreadable", 16),
        report.source_skipped
    ));
    row(&format!(" {} {}", pad_right("elapsed", 16), timing_ms(elapsed_ms)));

    if !report.failures.is_empty() {
        section_mid("SKIPPED DOCUMENTS");
        for failure in report.failures.iter().take(20) {
            let line = format!("#{:<6} {}", failure.position, failure.reason);
            row(&format!(" {}", themed(YELLOW, &[], &clip(&line, BOX_WIDTH - 2))));
        }
        if report.failures.len() > 20 {
            row(&dim(&format!(" ... and {} more", report.failures.len() - 20)));
        }
    }
    section_bot();
}

// ═══════════════════════════════════════════════════════════════════════════
// SEARCH
// ═══════════════════════════════════════════════════════════════════════════

fn run_search(query: &str, config: EngineConfig, json: bool) -> Result<()> {
    let engine = SearchEngine::new(config)?;

    let start = Instant::now();
    let response = engine.query(query)?;
    let elapsed = start.elapsed().as_secs_f64() * 1000.0;

    if json {
        let out = serde_json::to_string_pretty(&response)
            .map_err(|e| lexis::Error::Format(e.to_string()))?;
        println!("{}", out);
    } else {
        print_response(query, &response, elapsed);
    }
    Ok(())
}

fn print_response(query: &str, response: &QueryResponse, elapsed_ms: f64) {
    section_top(&format!("SEARCH \"{}\"", clip(query, 40)));
    row(&format!(
        " {} of {} hits · generation {} · {}",
        response.hits.len(),
        response.total_hits,
        response.generation,
        timing_ms(elapsed_ms)
    ));

    if response.is_empty() {
        row(&dim(" no matches"));
        section_bot();
        return;
    }

    let best = response.hits[0].score;
    for (rank, hit) in response.hits.iter().enumerate() {
        section_mid(&format!("#{}", rank + 1));
        let title = if hit.title.is_empty() {
            dim("(untitled)")
        } else {
            themed(BRIGHT_CYAN, &[BOLD], &clip(&one_line(&hit.title), BOX_WIDTH - 12))
        };
        row(&format!(" {} {}", score_value(hit.score, best), title));
        row(&format!(
            " {} {}",
            pad_left("", 7),
            themed(BLUE, &[], &clip(&hit.url, BOX_WIDTH - 10))
        ));
        if !hit.preview.is_empty() {
            row(&format!(
                " {} {}",
                pad_left("", 7),
                dim(&clip(&one_line(&hit.preview), BOX_WIDTH - 10))
            ));
        }
    }
    section_bot();
}

// ═══════════════════════════════════════════════════════════════════════════
// INSPECT
// ═══════════════════════════════════════════════════════════════════════════

fn run_inspect(path: &Path) -> Result<()> {
    let bytes = fs::read(path)?;
    let header = SnapshotHeader::read(&mut bytes.as_slice())?;
    let snapshot = decode_snapshot(&bytes)?;
    let integrity = snapshot.validate();

    print_header(path, bytes.len(), &header);
    print_fields(&snapshot);

    section_mid("INTEGRITY");
    row(&format!(
        " {} {}",
        pad_right("crc32", 16),
        themed(GREEN, &[], "ok")
    ));
    match &integrity {
        Ok(()) => row(&format!(
            " {} {}",
            pad_right("invariants", 16),
            themed(GREEN, &[], "ok")
        )),
        Err(e) => row(&format!(
            " {} {}",
            pad_right("invariants", 16),
            themed(RED, &[BOLD], &clip(&e.to_string(), BOX_WIDTH - 20))
        )),
    }
    section_bot();

    integrity.map_err(lexis::Error::from)
}

fn print_header(path: &Path, file_size: usize, header: &SnapshotHeader) {
    section_top("SNAPSHOT");
    row(&format!(" {} {}", pad_right("file", 16), path.display()));
    row(&format!(" {} {}", pad_right("size", 16), format_size(file_size)));
    row(&format!(" {} v{}", pad_right("format", 16), header.version));
    row(&format!(" {} {}", pad_right("generation", 16), header.generation));
    row(&format!(" {} {}", pad_right("documents", 16), header.doc_count));
    row(&format!(" {} {}", pad_right("fields", 16), header.field_count));

    section_mid("LAYOUT");
    let sections = [
        ("header", SnapshotHeader::SIZE),
        ("stored", header.stored_len as usize),
        ("fields", header.fields_len as usize),
        ("footer", SnapshotFooter::SIZE),
    ];
    for (name, len) in sections {
        row(&format!(
            " {} {}",
            pad_right(name, 16),
            pad_left(&format_size(len), 10)
        ));
    }
}

fn print_fields(snapshot: &Snapshot) {
    for (name, field) in snapshot.fields() {
        section_mid(&format!("FIELD {}", name));
        row(&format!(" {} {}", pad_right("terms", 16), field.term_count()));
        row(&format!(" {} {}", pad_right("tokens", 16), field.total_length()));
        row(&format!(
            " {} {:.2}",
            pad_right("avg length", 16),
            field.average_length()
        ));

        let mut terms: Vec<(&str, usize)> = field
            .terms()
            .map(|(term, postings)| (term, postings.len()))
            .collect();
        terms.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        let top: Vec<String> = terms
            .iter()
            .take(6)
            .map(|(term, df)| format!("{}{}", term, dim(&format!("({})", df))))
            .collect();
        if !top.is_empty() {
            row(&format!(" {} {}", pad_right("top terms", 16), top.join(" ")));
        }
    }
}
