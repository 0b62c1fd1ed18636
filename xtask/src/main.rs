//! Custom cargo commands for the lexis crate.
//!
//! Usage:
//!   cargo xtask verify    - Run full verification suite
//!   cargo xtask test      - Run all tests, with and without default features
//!   cargo xtask check     - Quick check (check + test + clippy)
//!   cargo xtask bench     - Run benchmarks
//!   cargo xtask fuzz      - Run every fuzz target briefly (needs nightly)

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

const FUZZ_TARGETS: [&str; 4] = [
    "query_parser",
    "search_queries",
    "snapshot_decode",
    "varint_codec",
];

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        Some("fuzz") => fuzz(env::args().nth(2).as_deref())?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify    Run full verification suite (tests, clippy, docs, constants)
  test      Run all Rust tests, with and without default features
  check     Quick check (cargo check + test + clippy)
  bench     Run benchmarks
  fuzz      Run fuzz targets for 30s each [SECONDS]
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("lexis Verification Suite");
    println!("==========================================\n");

    println!("[1/5] Running Rust tests...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ All Rust tests passed\n");

    println!("[2/5] Running tests without default features...");
    run_cargo(&["test", "--quiet", "--no-default-features"])?;
    println!("✓ Sequential build passed\n");

    println!("[3/5] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--all-targets", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[4/5] Building docs...");
    run_cargo(&["doc", "--quiet", "--no-deps"])?;
    println!("✓ Docs build\n");

    println!("[5/5] Checking documented BM25 constants...");
    verify_constants()?;
    println!("✓ Constants aligned\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])?;
    run_cargo(&["test", "--no-default-features"])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check", "--all-targets"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

/// Run each fuzz target for a bounded time.
fn fuzz(seconds: Option<&str>) -> Result<()> {
    let seconds: u64 = match seconds {
        Some(s) => s.parse().with_context(|| format!("invalid seconds: {}", s))?,
        None => 30,
    };
    let max_time = format!("-max_total_time={}", seconds);
    for target in FUZZ_TARGETS {
        println!("fuzzing {} for {}s...", target, seconds);
        run_cargo(&["+nightly", "fuzz", "run", target, "--", &max_time])?;
    }
    Ok(())
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

/// The README documents k1 and b; keep it in step with `src/config.rs`.
fn verify_constants() -> Result<()> {
    let root = project_root()?;

    let config_rs = std::fs::read_to_string(root.join("src/config.rs"))
        .context("Failed to read src/config.rs")?;
    let readme = std::fs::read_to_string(root.join("README.md"))
        .context("Failed to read README.md")?;

    for (constant, label) in [("DEFAULT_K1", "k1"), ("DEFAULT_B", "b")] {
        let Some(value) = extract_const(&config_rs, constant) else {
            bail!("{} not found in src/config.rs", constant);
        };
        let documented = format!("`{} = {}`", label, value);
        if !readme.contains(&documented) {
            bail!("README.md should document {} (from {})", documented, constant);
        }
    }

    Ok(())
}

/// Value of `pub const NAME: f64 = VALUE;`
fn extract_const(content: &str, name: &str) -> Option<String> {
    content
        .lines()
        .find(|line| line.contains(&format!("const {}:", name)))
        .and_then(|line| line.split('=').nth(1))
        .map(|value| value.trim().trim_end_matches(';').trim().to_string())
}
