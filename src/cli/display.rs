// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the lexis CLI.
//!
//! OneDark for dark terminals, One Light for light ones. Respects `NO_COLOR`
//! and turns colors off when stdout is not a TTY.
//!
//! # Theme detection order
//!
//! 1. `LEXIS_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. macOS appearance (via defaults read)
//! 4. Default to dark theme

use std::sync::OnceLock;

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn parse_theme(value: &str) -> Option<Theme> {
    match value.to_lowercase().as_str() {
        "light" | "l" => Some(Theme::Light),
        "dark" | "d" => Some(Theme::Dark),
        _ => None,
    }
}

/// `COLORFGBG` is "fg;bg"; backgrounds 7 and up (except 8) are light.
fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
    let bg = value.split(';').next_back()?.parse::<u8>().ok()?;
    if bg >= 7 && bg != 8 {
        Some(Theme::Light)
    } else {
        None
    }
}

fn detect_theme() -> Theme {
    if let Some(theme) = std::env::var("LEXIS_THEME")
        .ok()
        .as_deref()
        .and_then(parse_theme)
    {
        return theme;
    }

    if let Some(theme) = std::env::var("COLORFGBG")
        .ok()
        .as_deref()
        .and_then(theme_from_colorfgbg)
    {
        return theme;
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(output) = std::process::Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
        {
            let stdout = String::from_utf8_lossy(&output.stdout);
            if !stdout.contains("Dark") && output.status.success() {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// ONEDARK / ONE LIGHT COLOR PALETTES (True Color)
// ═══════════════════════════════════════════════════════════════════════════
//
// OneDark: https://github.com/joshdick/onedark.vim
// One Light: https://github.com/sonph/onehalf

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
}

pub use colors::*;

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117); // #e06c75
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const BLUE: (u8, u8, u8) = (97, 175, 239); // #61afef
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
    pub const BRIGHT_GREEN: (u8, u8, u8) = (166, 226, 46);
    pub const BRIGHT_CYAN: (u8, u8, u8) = (102, 217, 239);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73); // #e45649
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const BLUE: (u8, u8, u8) = (64, 120, 242); // #4078f2
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
    pub const BRIGHT_GREEN: (u8, u8, u8) = (68, 140, 39);
    pub const BRIGHT_CYAN: (u8, u8, u8) = (1, 112, 158);
}

// ═══════════════════════════════════════════════════════════════════════════
// THEME-AWARE COLOR ACCESSORS
// ═══════════════════════════════════════════════════════════════════════════

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_GREEN);
theme_color!(BRIGHT_CYAN);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Dim text, or plain text without colors
pub fn dim(text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", DIM, text, RESET)
    } else {
        text.to_string()
    }
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Cut `s` to `width` visible characters, marking the cut with `…`.
pub fn clip(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let kept: String = s.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// Collapse runs of whitespace (newlines included) into single spaces.
pub fn one_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let border = GRAY();
    let len = visible_len(content);
    let pad = BOX_WIDTH.saturating_sub(len);
    println!(
        "{}│{}{}{}{}│{}",
        border,
        RESET,
        content,
        " ".repeat(pad),
        border,
        RESET
    );
}

fn label_part(label: &str) -> String {
    format!("─ {} ", themed(CYAN, &[BOLD], label))
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let border = GRAY();
    let label_part = label_part(label);
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}┌{}{}{}{}┐{}",
        border,
        RESET,
        label_part,
        border,
        "─".repeat(remaining),
        RESET
    );
}

/// Print section divider: ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    let border = GRAY();
    let label_part = label_part(label);
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}├{}{}{}{}┤{}",
        border,
        RESET,
        label_part,
        border,
        "─".repeat(remaining),
        RESET
    );
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    let border = GRAY();
    println!("{}└{}┘{}", border, "─".repeat(BOX_WIDTH), RESET);
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Left-pad a styled string to a fixed visible width
pub fn pad_left(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - visible), s)
    }
}

/// Right-pad a styled string to a fixed visible width
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// Format bytes as human-readable size
pub fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// BM25 score, colored relative to the best score in the result set.
pub fn score_value(score: f64, best: f64) -> String {
    let text = format!("{:>7.3}", score);
    if !use_colors() {
        return text;
    }
    let ratio = if best > 0.0 { score / best } else { 0.0 };
    let color = if ratio >= 0.9 {
        BRIGHT_GREEN()
    } else if ratio >= 0.6 {
        GREEN()
    } else if ratio >= 0.3 {
        YELLOW()
    } else {
        GRAY()
    };
    format!("{}{}{}", color, text, RESET)
}

/// Elapsed time in milliseconds (green=fast, yellow=medium, red=slow)
pub fn timing_ms(value: f64) -> String {
    let text = format!("{:.3} ms", value);
    if !use_colors() {
        return text;
    }
    let color = if value < 5.0 {
        GREEN()
    } else if value < 20.0 {
        YELLOW()
    } else {
        RED()
    };
    format!("{}{}{}", color, text, RESET)
}

/// Label for an error printed to stderr.
pub fn error_label() -> String {
    if use_colors() && atty::is(atty::Stream::Stderr) {
        format!("{}{}error{}", BOLD, RED(), RESET)
    } else {
        "error".to_string()
    }
}
