//! Terminal output helpers for the CLI: colors, status markers, and small tables.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::IsTerminal;

/// Whether stdout should receive ANSI escapes.
///
/// `NO_COLOR` (https://no-color.org/) wins; otherwise color only on a TTY.
pub fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Green,
    Red,
    Dim,
    Bold,
}

impl Tone {
    fn code(self) -> &'static str {
        match self {
            Tone::Green => "\x1b[32m",
            Tone::Red => "\x1b[31m",
            Tone::Dim => "\x1b[2m",
            Tone::Bold => "\x1b[1m",
        }
    }
}

const RESET: &str = "\x1b[0m";

/// Applies colors when the terminal supports them, passes text through otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Styled {
    color: bool,
}

impl Styled {
    pub fn new() -> Self {
        Self {
            color: color_enabled(),
        }
    }

    /// Styler that never emits escape codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    fn paint(&self, tone: Tone, s: &str) -> String {
        if self.color {
            format!("{}{s}{RESET}", tone.code())
        } else {
            s.to_string()
        }
    }

    pub fn green(&self, s: &str) -> String {
        self.paint(Tone::Green, s)
    }

    pub fn red(&self, s: &str) -> String {
        self.paint(Tone::Red, s)
    }

    pub fn dim(&self, s: &str) -> String {
        self.paint(Tone::Dim, s)
    }

    pub fn bold(&self, s: &str) -> String {
        self.paint(Tone::Bold, s)
    }

    /// Check mark or cross; `OK` / `!!` without color.
    pub fn status(&self, ok: bool) -> String {
        match (ok, self.color) {
            (true, true) => self.green("\u{2713}"),
            (false, true) => self.red("\u{2717}"),
            (true, false) => "OK".to_string(),
            (false, false) => "!!".to_string(),
        }
    }
}

impl Default for Styled {
    fn default() -> Self {
        Self::new()
    }
}

/// Print a branded header for CLI output.
pub fn print_header(s: &Styled) {
    println!(
        "  {} {}",
        s.bold("PhishGuard"),
        s.dim(&format!("v{}", env!("CARGO_PKG_VERSION")))
    );
    println!();
}

/// Print a section header (e.g., "Dataset", "Evaluation").
pub fn print_section(s: &Styled, title: &str) {
    println!();
    println!("  {}", s.bold(title));
}

/// Print a label/value line under a section.
pub fn print_row(label: &str, value: &str) {
    println!("    {label:<18} {value}");
}

/// Horizontal bar for a value in `[0, 1]`.
pub fn bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!(
        "{}{}",
        "\u{2588}".repeat(filled),
        "\u{2591}".repeat(width - filled)
    )
}

/// Pretty JSON for `value`.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output as JSON")
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", to_json(value)?);
    Ok(())
}
