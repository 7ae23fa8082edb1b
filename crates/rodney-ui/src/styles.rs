//! Color palette and render helpers for rodney CLI output.
//!
//! Uses the Ayu Dark palette. Only outcomes and problems get color; values
//! are printed in the terminal's standard text color.

use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::tty::IsTty;
use owo_colors::OwoColorize;
use rodney_core::{ActionKind, ColumnDescriptor, Field, Outcome};

// ---------------------------------------------------------------------------
// Color detection
// ---------------------------------------------------------------------------

static PLAIN_OUTPUT: AtomicBool = AtomicBool::new(false);

/// Turn color off for the rest of the process (`--json` output).
pub fn set_plain_output(plain: bool) {
    PLAIN_OUTPUT.store(plain, Ordering::Relaxed);
}

/// Whether render helpers emit ANSI color.
pub fn supports_color() -> bool {
    color_enabled(
        PLAIN_OUTPUT.load(Ordering::Relaxed),
        |key| std::env::var(key).ok(),
        std::io::stdout().is_tty(),
    )
}

// `NO_COLOR`, `CLICOLOR=0` and `TERM=dumb` disable color; `CLICOLOR_FORCE`
// enables it off a TTY.
fn color_enabled(plain: bool, var: impl Fn(&str) -> Option<String>, tty: bool) -> bool {
    if plain || var("NO_COLOR").is_some() {
        return false;
    }
    if var("CLICOLOR").as_deref() == Some("0") || var("TERM").as_deref() == Some("dumb") {
        return false;
    }
    tty || var("CLICOLOR_FORCE").is_some()
}

// ---------------------------------------------------------------------------
// Ayu Dark color palette (RGB values)
// ---------------------------------------------------------------------------

const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c - bright green
const WARN: (u8, u8, u8) = (0xff, 0xb4, 0x54); // #ffb454 - bright yellow
const FAIL: (u8, u8, u8) = (0xf0, 0x71, 0x78); // #f07178 - bright red
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80); // #6c7680 - muted gray
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff - bright blue

// ---------------------------------------------------------------------------
// Icons
// ---------------------------------------------------------------------------

pub const ICON_PASS: &str = "\u{2713}";
pub const ICON_WARN: &str = "\u{26A0}";
pub const ICON_FAIL: &str = "\u{2716}";
pub const ICON_SELECTED: &str = "\u{25CF}";
pub const ICON_UNSELECTED: &str = "\u{25CB}";

/// Placeholder shown for a field with no value.
pub const EMPTY_VALUE: &str = "(empty)";

// ---------------------------------------------------------------------------
// Helper: apply truecolor only when color is supported
// ---------------------------------------------------------------------------

fn color_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        s.to_string()
    }
}

fn color_bold_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).bold().to_string()
    } else {
        s.to_string()
    }
}

// ---------------------------------------------------------------------------
// Core semantic render helpers
// ---------------------------------------------------------------------------

pub fn render_warn(s: &str) -> String {
    color_str(s, WARN)
}

pub fn render_fail(s: &str) -> String {
    color_str(s, FAIL)
}

pub fn render_muted(s: &str) -> String {
    color_str(s, MUTED)
}

pub fn render_accent(s: &str) -> String {
    color_str(s, ACCENT)
}

pub fn render_bold(s: &str) -> String {
    if supports_color() {
        s.bold().to_string()
    } else {
        s.to_string()
    }
}

/// Renders a section header in uppercase with accent color and bold.
pub fn render_category(s: &str) -> String {
    color_bold_str(&s.to_uppercase(), ACCENT)
}

// ---------------------------------------------------------------------------
// Domain renderers
// ---------------------------------------------------------------------------

/// `✓ message` in green or `✖ message` in red.
pub fn render_outcome(outcome: &Outcome) -> String {
    if outcome.success {
        format!("{} {}", color_str(ICON_PASS, PASS), outcome.message)
    } else {
        format!("{} {}", color_str(ICON_FAIL, FAIL), render_fail(&outcome.message))
    }
}

/// A warning line listing placeholders that did not resolve.
pub fn render_unresolved(names: &[String]) -> String {
    let list: Vec<String> = names.iter().map(|n| format!("{{{n}}}")).collect();
    format!(
        "{} {}",
        color_str(ICON_WARN, WARN),
        render_warn(&format!("no matching field: {}", list.join(", ")))
    )
}

/// One field as the placeholder that reads it and its display text:
/// `{Title} = text`, or `(empty)` when the field has no text.
pub fn render_field_line(field: &Field) -> String {
    let value = match field.text.as_deref() {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => render_muted(EMPTY_VALUE),
    };
    format!("{} = {}", render_bold(&format!("{{{}}}", field.title)), value)
}

/// One column as `id  Title  (kind)`, with the id padded to `width`.
pub fn render_column_line(column: &ColumnDescriptor, width: usize) -> String {
    format!(
        "{:<width$}  {}  {}",
        column.id,
        column.title,
        render_muted(&format!("({})", column.kind)),
    )
}

/// An action with its selection marker and label.
pub fn render_action_line(kind: ActionKind, selected: bool) -> String {
    let marker = if selected {
        render_accent(ICON_SELECTED)
    } else {
        render_muted(ICON_UNSELECTED)
    };
    let label = if selected {
        render_bold(kind.label())
    } else {
        kind.label().to_string()
    };
    format!("{marker} {:<16} {label}", kind.as_str())
}
