//! Terminal status output for the pixstudio CLI.
//!
//! Status lines use a right-aligned coloured verb column and go to stderr,
//! leaving stdout for machine-readable output such as `edit --json`.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Status printer; colour follows whether stderr is a terminal.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self::with_color(io::stderr().is_terminal())
    }

    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    /// Progress through a command, e.g. "   Stylizing 640x480 → 32x32".
    pub fn status(&self, verb: &str, message: &str) {
        self.emit(GREEN, verb, message);
    }

    /// A finished step.
    pub fn success(&self, verb: &str, message: &str) {
        self.emit(GREEN, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.emit(CYAN, verb, message);
    }

    /// Something skipped that did not stop the command.
    pub fn warning(&self, verb: &str, message: &str) {
        self.emit(YELLOW, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.emit(RED, verb, message);
    }

    /// Render one status line without printing it.
    pub fn format_line(&self, color: &str, verb: &str, message: &str) -> String {
        if self.color {
            format!("{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}")
        } else {
            format!("{verb:>VERB_WIDTH$} {message}")
        }
    }

    fn emit(&self, color: &str, verb: &str, message: &str) {
        let line = self.format_line(color, verb, message);
        let _ = writeln!(io::stderr().lock(), "{line}");
    }
}

/// Pluralize a count: `plural(1, "change", "changes")` → "1 change".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "change", "changes"), "1 change");
        assert_eq!(plural(0, "change", "changes"), "0 changes");
        assert_eq!(plural(3, "history entry", "history entries"), "3 history entries");
    }

    #[test]
    fn test_format_line_plain() {
        let printer = Printer::with_color(false);
        assert_eq!(
            printer.format_line(GREEN, "Wrote", "out.png"),
            "       Wrote out.png"
        );
    }

    #[test]
    fn test_format_line_coloured() {
        let line = Printer::with_color(true).format_line(YELLOW, "Skipped", "line 3");
        assert!(line.starts_with(BOLD));
        assert!(line.contains(YELLOW));
        assert!(line.ends_with(" line 3"));
    }

    #[test]
    fn test_display_path_absolute() {
        // An absolute path outside cwd should stay absolute
        let p = Path::new("/nonexistent/path/to/file");
        assert_eq!(display_path(p), "/nonexistent/path/to/file");
    }
}
