//! User-facing diagnostic messages and the sinks that receive them.
//!
//! Every error must include the root cause, the offending input, and
//! suggested fixes. Diagnostics carry a stable code so that a host build
//! log can filter on it.

use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when the lock file is stale, truncated or inconsistent.
    pub const RESTORE: &str = "Run a package restore to regenerate the lock file";

    /// Suggestion when a target must be chosen.
    pub const CHOOSE_TARGET: &str = "Pass --target <NAME> or set `resolve.target` in .lockwalk/config.toml";

    /// Suggestion when a library is not found in a target.
    pub const LIST_TARGETS: &str = "Run `lockwalk targets` to see targets and their libraries";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A diagnostic message with optional code, context and suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Stable code such as `LW1001`
    pub code: Option<String>,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    fn with_severity(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity,
            code: None,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, message)
    }

    /// Create a new note diagnostic.
    pub fn note(message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Note, message)
    }

    /// Attach a stable code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let label = match &self.code {
            Some(code) => format!("{}[{}]", self.severity, code),
            None => self.severity.to_string(),
        };
        let label = if color {
            let style = match self.severity {
                Severity::Error => "1;31",
                Severity::Warning => "1;33",
                Severity::Note => "1;36",
            };
            format!("\x1b[{style}m{label}\x1b[0m")
        } else {
            label
        };

        output.push_str(&format!("{}: {}\n", label, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  = {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Receiver of structured error and warning records.
pub trait DiagnosticSink {
    fn emit(&self, diagnostic: &Diagnostic);
}

/// Writes diagnostics to stderr.
#[derive(Debug, Clone, Copy)]
pub struct StderrSink {
    pub color: bool,
}

impl DiagnosticSink for StderrSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        eprint!("{}", diagnostic.format(self.color));
    }
}

/// Keeps diagnostics in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take everything emitted so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.diagnostics
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(diagnostic.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("unable to find library `NEST`")
            .with_code("LW1001")
            .with_context("looked for version 1.9.0")
            .with_suggestion("Run a package restore");

        let output = diag.format(false);
        assert!(output.starts_with("error[LW1001]: unable to find library `NEST`\n"));
        assert!(output.contains("  = looked for version 1.9.0"));
        assert!(output.contains("help: consider:"));
        assert!(output.contains("1. Run a package restore"));
    }

    #[test]
    fn test_diagnostic_without_code() {
        let diag = Diagnostic::warning("something odd").with_location("obj/project.assets.json");
        let output = diag.format(false);

        assert!(output.starts_with("warning: something odd\n"));
        assert!(output.contains("--> obj/project.assets.json"));
    }

    #[test]
    fn test_color_output() {
        let output = Diagnostic::note("fyi").format(true);
        assert!(output.contains("\x1b[1;36mnote\x1b[0m"));
    }

    #[test]
    fn test_collecting_sink() {
        let sink = CollectingSink::new();
        sink.emit(&Diagnostic::warning("one"));
        sink.emit(&Diagnostic::error("two"));

        let collected = sink.take();
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[1].severity, Severity::Error);
        assert!(sink.take().is_empty());
    }
}
