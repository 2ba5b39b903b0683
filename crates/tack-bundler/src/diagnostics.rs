//! Diagnostic extraction from Rolldown errors.
//!
//! Rolldown reports failures as a batch of build diagnostics. This module
//! turns them into [`ExtractedDiagnostic`] values that are stable across
//! Rolldown versions, so callers can classify and print them without
//! depending on Rolldown's error types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Extracted diagnostic information from Rolldown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDiagnostic {
    pub kind: DiagnosticKind,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub help: Option<String>,
}

impl fmt::Display for ExtractedDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(file) = &self.file {
            write!(f, " ({file}")?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
                if let Some(column) = self.column {
                    write!(f, ":{column}")?;
                }
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// Diagnostic kind (mirrors the Rolldown event kinds tack cares about).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    ParseError,
    UnresolvedEntry,
    UnresolvedImport,
    MissingExport,
    CircularDependency,
    Transform,
    Other,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiagnosticKind::ParseError => "ParseError",
            DiagnosticKind::UnresolvedEntry => "UnresolvedEntry",
            DiagnosticKind::UnresolvedImport => "UnresolvedImport",
            DiagnosticKind::MissingExport => "MissingExport",
            DiagnosticKind::CircularDependency => "CircularDependency",
            DiagnosticKind::Transform => "Transform",
            DiagnosticKind::Other => "Error",
        })
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// Extract diagnostics from Rolldown error types.
///
/// Rolldown's batched diagnostic has no stable structured accessor across
/// releases, so this works from the `Debug` rendering.
pub fn extract_from_rolldown_error(error: &dyn fmt::Debug) -> Vec<ExtractedDiagnostic> {
    let error_str = format!("{error:?}");

    if error_str.contains("BatchedBuildDiagnostic") {
        return extract_multiple_from_string(&error_str);
    }

    vec![extract_single_from_string(&error_str)]
}

/// Extract multiple diagnostics from a batched error string.
fn extract_multiple_from_string(error_str: &str) -> Vec<ExtractedDiagnostic> {
    let parts: Vec<&str> = error_str
        .split("BuildDiagnostic {")
        .skip(1)
        .filter(|s| !s.trim().is_empty())
        .collect();

    if parts.is_empty() {
        vec![extract_single_from_string(error_str)]
    } else {
        parts
            .iter()
            .map(|part| extract_single_from_string(part))
            .collect()
    }
}

/// Extract a single diagnostic from a formatted error string.
fn extract_single_from_string(error_str: &str) -> ExtractedDiagnostic {
    let kind = classify(error_str);

    let severity = if error_str.contains("Severity::Warning") || error_str.contains("Warning,") {
        DiagnosticSeverity::Warning
    } else {
        DiagnosticSeverity::Error
    };

    let message = extract_quoted_string_after(error_str, "message:")
        .unwrap_or_else(|| error_str.trim().to_string());

    let file = extract_file_path(error_str);
    let (line, column) = extract_line_column(error_str);
    let help = extract_help_text(error_str).or_else(|| default_help(&kind));

    ExtractedDiagnostic {
        kind,
        severity,
        message,
        file,
        line,
        column,
        help,
    }
}

fn classify(text: &str) -> DiagnosticKind {
    if text.contains("ParseError")
        || text.contains("Parse error")
        || text.contains("Unexpected token")
        || text.contains("Expected")
    {
        DiagnosticKind::ParseError
    } else if text.contains("UnresolvedImport") || text.contains("Could not resolve") {
        DiagnosticKind::UnresolvedImport
    } else if text.contains("UnresolvedEntry") {
        DiagnosticKind::UnresolvedEntry
    } else if text.contains("MissingExport") {
        DiagnosticKind::MissingExport
    } else if text.contains("CircularDependency") {
        DiagnosticKind::CircularDependency
    } else if text.contains("Transform") {
        DiagnosticKind::Transform
    } else {
        DiagnosticKind::Other
    }
}

fn default_help(kind: &DiagnosticKind) -> Option<String> {
    match kind {
        DiagnosticKind::ParseError => Some("Fix the syntax error and save the file".to_string()),
        DiagnosticKind::UnresolvedImport => Some(
            "Check the import path, or install the package into node_modules".to_string(),
        ),
        DiagnosticKind::UnresolvedEntry => {
            Some("Check `entry` and `base_path` in tack.toml".to_string())
        }
        _ => None,
    }
}

/// Extract file path from error message.
fn extract_file_path(text: &str) -> Option<String> {
    for key in ["filename:", "id:", "importer:", "path:"] {
        if let Some(path) = extract_quoted_string_after(text, key) {
            if !path.is_empty() {
                return Some(path);
            }
        }
    }
    None
}

/// Extract `line` / `column` fields, or a `file.js:L:C` location.
fn extract_line_column(text: &str) -> (Option<u32>, Option<u32>) {
    let line = extract_number_after(text, "line:");
    let column = extract_number_after(text, "column:");
    if line.is_some() {
        return (line, column);
    }

    for ext in [".js:", ".mjs:", ".cjs:", ".ts:"] {
        if let Some(pos) = text.find(ext) {
            let rest = &text[pos + ext.len()..];
            let mut parts = rest.splitn(3, ':');
            let line = parts.next().and_then(parse_leading_number);
            let column = parts.next().and_then(parse_leading_number);
            if line.is_some() {
                return (line, column);
            }
        }
    }

    (None, None)
}

fn extract_number_after(text: &str, key: &str) -> Option<u32> {
    let pos = text.find(key)?;
    parse_leading_number(text[pos + key.len()..].trim_start())
}

fn parse_leading_number(text: &str) -> Option<u32> {
    let digits: String = text.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Extract help text from error message.
fn extract_help_text(text: &str) -> Option<String> {
    for indicator in ["help: Some(\"", "help: ", "Help: ", "hint: ", "Hint: "] {
        if let Some(pos) = text.find(indicator) {
            let after = &text[pos + indicator.len()..];
            let help_str = after
                .split(['"', '\n'])
                .next()
                .unwrap_or("")
                .trim()
                .to_string();
            if !help_str.is_empty() && help_str != "None," && help_str != "None" {
                return Some(help_str);
            }
        }
    }
    None
}

/// Extract a quoted string after a keyword
fn extract_quoted_string_after(text: &str, keyword: &str) -> Option<String> {
    let pos = text.find(keyword)?;
    extract_quoted_string(&text[pos + keyword.len()..])
}

/// Extract the first double-quoted string, honoring `\"` escapes.
fn extract_quoted_string(text: &str) -> Option<String> {
    let start = text.find('"')?;
    let mut out = String::new();
    let mut escaped = false;
    for c in text[start + 1..].chars() {
        match (escaped, c) {
            (true, c) => {
                out.push(c);
                escaped = false;
            }
            (false, '\\') => escaped = true,
            (false, '"') => return Some(out),
            (false, c) => out.push(c),
        }
    }
    None
}
