use crate::kind::Kind;
use colored::Colorize;
use thiserror::Error;

/// A declared variable whose raw text could not be converted to its kind
///
/// Also produced for a required variable that is unset or empty, in which
/// case `raw` is the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected: {name} type: {kind} got: {raw}")]
pub struct ConversionFailure {
    pub name: String,
    pub kind: Kind,
    pub raw: String,
}

/// Every conversion failure from one parse, in the order they were recorded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render_lines(.failures))]
pub struct ParseError {
    failures: Vec<ConversionFailure>,
}

impl ParseError {
    pub(crate) fn new(failures: Vec<ConversionFailure>) -> Self {
        Self { failures }
    }

    pub fn failures(&self) -> &[ConversionFailure] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Names of the failing variables
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|f| f.name.as_str())
    }
}

fn render_lines(failures: &[ConversionFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Why a single raw value was rejected by its kind's conversion rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} literal: {reason}")]
pub struct InvalidValue {
    pub kind: Kind,
    pub reason: String,
}

impl InvalidValue {
    pub(crate) fn new(kind: Kind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

/// Returned when a kind name is not one of the supported kinds
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown kind '{0}', expected string, integer, float, boolean or duration")]
pub struct UnknownKind(pub String);

/// Helper to format a parse failure into a terminal-friendly summary
pub fn format_parse_errors(error: &ParseError) -> String {
    let error_summary = error
        .failures()
        .iter()
        .map(|f| {
            format!(
                "  - expected: {} type: {} got: {}",
                f.name.magenta().bold(),
                f.kind,
                format!("'{}'", f.raw).red()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Configuration failed with {} error(s):\n{}",
        error.len().to_string().yellow().bold(),
        error_summary
    )
}
