//! Structural validation of persisted template layouts.
//!
//! The engine maintains the grid invariants by construction; this module
//! exists for data that arrives from outside (templates loaded from
//! storage or handed over an API) where nothing is guaranteed. It checks
//! an instance list against the invariants and reports one [`LayoutIssue`]
//! per violation, each carrying a code, a message, and an optional help
//! text.
//!
//! Issues split into two severities: [`Severity::Error`] for states the
//! engine refuses to load (duplicate identities, rows over capacity) and
//! [`Severity::Warning`] for states the reindexer repairs on load (column
//! gaps, stale ordering).

use std::fmt;

use tessera_core::instance::ModuleInstance;

use crate::reindex::{row_groups, row_sizes};

/// Issue codes for layout validation.
///
/// Codes are grouped by subject:
/// - `L0xx` - identity issues
/// - `L1xx` - row/column placement issues
/// - `L2xx` - ordering issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCode {
    /// Duplicate instance id.
    ///
    /// Two entries share an `instanceId`. Identities must be unique; the
    /// engine refuses to load such a list.
    L001,

    /// Row over capacity.
    ///
    /// A row holds more instances than the configured maximum.
    L100,

    /// Non-contiguous columns.
    ///
    /// A row's column indices are not exactly `0..k-1`. Repaired by
    /// renormalization on load.
    L101,

    /// Order not row-major.
    ///
    /// The `order` values are not strictly increasing 1, 2, … when the
    /// list is walked row by row, column by column. Repaired by
    /// renormalization on load.
    L200,
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// The severity of a layout issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The list cannot be loaded as-is.
    Error,
    /// The list loads, and renormalization repairs the issue.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutIssue {
    code: IssueCode,
    severity: Severity,
    message: String,
    help: Option<String>,
}

impl LayoutIssue {
    fn error(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Error,
            message: message.into(),
            help: None,
        }
    }

    fn warning(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Warning,
            message: message.into(),
            help: None,
        }
    }

    fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Returns the issue code.
    pub fn code(&self) -> IssueCode {
        self.code
    }

    /// Returns the severity.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

impl fmt::Display for LayoutIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

/// The outcome of validating one instance list.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    issues: Vec<LayoutIssue>,
}

impl ValidationReport {
    /// Returns all findings.
    pub fn issues(&self) -> &[LayoutIssue] {
        &self.issues
    }

    /// Returns `true` when nothing was found.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns `true` when at least one finding is an error.
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|issue| issue.severity().is_error())
    }
}

/// Validates an instance list against the grid invariants.
pub fn validate(instances: &[ModuleInstance], capacity: usize) -> ValidationReport {
    let mut issues = Vec::new();

    let mut ids: Vec<_> = instances.iter().map(|i| i.instance_id()).collect();
    ids.sort();
    let mut reported = None;
    for pair in ids.windows(2) {
        if pair[0] == pair[1] && reported != Some(pair[0]) {
            issues.push(
                LayoutIssue::error(
                    IssueCode::L001,
                    format!("duplicate instance id `{}`", pair[0]),
                )
                .with_help("every placed module needs its own instanceId"),
            );
            reported = Some(pair[0]);
        }
    }

    for (row, size) in row_sizes(instances) {
        if size > capacity {
            issues.push(LayoutIssue::error(
                IssueCode::L100,
                format!("row {row} holds {size} instances but the maximum is {capacity}"),
            ));
        }
    }

    for members in row_groups(instances) {
        let row = instances[members[0]].row_index();
        let contiguous = members
            .iter()
            .enumerate()
            .all(|(column, &index)| instances[index].column_index() == column);
        if !contiguous {
            issues.push(
                LayoutIssue::warning(
                    IssueCode::L101,
                    format!("row {row} has gapped or duplicated column indices"),
                )
                .with_help("normalizing reassigns columns to 0..k-1"),
            );
        }
    }

    let mut sorted: Vec<_> = instances.iter().collect();
    sorted.sort_by_key(|i| (i.row_index(), i.column_index()));
    let row_major = sorted
        .iter()
        .enumerate()
        .all(|(rank, instance)| instance.order() == rank + 1);
    if !instances.is_empty() && !row_major {
        issues.push(
            LayoutIssue::warning(IssueCode::L200, "order is not row-major from 1")
                .with_help("normalizing recomputes order across rows"),
        );
    }

    ValidationReport { issues }
}
