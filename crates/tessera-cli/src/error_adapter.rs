//! Error adapter for converting CLI errors to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error
//! types and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Issue Support
//!
//! When validation finds multiple [`LayoutIssue`]s, each issue is rendered
//! independently. Template layouts are structured JSON rather than source
//! text, so the adapters carry codes and help texts but no source spans.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use tessera_engine::validate::LayoutIssue;

use crate::CliError;

/// Adapter for a single layout validation issue.
#[derive(Debug)]
pub struct IssueAdapter<'a> {
    /// The wrapped issue
    issue: &'a LayoutIssue,
}

impl<'a> IssueAdapter<'a> {
    /// Create a new issue adapter.
    pub fn new(issue: &'a LayoutIssue) -> Self {
        Self { issue }
    }
}

impl fmt::Display for IssueAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.issue.message())
    }
}

impl std::error::Error for IssueAdapter<'_> {}

impl MietteDiagnostic for IssueAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.issue.code()))
    }

    fn severity(&self) -> Option<miette::Severity> {
        if self.issue.severity().is_error() {
            Some(miette::Severity::Error)
        } else {
            Some(miette::Severity::Warning)
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.issue
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }
}

/// Adapter for non-validation [`CliError`] variants.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CliError::Engine(_) => "tessera::engine",
            CliError::Config(_) => "tessera::config",
            CliError::Validation(_) => return None,
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A validation issue carrying a code and help text.
    Issue(IssueAdapter<'a>),
    /// A simple error without layout context.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Issue(issue) => fmt::Display::fmt(issue, f),
            Reportable::Error(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Issue(_) => None,
            Reportable::Error(err) => err.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Issue(issue) => issue.code(),
            Reportable::Error(err) => err.code(),
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Reportable::Issue(issue) => issue.severity(),
            Reportable::Error(err) => err.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Issue(issue) => issue.help(),
            Reportable::Error(err) => err.help(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert a [`CliError`] into a list of reportable errors.
///
/// For [`CliError::Validation`], this returns one [`Reportable`] per
/// layout issue in the report. For other error variants, this returns a
/// single [`Reportable`].
pub fn to_reportables(err: &CliError) -> Vec<Reportable<'_>> {
    match err {
        CliError::Validation(report) => report
            .issues()
            .iter()
            .map(|issue| Reportable::Issue(IssueAdapter::new(issue)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use tessera_core::instance::{InstanceId, ModuleInstance};
    use tessera_engine::validate;

    use super::*;

    fn duplicate_report() -> CliError {
        let instances = vec![
            ModuleInstance::new(InstanceId::from_raw("a"), "m", 0, 0),
            ModuleInstance::new(InstanceId::from_raw("a"), "m", 0, 1),
        ];
        CliError::Validation(validate::validate(&instances, 4))
    }

    #[test]
    fn test_validation_issues_render_independently() {
        let err = duplicate_report();

        let reportables = to_reportables(&err);
        assert!(!reportables.is_empty());
        match &reportables[0] {
            Reportable::Issue(issue) => {
                assert!(issue.to_string().contains("duplicate instance id"));
                assert!(issue.code().is_some());
                assert!(issue.help().is_some());
            }
            Reportable::Error(_) => panic!("Expected Issue"),
        }
    }

    #[test]
    fn test_engine_error_is_a_single_reportable() {
        let err = CliError::Engine(tessera_engine::TesseraError::Persist(
            "input is not a JSON instance array".to_string(),
        ));

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(adapted) => {
                assert!(adapted.to_string().contains("JSON instance array"));
            }
            Reportable::Issue(_) => panic!("Expected Error"),
        }
    }
}
