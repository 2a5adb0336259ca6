use std::fmt;

use crate::{finding::LinterFinding, Diagnostic, DiagnosticKind, Locale};

/// The code of the error the compiler raises when warnings were reported while warnings are
/// treated as errors. It says nothing about the sources and is never serialized.
pub const WARNINGS_AS_ERRORS_CODE: &str = "compiler.err.warnings.and.werror";

/// The codes of diagnostics raised on behalf of an integrated static analyzer. Their only
/// argument is a [`LinterFinding`].
pub const LINTER_CODES: [&str; 3] = [
    "compiler.err.error.prone",
    "compiler.warn.error.prone",
    "compiler.note.error.prone",
];

/// The line separator of the platform, written after every record.
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Line number written for diagnostics that do not refer to a line.
const NO_LINE: i64 = -1;

/// Written in place of the link of a check that does not document one.
const MISSING_LINK: &str = "null";

/// Returns true if no record is written for the diagnostic.
pub fn is_suppressed(diagnostic: &dyn Diagnostic) -> bool {
    diagnostic.code() == WARNINGS_AS_ERRORS_CODE
}

/// Returns the finding of a linter-integration diagnostic, or `None` if the diagnostic does not
/// have exactly the expected shape.
pub fn linter_finding(diagnostic: &dyn Diagnostic) -> Option<&LinterFinding> {
    if !LINTER_CODES.contains(&diagnostic.code()) {
        return None;
    }
    match diagnostic.args() {
        [arg] => arg.downcast_ref::<LinterFinding>(),
        _ => None,
    }
}

/// The part of a record after the kind.
#[derive(Debug, PartialEq, Eq)]
enum Body<'d> {
    Finding(&'d LinterFinding),
    Lint { category: &'d str, message: String },
    Message(String),
}

impl<'d> Body<'d> {
    fn of(diagnostic: &'d dyn Diagnostic, locale: &Locale) -> Self {
        if let Some(finding) = linter_finding(diagnostic) {
            return Body::Finding(finding);
        }
        match diagnostic.lint_category() {
            Some(category) if !category.is_empty() => Body::Lint {
                category,
                message: diagnostic.message(locale),
            },
            _ => Body::Message(diagnostic.message(locale)),
        }
    }
}

impl fmt::Display for Body<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Finding(finding) => {
                let description = &finding.description;
                write!(
                    f,
                    "ruleId={}, message={}, link={}, fixes={}, appliedFixes={}",
                    description.check_name,
                    description.raw_message,
                    description.link.as_deref().unwrap_or(MISSING_LINK),
                    description.fixes.len(),
                    finding.applied_fixes.len()
                )
            }
            Body::Lint { category, message } => write!(f, "ruleId={category}, message={message}"),
            Body::Message(message) => write!(f, "message={message}"),
        }
    }
}

/// A single serialized diagnostic, without the line separator.
///
/// ```text
/// <source>:<line>: <KIND>: <body>
/// ```
#[derive(Debug)]
pub struct Record<'d> {
    source: &'d str,
    line: i64,
    kind: DiagnosticKind,
    body: Body<'d>,
}

impl<'d> Record<'d> {
    /// Builds the record of a diagnostic, rendering messages in `locale`.
    pub fn new(diagnostic: &'d dyn Diagnostic, locale: &Locale) -> Self {
        Record {
            source: diagnostic.source().unwrap_or_default(),
            line: diagnostic
                .line_number()
                .and_then(|line| i64::try_from(line).ok())
                .unwrap_or(NO_LINE),
            kind: diagnostic.kind(),
            body: Body::of(diagnostic, locale),
        }
    }
}

impl fmt::Display for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.source, self.line, self.kind, self.body
        )
    }
}
