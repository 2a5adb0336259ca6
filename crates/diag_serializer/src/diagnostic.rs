//! The compiler-facing view of a diagnostic.
//!
//! Hosts implement [`Diagnostic`] for their own diagnostic representation. The serializer only
//! reads from it while a diagnostic is being reported and never retains it.

use std::{any::Any, fmt, sync::Arc};

use crate::finding::LinterFinding;

/// The severity of a diagnostic as classified by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A problem that prevents successful compilation.
    Error,
    /// A problem that does not prevent compilation.
    Warning,
    /// A warning the compiler is required to emit, regardless of lint settings.
    MandatoryWarning,
    /// Informational output.
    Note,
    /// Anything the compiler does not classify further.
    Other,
}

impl DiagnosticKind {
    /// Returns the name used for this kind in serialized records.
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::Error => "ERROR",
            DiagnosticKind::Warning => "WARNING",
            DiagnosticKind::MandatoryWarning => "MANDATORY_WARNING",
            DiagnosticKind::Note => "NOTE",
            DiagnosticKind::Other => "OTHER",
        }
    }

    /// Returns true for both regular and mandatory warnings.
    pub fn is_warning(self) -> bool {
        matches!(
            self,
            DiagnosticKind::Warning | DiagnosticKind::MandatoryWarning
        )
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A language tag used to render diagnostic messages, e.g. `en-US`.
///
/// The empty tag is the root locale, which hosts use when no user preference is known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    /// Constructs a locale from a language tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Locale(tag.into())
    }

    /// Returns the root locale.
    pub fn root() -> Self {
        Locale::default()
    }

    /// Returns the language tag of this locale.
    pub fn tag(&self) -> &str {
        &self.0
    }

    /// Returns true if this is the root locale.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An argument attached to a diagnostic.
///
/// Most arguments only contribute to the rendered message. A [`LinterFinding`] carries the
/// structured description produced by an external static analyzer.
#[derive(Debug, Clone)]
pub enum DiagnosticArg {
    Text(String),
    Number(i64),
    Finding(LinterFinding),
    /// A host-specific value the serializer knows nothing about.
    Opaque(Arc<dyn Any + Send + Sync>),
}

impl DiagnosticArg {
    /// Returns the argument as a `T` if that is exactly its runtime type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            DiagnosticArg::Text(text) => (text as &dyn Any).downcast_ref(),
            DiagnosticArg::Number(number) => (number as &dyn Any).downcast_ref(),
            DiagnosticArg::Finding(finding) => (finding as &dyn Any).downcast_ref(),
            DiagnosticArg::Opaque(value) => value.as_ref().downcast_ref(),
        }
    }
}

impl From<LinterFinding> for DiagnosticArg {
    fn from(finding: LinterFinding) -> Self {
        DiagnosticArg::Finding(finding)
    }
}

impl From<String> for DiagnosticArg {
    fn from(text: String) -> Self {
        DiagnosticArg::Text(text)
    }
}

impl From<&str> for DiagnosticArg {
    fn from(text: &str) -> Self {
        DiagnosticArg::Text(text.to_owned())
    }
}

impl From<i64> for DiagnosticArg {
    fn from(number: i64) -> Self {
        DiagnosticArg::Number(number)
    }
}

/// A diagnostic raised by the compiler while compiling a unit.
pub trait Diagnostic {
    /// Returns the name of the source file this diagnostic refers to, if any.
    fn source(&self) -> Option<&str>;

    /// Returns the 1-based line number this diagnostic refers to, if any.
    fn line_number(&self) -> Option<u64>;

    fn kind(&self) -> DiagnosticKind;

    /// Returns the stable identifier of the message template, e.g.
    /// `compiler.warn.has.been.deprecated`.
    fn code(&self) -> &str;

    /// Renders the human readable message in the given locale.
    fn message(&self, locale: &Locale) -> String;

    /// Returns the lint category for diagnostics produced by a lint check.
    fn lint_category(&self) -> Option<&str> {
        None
    }

    /// Returns the arguments of the message template, in order.
    fn args(&self) -> &[DiagnosticArg] {
        &[]
    }
}

impl fmt::Debug for dyn Diagnostic + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostic")
            .field("source", &self.source())
            .field("line_number", &self.line_number())
            .field("kind", &self.kind())
            .field("code", &self.code())
            .finish_non_exhaustive()
    }
}
