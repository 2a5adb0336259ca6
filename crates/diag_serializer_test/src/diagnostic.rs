use diag_serializer::{
    finding::LinterFinding, Diagnostic, DiagnosticArg, DiagnosticKind, Locale,
};

/// A diagnostic with fixed contents, built up with a fluent interface.
#[derive(Debug, Clone)]
pub struct TestDiagnostic {
    source: Option<String>,
    line: Option<u64>,
    kind: DiagnosticKind,
    code: String,
    message: String,
    translations: Vec<(Locale, String)>,
    lint_category: Option<String>,
    args: Vec<DiagnosticArg>,
}

impl TestDiagnostic {
    /// Constructs a diagnostic that does not refer to a source file.
    pub fn new(kind: DiagnosticKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        TestDiagnostic {
            source: None,
            line: None,
            kind,
            code: code.into(),
            message: message.into(),
            translations: Vec::new(),
            lint_category: None,
            args: Vec::new(),
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Error, code, message)
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Warning, code, message)
    }

    pub fn note(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Note, code, message)
    }

    /// The warning raised for a call to a deprecated method, as reported with
    /// `-Xlint:deprecation`.
    pub fn deprecation(source: &str, line: u64, method: &str, class: &str) -> Self {
        Self::warning(
            "compiler.warn.has.been.deprecated",
            format!("{method} in {class} has been deprecated"),
        )
        .at(source, line)
        .lint("deprecation")
        .arg(method)
        .arg(class)
    }

    /// A diagnostic raised on behalf of an integrated static analyzer.
    pub fn linter(kind: DiagnosticKind, finding: LinterFinding) -> Self {
        let code = match kind {
            DiagnosticKind::Error => "compiler.err.error.prone",
            DiagnosticKind::Note => "compiler.note.error.prone",
            _ => "compiler.warn.error.prone",
        };
        let message = format!(
            "[{}] {}",
            finding.description.check_name, finding.description.raw_message
        );
        Self::new(kind, code, message).arg(finding)
    }

    pub fn at(mut self, source: impl Into<String>, line: u64) -> Self {
        self.source = Some(source.into());
        self.line = Some(line);
        self
    }

    pub fn lint(mut self, category: impl Into<String>) -> Self {
        self.lint_category = Some(category.into());
        self
    }

    pub fn arg(mut self, arg: impl Into<DiagnosticArg>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Sets the message rendered for `locale`; other locales get the default message.
    pub fn translated(mut self, locale: Locale, message: impl Into<String>) -> Self {
        self.translations.push((locale, message.into()));
        self
    }
}

impl Diagnostic for TestDiagnostic {
    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn line_number(&self) -> Option<u64> {
        self.line
    }

    fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn message(&self, locale: &Locale) -> String {
        self.translations
            .iter()
            .find(|(translated, _)| translated == locale)
            .map_or(&self.message, |(_, message)| message)
            .clone()
    }

    fn lint_category(&self) -> Option<&str> {
        self.lint_category.as_deref()
    }

    fn args(&self) -> &[DiagnosticArg] {
        &self.args
    }
}
