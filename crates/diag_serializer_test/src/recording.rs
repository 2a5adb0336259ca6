use std::{any::Any, cell::RefCell, rc::Rc};

use diag_serializer::{Diagnostic, DiagnosticHandler, DiagnosticKind, Prev, ReportError};

/// What the host's own handler saw of a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observed {
    pub code: String,
    pub kind: DiagnosticKind,
}

/// A shared view of the diagnostics received by a [`RecordingHandler`].
#[derive(Debug, Clone, Default)]
pub struct Recording(Rc<RefCell<Vec<Observed>>>);

impl Recording {
    /// Returns everything observed so far, in order.
    pub fn observed(&self) -> Vec<Observed> {
        self.0.borrow().clone()
    }

    pub fn codes(&self) -> Vec<String> {
        self.0.borrow().iter().map(|o| o.code.clone()).collect()
    }

    pub fn error_count(&self) -> usize {
        self.count(|kind| kind == DiagnosticKind::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(DiagnosticKind::is_warning)
    }

    fn count(&self, mut filter: impl FnMut(DiagnosticKind) -> bool) -> usize {
        self.0.borrow().iter().filter(|o| filter(o.kind)).count()
    }
}

/// The bottom of the test compiler's diagnostic chain. Stands in for the handler that prints
/// diagnostics and counts errors and warnings.
#[derive(Debug, Default)]
pub struct RecordingHandler {
    recording: Recording,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recording(&self) -> Recording {
        self.recording.clone()
    }
}

impl DiagnosticHandler for RecordingHandler {
    fn report(&mut self, diagnostic: &dyn Diagnostic, _prev: Prev<'_>) -> Result<(), ReportError> {
        self.recording.0.borrow_mut().push(Observed {
            code: diagnostic.code().to_owned(),
            kind: diagnostic.kind(),
        });
        Ok(())
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
