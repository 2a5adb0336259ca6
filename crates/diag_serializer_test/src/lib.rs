//! Test support for the diagnostics serializer: a scripted host compiler that loads plugins and
//! reports diagnostics through a [`DiagnosticLog`](diag_serializer::DiagnosticLog).

mod compiler;
mod diagnostic;
mod recording;

pub use self::{
    compiler::{CompilationResult, TestCompiler, TestContext},
    diagnostic::TestDiagnostic,
    recording::{Observed, Recording, RecordingHandler},
};
