//! A compiler plugin that writes every diagnostic of a compilation to a text file, one record per
//! line, for consumption by build dashboards and CI gates.
//!
//! The host compiler is described by the traits in [`plugin`] and [`Diagnostic`]; it owns a
//! [`DiagnosticLog`] that the plugin installs a [`SerializingDiagnosticHandler`] into for the
//! duration of a compilation.

mod chain;
mod diagnostic;
mod error;
pub mod finding;
mod handler;
pub mod plugin;

pub use crate::{
    chain::{DiagnosticHandler, DiagnosticLog, HandlerId, Installation, Prev},
    diagnostic::{Diagnostic, DiagnosticArg, DiagnosticKind, Locale},
    error::{ChainError, PluginError, ReportError},
    handler::{
        is_suppressed, linter_finding, Record, SerializingDiagnosticHandler, LINE_SEPARATOR,
        LINTER_CODES, WARNINGS_AS_ERRORS_CODE,
    },
    plugin::{DiagnosticsSerializerPlugin, Plugin, PLUGIN_NAME},
};
