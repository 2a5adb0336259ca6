use std::{io, path::PathBuf};

use thiserror::Error;

use crate::chain::HandlerId;

/// An error returned while a diagnostic travels down the chain of handlers.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("could not write diagnostic record to '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// An error caused by removing handlers from a [`DiagnosticLog`](crate::DiagnosticLog) out of
/// order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("handler {expected} is not installed at the head of the diagnostic chain (head is {found})")]
    NotHead { expected: HandlerId, found: HandlerId },
    #[error("handler {0} is not of the type it was installed with")]
    UnexpectedType(HandlerId),
}

/// An error raised by the diagnostics serializer plugin.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("missing plugin argument: path of the diagnostics output file")]
    MissingOutputPath,
    #[error("could not create diagnostics output file '{}'", path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not close diagnostics output file '{}'", path.display())]
    CloseOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not uninstall the diagnostics serializer")]
    Uninstall(#[from] ChainError),
}
