//! The chain of diagnostic handlers a compiler routes its diagnostics through.
//!
//! A [`DiagnosticLog`] starts out with the host's own handler, which typically prints diagnostics
//! and counts errors. Extensions install additional handlers on top of it. Every diagnostic is
//! first offered to the most recently installed handler, which receives a [`Prev`] it can use to
//! pass the diagnostic on to the handler that was the head of the chain before it.

use std::{
    any::Any,
    fmt,
    marker::PhantomData,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::{
    error::{ChainError, ReportError},
    Diagnostic,
};

static NEXT_HANDLER_ID: AtomicU64 = AtomicU64::new(0);

/// Identifies a handler installed in a [`DiagnosticLog`]. Ids are unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    fn next() -> Self {
        HandlerId(NEXT_HANDLER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A handler that observes the diagnostics reported to a [`DiagnosticLog`].
pub trait DiagnosticHandler: Any {
    /// Handles a diagnostic. Handlers that intercept diagnostics are expected to pass them on to
    /// `prev`.
    fn report(&mut self, diagnostic: &dyn Diagnostic, prev: Prev<'_>) -> Result<(), ReportError>;

    /// Converts the boxed handler back into a value that can be downcast to its concrete type.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

struct Entry {
    id: HandlerId,
    handler: Box<dyn DiagnosticHandler>,
}

/// The handlers installed below the one currently handling a diagnostic.
pub struct Prev<'a> {
    entries: &'a mut [Entry],
}

impl Prev<'_> {
    /// Passes the diagnostic to the previous handler in the chain. Does nothing below the host's
    /// base handler.
    pub fn report(self, diagnostic: &dyn Diagnostic) -> Result<(), ReportError> {
        match self.entries.split_last_mut() {
            Some((head, rest)) => head.handler.report(diagnostic, Prev { entries: rest }),
            None => Ok(()),
        }
    }

    /// Returns the id of the handler `report` forwards to.
    pub fn id(&self) -> Option<HandlerId> {
        self.entries.last().map(|entry| entry.id)
    }
}

/// Proof that a handler of type `H` was installed in a [`DiagnosticLog`]. Passing it to
/// [`DiagnosticLog::uninstall`] is the only way to remove the handler again.
#[must_use = "an installed handler has to be removed with `DiagnosticLog::uninstall`"]
pub struct Installation<H> {
    id: HandlerId,
    previous: HandlerId,
    _handler: PhantomData<fn() -> H>,
}

impl<H> Installation<H> {
    /// Returns the id of the installed handler.
    pub fn id(&self) -> HandlerId {
        self.id
    }

    /// Returns the id of the handler that was the head of the chain before this one was installed.
    pub fn previous(&self) -> HandlerId {
        self.previous
    }
}

impl<H> fmt::Debug for Installation<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Installation")
            .field("id", &self.id)
            .field("previous", &self.previous)
            .finish()
    }
}

/// A stack of diagnostic handlers, with the host's handler at the bottom.
pub struct DiagnosticLog {
    base: HandlerId,
    /// Invariant: never empty, `entries[0]` is the base handler.
    entries: Vec<Entry>,
}

impl DiagnosticLog {
    /// Constructs a chain that delivers diagnostics to `base` only.
    pub fn new(base: impl DiagnosticHandler) -> Self {
        let base_id = HandlerId::next();
        DiagnosticLog {
            base: base_id,
            entries: vec![Entry {
                id: base_id,
                handler: Box::new(base),
            }],
        }
    }

    /// Offers a diagnostic to the head of the chain.
    pub fn report(&mut self, diagnostic: &dyn Diagnostic) -> Result<(), ReportError> {
        Prev {
            entries: &mut self.entries,
        }
        .report(diagnostic)
    }

    /// Returns the id of the handler that currently receives diagnostics first.
    pub fn head(&self) -> HandlerId {
        self.entries.last().map_or(self.base, |entry| entry.id)
    }

    /// Returns the id of the host's handler.
    pub fn base(&self) -> HandlerId {
        self.base
    }

    /// Returns the number of handlers installed on top of the host's handler.
    pub fn installed(&self) -> usize {
        self.entries.len() - 1
    }

    /// Makes `handler` the new head of the chain.
    pub fn install<H: DiagnosticHandler>(&mut self, handler: H) -> Installation<H> {
        let previous = self.head();
        let id = HandlerId::next();
        self.entries.push(Entry {
            id,
            handler: Box::new(handler),
        });
        log::debug!("installed diagnostic handler {id} on top of {previous}");
        Installation {
            id,
            previous,
            _handler: PhantomData,
        }
    }

    /// Removes a previously installed handler and returns it. Handlers have to be removed in the
    /// reverse order of their installation; removing any handler but the head fails and leaves
    /// the chain untouched, so the removal can be retried with the same `installation` once the
    /// handlers above it are gone.
    pub fn uninstall<H: DiagnosticHandler>(
        &mut self,
        installation: &Installation<H>,
    ) -> Result<H, ChainError> {
        let head = self.head();
        if head != installation.id || head == self.base {
            return Err(ChainError::NotHead {
                expected: installation.id,
                found: head,
            });
        }

        let entry = self
            .entries
            .pop()
            .ok_or(ChainError::UnexpectedType(installation.id))?;
        log::debug!(
            "uninstalled diagnostic handler {}, head is {}",
            entry.id,
            self.head()
        );
        entry
            .handler
            .into_any()
            .downcast::<H>()
            .map(|handler| *handler)
            .map_err(|_handler| ChainError::UnexpectedType(installation.id))
    }
}

impl fmt::Debug for DiagnosticLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticLog")
            .field("base", &self.base)
            .field(
                "handlers",
                &self.entries.iter().map(|entry| entry.id).collect::<Vec<_>>(),
            )
            .finish()
    }
}
