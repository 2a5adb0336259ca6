//! Ties the lifetime of a [`SerializingDiagnosticHandler`] to a single compilation.

mod options;

use std::fmt;

pub use self::options::PluginOptions;
use crate::{
    chain::Installation, error::PluginError, handler::SerializingDiagnosticHandler,
    DiagnosticLog, Locale,
};

/// The name the serializer is registered under. Hosts select it with
/// `-Xplugin:JavacDiagnosticsSerializer <output file>`.
pub const PLUGIN_NAME: &str = "JavacDiagnosticsSerializer";

/// The phases of a compilation that task listeners are notified about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskEventKind {
    Parse,
    Enter,
    Analyze,
    Generate,
    AnnotationProcessing,
    AnnotationProcessingRound,
    /// The compilation as a whole. Its `finished` event is the last event of a compilation.
    Compilation,
}

/// Notification that a compilation phase started or finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEvent {
    kind: TaskEventKind,
    source: Option<String>,
}

impl TaskEvent {
    pub fn new(kind: TaskEventKind) -> Self {
        TaskEvent { kind, source: None }
    }

    /// Constructs an event for a phase that processes a single source file.
    pub fn for_source(kind: TaskEventKind, source: impl Into<String>) -> Self {
        TaskEvent {
            kind,
            source: Some(source.into()),
        }
    }

    pub fn kind(&self) -> TaskEventKind {
        self.kind
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

/// The state a compiler shares with its extensions.
pub trait CompilerContext {
    /// Returns the chain of handlers diagnostics are reported to.
    fn log(&mut self) -> &mut DiagnosticLog;

    /// Returns the locale diagnostics are rendered in.
    fn locale(&self) -> Locale;
}

/// Receives notifications about the progress of a compilation.
pub trait TaskListener {
    fn started(
        &mut self,
        _event: &TaskEvent,
        _context: &mut dyn CompilerContext,
    ) -> Result<(), PluginError> {
        Ok(())
    }

    fn finished(
        &mut self,
        event: &TaskEvent,
        context: &mut dyn CompilerContext,
    ) -> Result<(), PluginError>;
}

/// A running compilation, as seen by a plugin while it is initialized.
pub trait CompilationTask {
    fn context(&mut self) -> &mut dyn CompilerContext;

    fn add_task_listener(&mut self, listener: Box<dyn TaskListener>);
}

/// A compiler extension.
pub trait Plugin {
    /// Returns the name hosts select the plugin by.
    fn name(&self) -> &str;

    /// Initializes the plugin for a compilation. Returning an error aborts the compilation.
    fn init(&self, task: &mut dyn CompilationTask, args: &[String]) -> Result<(), PluginError>;
}

/// Writes the diagnostics of a compilation to the file passed as its first argument.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiagnosticsSerializerPlugin;

impl Plugin for DiagnosticsSerializerPlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn init(&self, task: &mut dyn CompilationTask, args: &[String]) -> Result<(), PluginError> {
        let options = PluginOptions::parse(args)?;

        let context = task.context();
        let locale = context.locale();
        let installation =
            SerializingDiagnosticHandler::install(context.log(), options.output_file, locale)?;

        task.add_task_listener(Box::new(CompletionListener {
            installation: Some(installation),
        }));
        Ok(())
    }
}

/// Tears the handler down once the compilation finished.
struct CompletionListener {
    installation: Option<Installation<SerializingDiagnosticHandler>>,
}

impl TaskListener for CompletionListener {
    fn finished(
        &mut self,
        event: &TaskEvent,
        context: &mut dyn CompilerContext,
    ) -> Result<(), PluginError> {
        if event.kind() != TaskEventKind::Compilation {
            return Ok(());
        }
        let Some(installation) = &self.installation else {
            return Ok(());
        };

        // On failure the token is kept so a later completion can retry the removal.
        let handler = context.log().uninstall(installation)?;
        self.installation = None;
        let path = handler.output_file().to_path_buf();
        handler
            .close()
            .map_err(|source| PluginError::CloseOutput { path, source })
    }
}

impl fmt::Debug for CompletionListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionListener")
            .field("installation", &self.installation)
            .finish()
    }
}
