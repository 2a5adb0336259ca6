use anyhow::{anyhow, bail};
use diag_serializer::{
    plugin::{CompilationTask, CompilerContext, TaskEvent, TaskEventKind, TaskListener},
    DiagnosticLog, Locale, Plugin, WARNINGS_AS_ERRORS_CODE,
};

use crate::{Recording, RecordingHandler, TestDiagnostic};

/// The part of the [`TestCompiler`] shared with plugins and their listeners.
#[derive(Debug)]
pub struct TestContext {
    log: DiagnosticLog,
    locale: Locale,
}

impl CompilerContext for TestContext {
    fn log(&mut self) -> &mut DiagnosticLog {
        &mut self.log
    }

    fn locale(&self) -> Locale {
        self.locale.clone()
    }
}

/// The outcome of a [`TestCompiler::compile`] run, as counted by the host's own handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilationResult {
    pub errors: usize,
    pub warnings: usize,
}

impl CompilationResult {
    pub fn succeeded(&self) -> bool {
        self.errors == 0
    }
}

/// A compiler that does not compile anything: it reports a scripted list of diagnostics while
/// notifying plugins about its progress the way a real compiler would.
pub struct TestCompiler {
    context: TestContext,
    listeners: Vec<Box<dyn TaskListener>>,
    recording: Recording,
    warnings_as_errors: bool,
}

impl Default for TestCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCompiler {
    pub fn new() -> Self {
        let handler = RecordingHandler::new();
        let recording = handler.recording();
        TestCompiler {
            context: TestContext {
                log: DiagnosticLog::new(handler),
                locale: Locale::root(),
            },
            listeners: Vec::new(),
            recording,
            warnings_as_errors: false,
        }
    }

    /// Sets the locale diagnostics are rendered in.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.context.locale = locale;
        self
    }

    /// Fails the compilation if any warnings are reported, like `-Werror`.
    pub fn warnings_as_errors(mut self) -> Self {
        self.warnings_as_errors = true;
        self
    }

    /// Loads a plugin from the value of a `-Xplugin:` option: the plugin name, optionally
    /// followed by whitespace separated arguments.
    pub fn load_plugin(&mut self, plugin: &dyn Plugin, option: &str) -> anyhow::Result<()> {
        let mut tokens = option.split_whitespace();
        let name = tokens
            .next()
            .ok_or_else(|| anyhow!("plugin option without a plugin name"))?;
        if name != plugin.name() {
            bail!("plugin not found: {name}");
        }
        let args: Vec<String> = tokens.map(str::to_owned).collect();
        plugin.init(self, &args)?;
        Ok(())
    }

    /// Runs a compilation that reports `diagnostics`. Returns an error if a handler or a task
    /// listener failed. A failure before the end of the compilation abandons it without
    /// notifying listeners that it finished.
    pub fn compile(
        &mut self,
        diagnostics: impl IntoIterator<Item = TestDiagnostic>,
    ) -> anyhow::Result<CompilationResult> {
        let errors_before = self.recording.error_count();
        let warnings_before = self.recording.warning_count();

        self.started(&TaskEvent::new(TaskEventKind::Compilation))?;
        self.phase(TaskEventKind::Parse)?;
        self.phase(TaskEventKind::Enter)?;

        let analyze = TaskEvent::new(TaskEventKind::Analyze);
        self.started(&analyze)?;
        for diagnostic in diagnostics {
            self.context.log.report(&diagnostic)?;
        }
        self.finished(&analyze)?;

        if self.warnings_as_errors && self.recording.warning_count() > warnings_before {
            let werror = TestDiagnostic::error(
                WARNINGS_AS_ERRORS_CODE,
                "warnings found and -Werror specified",
            );
            self.context.log.report(&werror)?;
        } else {
            self.phase(TaskEventKind::Generate)?;
        }
        self.finished(&TaskEvent::new(TaskEventKind::Compilation))?;

        Ok(CompilationResult {
            errors: self.recording.error_count() - errors_before,
            warnings: self.recording.warning_count() - warnings_before,
        })
    }

    /// Returns what the host's own diagnostic handler received.
    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    pub fn log(&self) -> &DiagnosticLog {
        &self.context.log
    }

    fn phase(&mut self, kind: TaskEventKind) -> anyhow::Result<()> {
        let event = TaskEvent::new(kind);
        self.started(&event)?;
        self.finished(&event)
    }

    fn started(&mut self, event: &TaskEvent) -> anyhow::Result<()> {
        log::trace!("started {:?}", event.kind());
        for listener in &mut self.listeners {
            listener.started(event, &mut self.context)?;
        }
        Ok(())
    }

    /// Notifies every listener, even after one of them failed, and returns the first failure.
    fn finished(&mut self, event: &TaskEvent) -> anyhow::Result<()> {
        log::trace!("finished {:?}", event.kind());
        let mut result: anyhow::Result<()> = Ok(());
        for listener in &mut self.listeners {
            if let Err(error) = listener.finished(event, &mut self.context) {
                log::debug!("task listener failed: {error}");
                if result.is_ok() {
                    result = Err(error.into());
                }
            }
        }
        result
    }
}

impl CompilationTask for TestCompiler {
    fn context(&mut self) -> &mut dyn CompilerContext {
        &mut self.context
    }

    fn add_task_listener(&mut self, listener: Box<dyn TaskListener>) {
        self.listeners.push(listener);
    }
}
