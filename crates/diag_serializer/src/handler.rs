//! The handler that writes one record per diagnostic to the output file.

mod record;

use std::{
    any::Any,
    fs::File,
    io::{self, LineWriter, Write},
    path::{Path, PathBuf},
};

pub use self::record::{
    is_suppressed, linter_finding, Record, LINE_SEPARATOR, LINTER_CODES, WARNINGS_AS_ERRORS_CODE,
};
use crate::{
    chain::{DiagnosticHandler, Installation, Prev},
    error::{PluginError, ReportError},
    Diagnostic, DiagnosticLog, Locale,
};

/// Serializes every diagnostic it receives to a file, then passes it on unchanged.
///
/// The file is created, or truncated if it exists, when the handler is constructed and stays
/// open until [`close`](Self::close) is called. Records are handed to the operating system one
/// complete line at a time.
#[derive(Debug)]
pub struct SerializingDiagnosticHandler {
    writer: LineWriter<File>,
    output_file: PathBuf,
    locale: Locale,
}

impl SerializingDiagnosticHandler {
    /// Creates the output file without installing the handler.
    pub fn create(output_file: impl Into<PathBuf>, locale: Locale) -> Result<Self, PluginError> {
        let output_file = output_file.into();
        let file = File::create(&output_file).map_err(|source| PluginError::CreateOutput {
            path: output_file.clone(),
            source,
        })?;
        Ok(SerializingDiagnosticHandler {
            writer: LineWriter::new(file),
            output_file,
            locale,
        })
    }

    /// Creates the output file and installs the handler as the head of `log`.
    pub fn install(
        log: &mut DiagnosticLog,
        output_file: impl Into<PathBuf>,
        locale: Locale,
    ) -> Result<Installation<Self>, PluginError> {
        let handler = Self::create(output_file, locale)?;
        log::debug!(
            "serializing diagnostics to '{}'",
            handler.output_file.display()
        );
        Ok(log.install(handler))
    }

    /// Returns the path of the file records are written to.
    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Flushes all records to disk and closes the output file.
    pub fn close(self) -> io::Result<()> {
        let file = self.writer.into_inner().map_err(io::IntoInnerError::into_error)?;
        file.sync_all()?;
        log::debug!("closed '{}'", self.output_file.display());
        Ok(())
    }

    fn write_record(&mut self, diagnostic: &dyn Diagnostic) -> io::Result<()> {
        let record = Record::new(diagnostic, &self.locale);
        log::trace!("{record}");
        let line = format!("{record}{LINE_SEPARATOR}");
        self.writer.write_all(line.as_bytes())
    }
}

impl DiagnosticHandler for SerializingDiagnosticHandler {
    fn report(&mut self, diagnostic: &dyn Diagnostic, prev: Prev<'_>) -> Result<(), ReportError> {
        let written = if is_suppressed(diagnostic) {
            Ok(())
        } else {
            self.write_record(diagnostic)
        };

        // The rest of the chain sees every diagnostic, even if it could not be written.
        let forwarded = prev.report(diagnostic);

        written.map_err(|source| ReportError::Write {
            path: self.output_file.clone(),
            source,
        })?;
        forwarded
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

#[cfg(test)]
mod tests {
    use std::{any::Any, cell::RefCell, fs, rc::Rc};

    use super::SerializingDiagnosticHandler;
    use crate::{
        chain::{DiagnosticHandler, Prev},
        error::PluginError,
        Diagnostic, DiagnosticKind, DiagnosticLog, Locale, ReportError,
    };

    struct Warning {
        code: &'static str,
        line: u64,
    }

    impl Diagnostic for Warning {
        fn source(&self) -> Option<&str> {
            Some("Foo.java")
        }

        fn line_number(&self) -> Option<u64> {
            Some(self.line)
        }

        fn kind(&self) -> DiagnosticKind {
            DiagnosticKind::Warning
        }

        fn code(&self) -> &str {
            self.code
        }

        fn message(&self, _locale: &Locale) -> String {
            format!("warning {}", self.line)
        }
    }

    #[derive(Default)]
    struct Codes(Rc<RefCell<Vec<String>>>);

    impl DiagnosticHandler for Codes {
        fn report(
            &mut self,
            diagnostic: &dyn Diagnostic,
            _prev: Prev<'_>,
        ) -> Result<(), ReportError> {
            self.0.borrow_mut().push(diagnostic.code().to_owned());
            Ok(())
        }

        fn into_any(self: Box<Self>) -> Box<dyn Any> {
            self
        }
    }

    #[test]
    fn writes_records_and_forwards() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diagnostics.txt");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut log = DiagnosticLog::new(Codes(Rc::clone(&seen)));

        let installation =
            SerializingDiagnosticHandler::install(&mut log, &path, Locale::root()).unwrap();
        log.report(&Warning {
            code: "compiler.warn.a",
            line: 1,
        })
        .unwrap();
        log.report(&Warning {
            code: "compiler.err.warnings.and.werror",
            line: 2,
        })
        .unwrap();
        log.report(&Warning {
            code: "compiler.warn.b",
            line: 3,
        })
        .unwrap();
        log.uninstall(&installation).unwrap().close().unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap().lines().collect::<Vec<_>>(),
            vec![
                "Foo.java:1: WARNING: message=warning 1",
                "Foo.java:3: WARNING: message=warning 3",
            ]
        );
        assert_eq!(
            *seen.borrow(),
            vec![
                "compiler.warn.a",
                "compiler.err.warnings.and.werror",
                "compiler.warn.b"
            ]
        );
    }

    #[test]
    fn records_are_on_disk_before_close() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diagnostics.txt");
        let mut log = DiagnosticLog::new(Codes::default());

        let installation =
            SerializingDiagnosticHandler::install(&mut log, &path, Locale::root()).unwrap();
        log.report(&Warning {
            code: "compiler.warn.a",
            line: 1,
        })
        .unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap().trim_end(),
            "Foo.java:1: WARNING: message=warning 1"
        );
        log.uninstall(&installation).unwrap().close().unwrap();
    }

    #[test]
    fn create_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diagnostics.txt");
        fs::write(&path, "stale record\n").unwrap();

        let handler = SerializingDiagnosticHandler::create(&path, Locale::root()).unwrap();
        assert_eq!(handler.output_file(), path);
        handler.close().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn create_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("diagnostics.txt");
        let mut log = DiagnosticLog::new(Codes::default());

        let error = SerializingDiagnosticHandler::install(&mut log, &path, Locale::root())
            .unwrap_err();
        assert!(matches!(error, PluginError::CreateOutput { path: p, .. } if p == path));
        assert_eq!(log.installed(), 0);
    }
}
