use std::path::{Path, PathBuf};

use diag_serializer::PLUGIN_NAME;

use crate::{Manifest, ManifestError};

/// The directory below the build directory that holds the serialized diagnostics of all units.
pub const OUTPUT_DIRECTORY: &str = "javac-diagnostics";

/// The first runtime major version whose compiler internals are only reachable from a forked
/// process with explicit module exports.
pub const FORK_REQUIRED_SINCE: u32 = 16;

/// Module exports that give the plugin access to compiler internals.
pub const JPMS_ARGS: [&str; 2] = [
    "--add-exports=jdk.compiler/com.sun.tools.javac.api=ALL-UNNAMED",
    "--add-exports=jdk.compiler/com.sun.tools.javac.util=ALL-UNNAMED",
];

/// Returns the conventional location of the diagnostics file of `unit`.
pub fn default_output_file(build_dir: &Path, unit: &str) -> PathBuf {
    build_dir.join(OUTPUT_DIRECTORY).join(format!("{unit}.txt"))
}

/// Returns true if a compiler running on the given runtime major version has to be forked.
pub fn requires_fork(runtime_version: u32) -> bool {
    runtime_version >= FORK_REQUIRED_SINCE
}

/// Provides the compiler arguments that load the serializer plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentProvider {
    output_file: Option<PathBuf>,
}

impl ArgumentProvider {
    pub fn new(output_file: Option<PathBuf>) -> Self {
        ArgumentProvider { output_file }
    }

    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }

    /// Returns the plugin option as a single argument, or nothing if no output file is
    /// configured.
    pub fn as_arguments(&self) -> Vec<String> {
        self.output_file
            .iter()
            .map(|path| format!("-Xplugin:{PLUGIN_NAME} {}", path.display()))
            .collect()
    }
}

/// Whether the compiler runs in a separate process and with which runtime arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForkOptions {
    pub fork: bool,
    pub jvm_args: Vec<String>,
}

impl ForkOptions {
    /// Returns the fork options for a compiler running on `runtime_version`. The module exports
    /// are always part of the runtime arguments; forking is only forced when the version is
    /// known to require it.
    pub fn for_runtime(runtime_version: Option<u32>) -> Self {
        ForkOptions {
            fork: runtime_version.is_some_and(requires_fork),
            jvm_args: JPMS_ARGS.iter().map(|arg| (*arg).to_owned()).collect(),
        }
    }
}

/// Everything a build tool needs to add to a compiler invocation of one compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerInvocation {
    arguments: ArgumentProvider,
    fork_options: ForkOptions,
}

impl CompilerInvocation {
    /// Returns the invocation of the named unit in `manifest`.
    pub fn for_unit(manifest: &Manifest, unit: &str) -> Result<Self, ManifestError> {
        let config = manifest.unit(unit)?;
        let arguments = ArgumentProvider::new(config.output_file().map(Path::to_path_buf));
        log::debug!(
            "unit '{unit}' serializes diagnostics to {:?}",
            arguments.output_file()
        );
        Ok(CompilerInvocation {
            arguments,
            fork_options: ForkOptions::for_runtime(manifest.runtime_version()),
        })
    }

    /// Recomputes the fork options for a different runtime version.
    #[must_use]
    pub fn with_runtime_version(mut self, runtime_version: u32) -> Self {
        self.fork_options = ForkOptions::for_runtime(Some(runtime_version));
        self
    }

    pub fn arguments(&self) -> &ArgumentProvider {
        &self.arguments
    }

    /// Returns the arguments to pass to the compiler.
    pub fn compiler_args(&self) -> Vec<String> {
        self.arguments.as_arguments()
    }

    pub fn fork_options(&self) -> &ForkOptions {
        &self.fork_options
    }
}
