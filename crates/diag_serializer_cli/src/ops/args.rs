use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use diag_serializer_build::{CompilerInvocation, Manifest, MANIFEST_FILENAME};

use crate::ExitStatus;

#[derive(clap::Args)]
pub struct Args {
    /// Path to the manifest of the project
    #[clap(long)]
    manifest_path: Option<PathBuf>,

    /// Name of the compilation unit
    #[clap(long)]
    unit: String,

    /// Major version of the compiler runtime, overrides the manifest
    #[clap(long)]
    runtime_version: Option<u32>,
}

/// This method is invoked when the executable is run with the `args` argument. It prints the
/// arguments a compiler invocation of the requested unit needs, one per line. Fails with
/// [`ExitStatus::Error`] if serialization is disabled for the unit, like `grep` without a match.
pub fn args(args: Args) -> Result<ExitStatus, anyhow::Error> {
    log::trace!("resolving arguments of unit '{}'", args.unit);

    let manifest_path = match &args.manifest_path {
        None => {
            let current_dir =
                std::env::current_dir().context("could not determine current working directory")?;
            find_manifest(&current_dir).ok_or_else(|| {
                anyhow!(
                    "could not find {} in '{}' or a parent directory",
                    MANIFEST_FILENAME,
                    current_dir.display()
                )
            })?
        }
        Some(path) => std::fs::canonicalize(path).map_err(|_| {
            anyhow!(
                "'{}' does not refer to a valid manifest path",
                path.display()
            )
        })?,
    };

    log::info!("located manifest at: {}", manifest_path.display());

    let manifest = Manifest::from_file(&manifest_path)?;
    let mut invocation = CompilerInvocation::for_unit(&manifest, &args.unit)?;
    if let Some(version) = args.runtime_version {
        invocation = invocation.with_runtime_version(version);
    }

    write_invocation(&mut io::stdout().lock(), &invocation)?;
    Ok(invocation.arguments().output_file().is_some().into())
}

/// Writes the compiler arguments of `invocation`, followed by the runtime arguments prefixed with
/// `-J` if the compiler has to be forked.
fn write_invocation(out: &mut impl Write, invocation: &CompilerInvocation) -> io::Result<()> {
    for arg in invocation.compiler_args() {
        writeln!(out, "{arg}")?;
    }
    let fork_options = invocation.fork_options();
    if fork_options.fork {
        for arg in &fork_options.jvm_args {
            writeln!(out, "-J{arg}")?;
        }
    }
    Ok(())
}

/// Find a manifest file in the specified directory or one of its parents.
fn find_manifest(directory: &Path) -> Option<PathBuf> {
    let mut current_dir = Some(directory);
    while let Some(dir) = current_dir {
        let manifest_path = dir.join(MANIFEST_FILENAME);
        if manifest_path.exists() {
            return Some(manifest_path);
        }
        current_dir = dir.parent();
    }
    None
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use diag_serializer_build::{CompilerInvocation, Manifest, MANIFEST_FILENAME};

    use super::{find_manifest, write_invocation};

    #[test]
    fn test_find_manifest() {
        let dir = tempfile::Builder::new()
            .prefix("test_find_manifest")
            .tempdir()
            .unwrap();
        let path = dir.path();
        let manifest_path = path.join(MANIFEST_FILENAME);

        assert_eq!(find_manifest(path), None);

        std::fs::write(&manifest_path, "").unwrap();
        assert_eq!(find_manifest(path).as_ref(), Some(&manifest_path));

        let subdir_path = path.join("some/random/subdir");
        std::fs::create_dir_all(&subdir_path).unwrap();
        assert_eq!(find_manifest(&subdir_path).as_ref(), Some(&manifest_path));
    }

    fn written(manifest: &str, runtime_version: Option<u32>) -> String {
        let manifest = Manifest::parse(manifest, Path::new("/project")).unwrap();
        let mut invocation = CompilerInvocation::for_unit(&manifest, "main").unwrap();
        if let Some(version) = runtime_version {
            invocation = invocation.with_runtime_version(version);
        }
        let mut out = Vec::new();
        write_invocation(&mut out, &invocation).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn no_fork() {
        assert_eq!(
            written("[units.main]", Some(11)),
            "-Xplugin:JavacDiagnosticsSerializer /project/build/javac-diagnostics/main.txt\n"
        );
    }

    #[test]
    fn fork_adds_runtime_arguments() {
        assert_eq!(
            written("[project]\nruntime-version = 17\n[units.main]", None),
            "-Xplugin:JavacDiagnosticsSerializer /project/build/javac-diagnostics/main.txt\n\
             -J--add-exports=jdk.compiler/com.sun.tools.javac.api=ALL-UNNAMED\n\
             -J--add-exports=jdk.compiler/com.sun.tools.javac.util=ALL-UNNAMED\n"
        );
    }

    #[test]
    fn disabled_unit_without_fork_writes_nothing() {
        assert_eq!(written("[units.main]\nenabled = false", None), "");
    }
}
