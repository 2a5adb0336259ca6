use std::{
    collections::{btree_map::Entry, BTreeMap},
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::default_output_file;

mod toml;

/// The name of the file that describes the compilation units of a project.
pub const MANIFEST_FILENAME: &str = "diag-serializer.toml";

/// The build directory used when the manifest does not specify one.
const DEFAULT_BUILD_DIR: &str = "build";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("could not read manifest file '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse manifest")]
    Parse(#[from] ::toml::de::Error),
    #[error("compilation unit names cannot be empty")]
    EmptyUnitName,
    #[error("compilation unit '{0}' is defined more than once")]
    DuplicateUnit(String),
    #[error("no compilation unit named '{0}' in the manifest")]
    UnknownUnit(String),
}

/// How diagnostics of one compilation unit are serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitConfig {
    output_file: PathBuf,
    enabled: bool,
}

impl UnitConfig {
    /// Returns the file the diagnostics of the unit are written to, or `None` if serialization is
    /// disabled for the unit.
    pub fn output_file(&self) -> Option<&Path> {
        self.enabled.then_some(self.output_file.as_path())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// The compilation units of a project and where their diagnostics go. Usually this information
/// is read from a diag-serializer.toml file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    build_dir: PathBuf,
    runtime_version: Option<u32>,
    units: BTreeMap<String, UnitConfig>,
}

impl Manifest {
    /// Try to read a manifest from a file. Relative paths in the manifest are resolved against
    /// the directory that contains it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Manifest, ManifestError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let root = path.parent().unwrap_or_else(|| Path::new(""));
        Self::parse(&contents, root)
    }

    /// Parses the contents of a manifest, resolving relative paths against `root`.
    pub fn parse(contents: &str, root: &Path) -> Result<Manifest, ManifestError> {
        let manifest = ::toml::from_str::<toml::TomlManifest>(contents)?;

        let build_dir = root.join(
            manifest
                .project
                .build_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_DIR)),
        );

        let mut units = BTreeMap::new();
        for (name, unit) in manifest.units {
            let name = name.trim().to_owned();
            if name.is_empty() {
                return Err(ManifestError::EmptyUnitName);
            }
            let output_file = unit.output_file.map_or_else(
                || default_output_file(&build_dir, &name),
                |output_file| root.join(output_file),
            );
            let config = UnitConfig {
                output_file,
                enabled: unit.enabled.unwrap_or(true),
            };
            match units.entry(name) {
                Entry::Vacant(entry) => {
                    entry.insert(config);
                }
                Entry::Occupied(entry) => {
                    return Err(ManifestError::DuplicateUnit(entry.key().clone()))
                }
            }
        }

        Ok(Manifest {
            build_dir,
            runtime_version: manifest.project.runtime_version,
            units,
        })
    }

    /// Returns the directory build outputs are written to.
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Returns the major version of the compiler runtime, if known.
    pub fn runtime_version(&self) -> Option<u32> {
        self.runtime_version
    }

    /// Returns the configuration of the named compilation unit.
    pub fn unit(&self, name: &str) -> Result<&UnitConfig, ManifestError> {
        self.units
            .get(name)
            .ok_or_else(|| ManifestError::UnknownUnit(name.to_owned()))
    }

    /// Returns the names of all compilation units, sorted.
    pub fn unit_names(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{Manifest, ManifestError};

    #[test]
    fn defaults() {
        let manifest = Manifest::parse(
            r#"
        [units.main]
        "#,
            Path::new("/project"),
        )
        .unwrap();

        assert_eq!(manifest.build_dir(), Path::new("/project/build"));
        assert_eq!(manifest.runtime_version(), None);
        assert_eq!(
            manifest.unit("main").unwrap().output_file(),
            Some(Path::new("/project/build/javac-diagnostics/main.txt"))
        );
    }

    #[test]
    fn overridden_output_file() {
        let manifest = Manifest::parse(
            r#"
        [project]
        build-dir = "target"

        [units.main]
        output-file = "target/foo.txt"
        "#,
            Path::new("/project"),
        )
        .unwrap();

        assert_eq!(
            manifest.unit("main").unwrap().output_file(),
            Some(Path::new("/project/target/foo.txt"))
        );
    }

    #[test]
    fn disabled_unit_has_no_output_file() {
        let manifest = Manifest::parse(
            r#"
        [units.main]
        enabled = false
        "#,
            Path::new("/project"),
        )
        .unwrap();

        let unit = manifest.unit("main").unwrap();
        assert!(!unit.is_enabled());
        assert_eq!(unit.output_file(), None);
    }

    #[test]
    fn unknown_unit() {
        let manifest = Manifest::parse("", Path::new("/project")).unwrap();
        assert!(matches!(
            manifest.unit("main"),
            Err(ManifestError::UnknownUnit(name)) if name == "main"
        ));
    }

    #[test]
    fn empty_unit_name() {
        assert!(matches!(
            Manifest::parse("[units.\" \"]", Path::new("/project")),
            Err(ManifestError::EmptyUnitName)
        ));
    }

    #[test]
    fn names_equal_after_trimming_are_rejected() {
        let result = Manifest::parse(
            r#"
        [units.main]
        [units." main"]
        "#,
            Path::new("/project"),
        );
        assert!(matches!(
            result,
            Err(ManifestError::DuplicateUnit(name)) if name == "main"
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            Manifest::parse(
                r#"
            [units.main]
            output = "foo.txt"
            "#,
                Path::new("/project")
            ),
            Err(ManifestError::Parse(_))
        ));
    }
}
