use std::{collections::BTreeMap, path::PathBuf};

use serde_derive::{Deserialize, Serialize};

/// A manifest as specified in a diag-serializer.toml file.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TomlManifest {
    #[serde(default)]
    pub project: TomlProject,
    #[serde(default)]
    pub units: BTreeMap<String, TomlUnit>,
}

/// Represents the `project` section of a diag-serializer.toml file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TomlProject {
    pub build_dir: Option<PathBuf>,
    pub runtime_version: Option<u32>,
}

/// Represents a `units.<name>` section of a diag-serializer.toml file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TomlUnit {
    pub output_file: Option<PathBuf>,
    pub enabled: Option<bool>,
}
