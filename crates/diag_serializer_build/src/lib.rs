//! Integration of the diagnostics serializer into a build: where each compilation unit writes its
//! diagnostics and which arguments a compiler invocation needs to load the plugin.

mod invocation;
mod manifest;

pub use self::{
    invocation::{
        default_output_file, requires_fork, ArgumentProvider, CompilerInvocation, ForkOptions,
        FORK_REQUIRED_SINCE, JPMS_ARGS, OUTPUT_DIRECTORY,
    },
    manifest::{Manifest, ManifestError, UnitConfig, MANIFEST_FILENAME},
};
