use std::path::PathBuf;

use crate::error::PluginError;

/// The arguments the plugin was invoked with.
///
/// Only the first argument, the path of the output file, is understood. Anything after it is
/// reserved for `key=value` options and is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginOptions {
    pub output_file: PathBuf,
}

impl PluginOptions {
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, PluginError> {
        let (output_file, rest) = args
            .split_first()
            .map(|(first, rest)| (first.as_ref(), rest))
            .filter(|(first, _)| !first.is_empty())
            .ok_or(PluginError::MissingOutputPath)?;

        for ignored in rest {
            log::warn!(
                "ignoring unsupported diagnostics serializer option '{}'",
                ignored.as_ref()
            );
        }

        Ok(PluginOptions {
            output_file: PathBuf::from(output_file),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::PluginOptions;
    use crate::error::PluginError;

    #[test]
    fn first_argument_is_output_file() {
        let options = PluginOptions::parse(&["build/javac-diagnostics/main.txt"]).unwrap();
        assert_eq!(
            options.output_file,
            Path::new("build/javac-diagnostics/main.txt")
        );
    }

    #[test]
    fn extra_arguments_are_ignored() {
        let options = PluginOptions::parse(&["out.txt", "format=json"]).unwrap();
        assert_eq!(options.output_file, Path::new("out.txt"));
    }

    #[test]
    fn missing_output_file() {
        let no_args: [&str; 0] = [];
        assert!(matches!(
            PluginOptions::parse(&no_args),
            Err(PluginError::MissingOutputPath)
        ));
        assert!(matches!(
            PluginOptions::parse(&[""]),
            Err(PluginError::MissingOutputPath)
        ));
    }
}
