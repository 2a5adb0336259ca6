//! Structured payloads attached to diagnostics by static-analysis integrations.

use std::ops::Range;

/// A single text edit that is part of a [`Fix`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// Byte range in the source file that is replaced.
    pub range: Range<usize>,
    pub replace_with: String,
}

/// A fix proposed by an analyzer check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fix {
    /// A short description of what the fix does, may be empty.
    pub description: String,
    pub replacements: Vec<Replacement>,
}

impl Fix {
    /// Constructs a fix consisting of a single replacement.
    pub fn replace(range: Range<usize>, replace_with: impl Into<String>) -> Self {
        Fix {
            description: String::new(),
            replacements: vec![Replacement {
                range,
                replace_with: replace_with.into(),
            }],
        }
    }
}

/// What an analyzer check reported, independent of the locale the compiler renders messages in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinterDescription {
    /// The name of the check that produced this description; serialized as the rule id.
    pub check_name: String,
    /// The message before any localization or link decoration.
    pub raw_message: String,
    /// Where to find documentation for the check.
    pub link: Option<String>,
    pub fixes: Vec<Fix>,
}

impl LinterDescription {
    pub fn new(check_name: impl Into<String>, raw_message: impl Into<String>) -> Self {
        LinterDescription {
            check_name: check_name.into(),
            raw_message: raw_message.into(),
            link: None,
            fixes: Vec::new(),
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fixes.push(fix);
        self
    }
}

/// The single argument of a linter-integration diagnostic: the description plus the fixes that
/// were applied to the sources while compiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinterFinding {
    pub description: LinterDescription,
    pub applied_fixes: Vec<Fix>,
}

impl LinterFinding {
    pub fn new(description: LinterDescription) -> Self {
        LinterFinding {
            description,
            applied_fixes: Vec::new(),
        }
    }

    pub fn with_applied_fix(mut self, fix: Fix) -> Self {
        self.applied_fixes.push(fix);
        self
    }
}
