use std::path::PathBuf;
use thiserror::Error;

/// Build-time failures of the accessor generator.
///
/// These are programmer errors in the type index or configuration and abort
/// generation. A missing ancestor is not one of them: it is logged and skipped.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("malformed type name '{name}': {reason}")]
    MalformedTypeName { name: String, reason: String },

    #[error("unsupported nesting for type '{name}': {nesting}")]
    UnsupportedNesting { name: String, nesting: String },

    #[error("invalid ignore pattern '{pattern}' for {type_name}: {source}")]
    InvalidIgnorePattern {
        type_name: String,
        pattern: String,
        source: regex::Error,
    },

    #[error("type '{name}' not found in the index")]
    UnknownType { name: String },

    #[error("accessor configuration on '{declared_on}' has no target")]
    MissingTarget { declared_on: String },

    #[error("failed to write artifact '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl GeneratorError {
    pub fn malformed_type_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedTypeName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn unsupported_nesting(name: impl Into<String>, nesting: impl Into<String>) -> Self {
        Self::UnsupportedNesting {
            name: name.into(),
            nesting: nesting.into(),
        }
    }

    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType { name: name.into() }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
