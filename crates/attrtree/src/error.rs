//! Error types for attrtree
//!
//! Provides error handling for:
//! - Attribute lookup on nodes that may not grow new attributes
//! - Mutations refused by read-only protection
//! - Navigation through values of the wrong shape
//! - Loading documents from JSON/YAML sources

use std::convert::Infallible;
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use crate::path::PathError;
use crate::value::ValueKind;

/// The kind of write that read-only protection refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    /// Adding an attribute that did not exist
    Create,
    /// Replacing the value of an existing attribute
    Overwrite,
    /// Removing an attribute
    Delete,
}

impl Display for Mutation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Create => "create",
            Self::Overwrite => "overwrite",
            Self::Delete => "delete",
        };
        f.write_str(verb)
    }
}

/// Errors raised by tree operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AttrError {
    /// Name is absent and no new attribute may be materialized here
    #[error("no such attribute: '{name}'")]
    AttributeLookup { name: String },

    /// Write refused because the tree is read-only
    #[error("cannot {op} attribute '{name}' of a read-only node")]
    MutationRejected { name: String, op: Mutation },

    /// Navigation expected a child node
    #[error("attribute '{name}' holds a {found}, not a node")]
    NotANode { name: String, found: ValueKind },

    /// Navigation expected a sequence
    #[error("attribute '{name}' holds a {found}, not a sequence")]
    NotASequence { name: String, found: ValueKind },

    /// Sequence index past the end
    #[error("index {index} out of range for '{name}' (length {len})")]
    IndexOutOfRange {
        name: String,
        index: usize,
        len: usize,
    },

    /// Plain input was not a mapping where one was required
    #[error("expected a mapping, got a {found}")]
    NotAMapping { found: ValueKind },

    /// Malformed dotted path
    #[error("invalid path: {0}")]
    InvalidPath(#[from] PathError),
}

impl AttrError {
    /// Create attribute lookup error
    pub fn lookup(name: impl Into<String>) -> Self {
        Self::AttributeLookup { name: name.into() }
    }

    /// Create mutation rejected error
    pub fn rejected(name: impl Into<String>, op: Mutation) -> Self {
        Self::MutationRejected {
            name: name.into(),
            op,
        }
    }

    /// Check if this is an attribute lookup failure
    #[inline]
    #[must_use]
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::AttributeLookup { .. })
    }

    /// Check if read-only protection refused the operation
    #[inline]
    #[must_use]
    pub fn is_mutation_rejected(&self) -> bool {
        matches!(self, Self::MutationRejected { .. })
    }
}

impl From<Infallible> for AttrError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Errors while loading a document into a tree
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid JSON
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Document is not valid YAML
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// No format given and the extension is not recognized
    #[error("unsupported document format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Document root is not a mapping
    #[error("document root must be a mapping, got a {found}")]
    NotAMapping { found: ValueKind },
}

impl LoadError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors while emitting a tree as text
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// JSON serialization failed
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization failed
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for tree operations
pub type AttrResult<T> = Result<T, AttrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_error_display() {
        let err = AttrError::lookup("attr1");
        assert_eq!(err.to_string(), "no such attribute: 'attr1'");
        assert!(err.is_lookup());
        assert!(!err.is_mutation_rejected());
    }

    #[test]
    fn rejected_error_display() {
        let err = AttrError::rejected("attr1", Mutation::Overwrite);
        assert_eq!(
            err.to_string(),
            "cannot overwrite attribute 'attr1' of a read-only node"
        );
        assert!(err.is_mutation_rejected());
    }

    #[test]
    fn not_a_node_display() {
        let err = AttrError::NotANode {
            name: "a".to_string(),
            found: ValueKind::Number,
        };
        assert_eq!(err.to_string(), "attribute 'a' holds a number, not a node");
    }

    #[test]
    fn path_error_conversion() {
        let err: AttrError = PathError::EmptySegment.into();
        assert!(matches!(err, AttrError::InvalidPath(PathError::EmptySegment)));
    }
}
