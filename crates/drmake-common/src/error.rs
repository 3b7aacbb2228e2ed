//! Unified error types for the drmake workspace.
//!
//! Every fallible operation in the core returns one of these kinds as a
//! value. Deciding whether a failure aborts the run is left to the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum DrmakeError {
    /// The manifest file could not be opened or read.
    #[error("failed to read manifest {path}: {source}")]
    ManifestUnreadable {
        /// Path of the manifest.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A dependency, requested target, or same-file reference names a
    /// target absent from the registry.
    #[error("unknown target: {name}")]
    UnknownTarget {
        /// The name that failed to resolve.
        name: String,
    },

    /// An argument-declaration line did not carry exactly one operand.
    #[error("line {line}: argument declaration takes exactly one KEY=VALUE operand, found {operands}")]
    MalformedArgumentDeclaration {
        /// 1-based line number where the logical line starts.
        line: usize,
        /// Number of operands found.
        operands: usize,
    },

    /// A workspace- or path-referenced recipe file could not be read.
    #[error("failed to read recipe for {reference} at {path}: {source}")]
    RecipeFileUnreadable {
        /// The image reference as written in the manifest.
        reference: String,
        /// Path of the recipe file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Resolution or planning revisited a target already on the active
    /// recursion stack.
    #[error("dependency cycle detected: {}", chain.join(" -> "))]
    DependencyCycle {
        /// The names on the stack, closed by the revisited name.
        chain: Vec<String>,
    },

    /// An I/O operation outside manifest/recipe reading failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A container-runtime collaborator reported a failure.
    #[error("container runtime error: {message}")]
    Runtime {
        /// Description of the failure.
        message: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl DrmakeError {
    /// Shorthand for [`DrmakeError::UnknownTarget`].
    pub fn unknown_target(name: impl Into<String>) -> Self {
        Self::UnknownTarget { name: name.into() }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, DrmakeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_message_joins_chain() {
        let err = DrmakeError::DependencyCycle {
            chain: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(err.to_string(), "dependency cycle detected: a -> b -> a");
    }

    #[test]
    fn malformed_argument_message_names_line() {
        let err = DrmakeError::MalformedArgumentDeclaration {
            line: 7,
            operands: 2,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("line 7:"), "got: {msg}");
        assert!(msg.contains("found 2"), "got: {msg}");
    }

    #[test]
    fn unknown_target_shorthand() {
        let err = DrmakeError::unknown_target("ghost");
        assert!(matches!(err, DrmakeError::UnknownTarget { ref name } if name == "ghost"));
    }
}
