//! Error types for atomic writes and salted hashing.
//!
//! Write errors carry the paths involved and provide user-friendly
//! messages with optional remediation hints.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Atomic write error.
///
/// Errors raised by the caller's own write logic are never wrapped in this
/// type; they are returned to the caller unchanged.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The target already exists; nothing was staged.
    #[error("target file already exists: {path}")]
    AlreadyExists { path: PathBuf },

    /// The target has no parent directory to stage the temporary file in.
    #[error("cannot determine parent directory for: {path}")]
    NoParent { path: PathBuf },

    /// File I/O error while staging or cleaning up.
    #[error("failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The staged file could not be renamed onto the target.
    #[error("failed to commit {temp_path} to {target_path}")]
    CommitFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WriteError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::AlreadyExists { path } => {
                format!("The file {} already exists and was left untouched.", path.display())
            }
            Self::NoParent { path } => {
                format!("The path {} does not name a file inside a directory.", path.display())
            }
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::CommitFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::AlreadyExists { .. } => {
                Some("Remove the existing file or choose a different output path.".into())
            }
            Self::NoParent { .. } => None,
            Self::Io { .. } => {
                Some("Check that you have permission to write to this location.".into())
            }
            Self::CommitFailed { .. } => {
                Some("Free up disk space or try saving to a different location.".into())
            }
        }
    }
}

impl From<WriteError> for io::Error {
    fn from(err: WriteError) -> Self {
        let kind = match &err {
            WriteError::AlreadyExists { .. } => io::ErrorKind::AlreadyExists,
            WriteError::NoParent { .. } => io::ErrorKind::InvalidInput,
            WriteError::Io { source, .. } | WriteError::CommitFailed { source, .. } => {
                source.kind()
            }
        };
        io::Error::new(kind, err)
    }
}

/// Salted hashing error.
#[derive(Debug, Error)]
pub enum HashError {
    /// The value is neither text nor bytes.
    #[error("cannot hash a value of type {found}: expected text or bytes")]
    TypeMismatch { found: String },

    /// The salt variable is not set in the environment.
    #[error("salt variable {var} is not set")]
    ConfigurationMissing { var: String },

    /// The salt is not a valid hex-encoded byte string.
    #[error("invalid salt from {origin}: {reason}")]
    InvalidSalt { origin: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WriteError::AlreadyExists {
            path: PathBuf::from("/data/out.parquet"),
        };
        assert_eq!(err.to_string(), "target file already exists: /data/out.parquet");
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_into_io_error_keeps_kind() {
        let err: io::Error = WriteError::AlreadyExists {
            path: PathBuf::from("a.txt"),
        }
        .into();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);

        let err: io::Error = WriteError::io(
            "sync",
            "a.txt",
            io::Error::from(io::ErrorKind::PermissionDenied),
        )
        .into();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_hash_error_display() {
        let err = HashError::ConfigurationMissing {
            var: "PSEUDO_SALT".into(),
        };
        assert_eq!(err.to_string(), "salt variable PSEUDO_SALT is not set");
    }
}
