use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Template not found: {path}")]
    TemplateNotFound { path: PathBuf },

    #[error("Permission denied: {path}: {source}")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GeneratorError {
    /// Classify a failure to read a template
    pub fn template(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => GeneratorError::TemplateNotFound {
                path: path.to_path_buf(),
            },
            _ => GeneratorError::io(path, err),
        }
    }

    /// Classify a failure to create, write, or chmod an output path
    pub fn io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => GeneratorError::PermissionDenied {
                path: path.to_path_buf(),
                source: err,
            },
            _ => GeneratorError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_template_is_classified() {
        let err = GeneratorError::template(
            Path::new("run_inplace.py.in"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, GeneratorError::TemplateNotFound { .. }));
        assert_eq!(err.to_string(), "Template not found: run_inplace.py.in");
    }

    #[test]
    fn test_unreadable_template_is_permission_error() {
        let err = GeneratorError::template(
            Path::new("t.in"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, GeneratorError::PermissionDenied { .. }));
    }

    #[test]
    fn test_other_io_errors_keep_path() {
        let err = GeneratorError::io(
            Path::new("out/bin.pex"),
            io::Error::new(io::ErrorKind::Other, "disk full"),
        );
        assert_eq!(err.to_string(), "IO error at out/bin.pex: disk full");
    }
}
