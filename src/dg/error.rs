//! Error type shared by the parser, the writer and the application runner.

use crate::dg::formats::FormatError;
use config::ConfigError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DgError {
    #[error("input file '{}' not found", path.display())]
    InputNotFound { path: PathBuf },

    #[error("cannot read input file '{}': {source}", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: unknown section marker '{marker}'")]
    MalformedSection { line: usize, marker: String },

    #[error("cannot write output file '{}': {source}", path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl DgError {
    /// Classify an I/O error raised while opening or reading `path`.
    pub(crate) fn from_input(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            DgError::InputNotFound { path }
        } else {
            DgError::InputUnreadable { path, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_classified() {
        let err = DgError::from_input("missing.dg", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, DgError::InputNotFound { .. }));
        assert_eq!(err.to_string(), "input file 'missing.dg' not found");
    }

    #[test]
    fn test_other_io_errors_are_unreadable() {
        let err = DgError::from_input(
            "locked.dg",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, DgError::InputUnreadable { .. }));
    }

    #[test]
    fn test_malformed_section_message() {
        let err = DgError::MalformedSection {
            line: 4,
            marker: "[Заголовок]".to_string(),
        };
        assert_eq!(err.to_string(), "line 4: unknown section marker '[Заголовок]'");
    }
}
