use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all operations in `subst`.
///
/// Every variant names the operation that failed. All of them are fatal: the
/// run stops at the first one and files already rewritten stay rewritten.
#[derive(Error, Debug)]
pub enum Error {
    /// The current working directory could not be determined.
    #[error("error getting working directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    /// The directory walk reported an error for some entry.
    #[error("error walking filesystem: {0}")]
    Walk(#[from] walkdir::Error),

    /// An eligible file could not be opened for reading.
    #[error("error opening file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An eligible file could not be read to the end.
    #[error("error reading file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The substituted contents could not be written back.
    #[error("error writing file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The search sequence was empty.
    #[error("search pattern must not be empty")]
    EmptyPattern,
}

/// A convenient type alias for `Result<T, subst::errors::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_file_errors_name_operation_and_path() {
        let err = Error::Write {
            path: PathBuf::from("src/a.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "error writing file src/a.txt: denied");
    }

    #[test]
    fn test_current_dir_error_message() {
        let err = Error::CurrentDir(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.to_string(), "error getting working directory: gone");
    }
}
