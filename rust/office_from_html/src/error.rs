//! Error types for HTML to Office conversion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading an input or writing an output package.
///
/// Operators see two kinds: a missing input ([`Error::FileNotFound`]) and
/// everything else, which is reported as a conversion failure.
#[derive(Error, Debug)]
pub enum Error {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("cannot decode {} as UTF-8: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::FileNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_input_counts_as_not_found() {
        let missing = Error::FileNotFound(PathBuf::from("a.html"));
        assert!(missing.is_not_found());
        assert_eq!(missing.to_string(), "file not found: a.html");

        let io = Error::from(std::io::Error::other("disk full"));
        assert!(!io.is_not_found());
    }
}
