//! Library error type

use std::fmt;
use std::io;

/// Failure while loading or saving a document.
///
/// Malformed content is never a load error. Rewriting a file refuses with
/// [`Error::DropsContent`] when content would be lost and dropping was
/// not allowed.
#[derive(Debug)]
pub enum Error {
    /// Opening, reading or writing failed
    Io(io::Error),
    /// The rendered file could not be moved over the destination
    Persist(io::Error),
    /// Saving would remove the comments or fields on these lines
    DropsContent { lines: Vec<usize> },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Persist(e) => write!(f, "failed to replace file: {e}"),
            Error::DropsContent { lines } => {
                let lines: Vec<String> = lines.iter().map(usize::to_string).collect();
                write!(
                    f,
                    "saving would remove content at line(s) {}",
                    lines.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) | Error::Persist(e) => Some(e),
            Error::DropsContent { .. } => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(e: tempfile::PersistError) -> Self {
        Error::Persist(e.error)
    }
}
