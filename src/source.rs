//! Reading and writing documents.
//!
//! A path of `-` stands for stdin when reading. Writing without a path goes
//! to stdout.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur when reading or writing a document.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("'{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read from stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("'{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("stdout: {0}")]
    Stdout(#[source] io::Error),
}

/// Returns true if the path means stdin.
pub fn is_stdin(path: &Path) -> bool {
    path == Path::new("-")
}

/// Reads a document from a file, or from stdin when the path is `-`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid UTF-8.
pub fn read_document(path: &Path) -> Result<String, SourceError> {
    if is_stdin(path) {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(SourceError::Stdin)?;
        return Ok(buf);
    }

    fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a document to a file, or to stdout when no path is given.
///
/// # Errors
///
/// Returns an error if the file or stdout cannot be written.
pub fn write_document(path: Option<&Path>, content: &str) -> Result<(), SourceError> {
    match path {
        Some(path) => fs::write(path, content).map_err(|source| SourceError::Write {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(content.as_bytes())
                .and_then(|_| handle.flush())
                .map_err(SourceError::Stdout)
        }
    }
}
