//! Error types for file and directory operations

use std::path::PathBuf;
use thiserror::Error;

/// Failures the editor can hit while talking to the file system.
///
/// None of these are fatal: the command layer turns them into status
/// messages and leaves the buffer untouched.
#[derive(Error, Debug)]
pub enum EditorError {
    /// Opening a file failed (missing, unreadable, or not UTF-8)
    #[error("cannot read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the buffer to disk failed
    #[error("cannot write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The project tree walk was aborted
    #[error("directory walk aborted: {source}")]
    DirectoryWalk {
        #[from]
        source: walkdir::Error,
    },

    /// Bare save with no document identity
    #[error("No file name")]
    NoFileName,
}

pub type Result<T> = std::result::Result<T, EditorError>;
