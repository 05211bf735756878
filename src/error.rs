//! Unified error types for threema2html.
//!
//! This module provides a single [`ArchiveError`] enum that covers all error
//! cases in the library.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging
//!
//! Two failure classes exist and only two: filesystem access problems
//! (target directory or messages file missing or unreadable) and grammar
//! violations (the messages file does not start with a Threema timestamp
//! header). Both abort the run before any output file is created.
//! Configuration problems and unresolved media references are *not* errors;
//! they degrade to defaults and to escaped literal text respectively.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for threema2html operations.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// The error type for all threema2html operations.
///
/// Each variant contains context about what went wrong and, where
/// applicable, the underlying source error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArchiveError {
    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A directory or file could not be read.
    ///
    /// This typically happens when:
    /// - The target directory does not exist
    /// - Permission denied while enumerating the archive folder
    /// - The messages file vanished between indexing and reading
    #[error("could not read '{}': {source}", path.display())]
    FileSystem {
        /// The path that could not be accessed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The messages file named in the configuration (or on the command
    /// line) was not present anywhere under the target directory.
    #[error("could not find file '{name}' under '{}'", dir.display())]
    MissingMessagesFile {
        /// The basename that was looked up (case-insensitively)
        name: String,
        /// The directory whose index was searched
        dir: PathBuf,
    },

    /// A line failed to match the Threema timestamp-header grammar where a
    /// header was required.
    ///
    /// Only the very first line of the messages file can trigger this:
    /// every later non-header line is folded into the preceding message as
    /// a continuation.
    #[error("line does not start with a Threema timestamp; not a Threema archive file? ({line})")]
    NotAnArchive {
        /// The offending line, verbatim
        line: String,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ArchiveError {
    /// Creates a filesystem error for an unreadable path.
    pub fn file_system(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ArchiveError::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Creates a missing-messages-file error.
    pub fn missing_messages_file(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        ArchiveError::MissingMessagesFile {
            name: name.into(),
            dir: dir.into(),
        }
    }

    /// Creates a not-an-archive grammar error for the given line.
    pub fn not_an_archive(line: impl Into<String>) -> Self {
        ArchiveError::NotAnArchive { line: line.into() }
    }

    /// Returns `true` if this is a plain IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ArchiveError::Io(_))
    }

    /// Returns `true` if this is a filesystem access error.
    pub fn is_file_system(&self) -> bool {
        matches!(
            self,
            ArchiveError::FileSystem { .. } | ArchiveError::MissingMessagesFile { .. }
        )
    }

    /// Returns `true` if this is the archive-grammar error.
    pub fn is_not_an_archive(&self) -> bool {
        matches!(self, ArchiveError::NotAnArchive { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = ArchiveError::from(io_err);
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_file_system_display() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = ArchiveError::file_system("/some/dir", io_err);
        let display = err.to_string();
        assert!(display.contains("/some/dir"));
        assert!(display.contains("access denied"));
    }

    #[test]
    fn test_missing_messages_file_display() {
        let err = ArchiveError::missing_messages_file("messages.txt", "/chat");
        let display = err.to_string();
        assert!(display.contains("messages.txt"));
        assert!(display.contains("/chat"));
    }

    #[test]
    fn test_not_an_archive_display() {
        let err = ArchiveError::not_an_archive("hello world");
        let display = err.to_string();
        assert!(display.contains("Threema timestamp"));
        assert!(display.contains("hello world"));
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = ArchiveError::file_system("/x", io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_is_methods() {
        let io_err = ArchiveError::Io(io::Error::new(io::ErrorKind::NotFound, ""));
        assert!(io_err.is_io());
        assert!(!io_err.is_file_system());
        assert!(!io_err.is_not_an_archive());

        let fs_err = ArchiveError::file_system("/x", io::Error::other("boom"));
        assert!(fs_err.is_file_system());
        assert!(!fs_err.is_io());

        let missing = ArchiveError::missing_messages_file("m.txt", "/d");
        assert!(missing.is_file_system());

        let grammar = ArchiveError::not_an_archive("plain text");
        assert!(grammar.is_not_an_archive());
        assert!(!grammar.is_file_system());
    }
}
