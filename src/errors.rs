//! Error types used across the crate.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors produced by the replacement core.
///
/// Resolution failures (`NotRegularFile`, `TooManySymlinks`, and I/O errors
/// raised while walking symlinks) always carry the path the caller passed
/// in, not whichever intermediate link the walk had reached; the caller only
/// knows the original path, so that is the one an error message must name.
#[derive(Debug, Error)]
pub enum Error {
    /// The target resolved to something that is neither a regular file nor
    /// an absent entry (a directory, device, socket, ...).
    #[error("{}: not a regular file", .path.display())]
    NotRegularFile { path: PathBuf },

    /// The symlink chain at the target exceeded
    /// [`MAX_SYMLINK_DEREF`](crate::constants::MAX_SYMLINK_DEREF) hops.
    #[error("{}: too many levels of symbolic links", .path.display())]
    TooManySymlinks { path: PathBuf },

    /// An underlying filesystem operation failed.
    #[error("{} {}: {}", .op, .path.display(), .source)]
    Io {
        /// The operation that failed (`"lstat"`, `"readlink"`, `"open"`,
        /// `"sync"`, `"rename"`).
        op: &'static str,
        /// The path the operation was applied to.
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// The path this error is about.
    pub fn path(&self) -> &Path {
        match self {
            Error::NotRegularFile { path }
            | Error::TooManySymlinks { path }
            | Error::Io { path, .. } => path,
        }
    }
}

/// Convenient alias for results returning a crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
