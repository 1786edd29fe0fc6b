//! Shared crate-wide constants.
//!
//! Centralizes magic values used across modules. Adjusting these here will
//! propagate through the crate.

use std::time::Duration;

/// Maximum number of symlink hops dereferenced when resolving a replacement
/// target before giving up with [`Error::TooManySymlinks`].
///
/// [`Error::TooManySymlinks`]: crate::errors::Error::TooManySymlinks
pub const MAX_SYMLINK_DEREF: usize = 16;

/// Filename suffix reserved for staging files awaiting commit.
/// The staging name is constructed as `.{fname}.{pid}.{counter}{STAGING_SUFFIX}`;
/// e.g. `.fstab.412.0.shunt.tmp`. External sweep tooling can match on the
/// suffix to reclaim staging files orphaned by a killed process.
pub const STAGING_SUFFIX: &str = ".shunt.tmp";

/// How long [`PromptingReader`] waits for the first byte before printing its
/// prompt to the diagnostic stream.
///
/// [`PromptingReader`]: crate::prompt::PromptingReader
pub const DEFAULT_PROMPT_AFTER: Duration = Duration::from_millis(250);

/// Default message printed by [`PromptingReader::stdin`] when stdin is idle.
///
/// [`PromptingReader::stdin`]: crate::prompt::PromptingReader::stdin
pub const STDIN_PROMPT_MSG: &str = "Waiting for data on stdin.";
