//! Durable, atomic file replacement.
//!
//! Content is written to a staging file created next to the final
//! destination, then swapped into place with a single rename once
//! [`StagedFile::commit`] has pushed the bytes to stable storage. Until
//! then, nothing visible at the destination changes; [`StagedFile::abort`]
//! (or simply dropping the session) discards the staging file and leaves
//! the destination exactly as it was.
//!
//! Symlinked destinations are dereferenced so the replacement lands on the
//! final target of the chain, and an existing file's permission bits are
//! retained across the swap.

mod resolve;
mod session;

pub use session::StagedFile;
