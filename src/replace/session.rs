//! Staged replacement sessions: stage, write, then commit or abort.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, warn};
use rustix::fs::{fchmod, Mode};

use crate::constants::STAGING_SUFFIX;
use crate::errors::{Error, Result};

use super::resolve::{parent_dir, resolve_target};

// Process-wide counter keeping concurrent staging names distinct; the pid
// in the name keeps separate processes apart.
static NEXT_STAGING_COUNTER: AtomicU64 = AtomicU64::new(0);

/// An open replacement session: a staging file plus the destination it will
/// be renamed to.
///
/// The session is created with [`open`](StagedFile::open) (or
/// [`open_no_deref`](StagedFile::open_no_deref)), written through the
/// [`Write`] impl or [`as_file_mut`](StagedFile::as_file_mut), and finished
/// with exactly one of [`commit`](StagedFile::commit) or
/// [`abort`](StagedFile::abort). Both finishers consume the session, so a
/// second terminal call is rejected at compile time. A session that goes out
/// of scope without being committed (an early `?` return in the caller's
/// write logic included) is aborted: the staging file is removed and the
/// destination stays untouched.
///
/// Until commit, the staging file is visible only under its own temporary
/// name; nothing at the destination changes. Two sessions against the same
/// destination are independent: each stages separately, and if both commit,
/// the rename of whichever committed last wins whole. The crate adds no
/// locking on top of that.
#[derive(Debug)]
pub struct StagedFile {
    file: File,
    dest: PathBuf,
    staging: StagingPath,
}

impl StagedFile {
    /// Open a replacement session for `target`, dereferencing symlinks.
    ///
    /// The destination is the end of the symlink chain at `target`: a
    /// regular file, or an absent path that commit will create. The staging
    /// file is created in the destination's directory so the final rename
    /// never crosses a filesystem.
    ///
    /// # Errors
    ///
    /// [`Error::NotRegularFile`] when the chain ends at something other
    /// than a regular file or absent entry, [`Error::TooManySymlinks`] when
    /// it exceeds [`MAX_SYMLINK_DEREF`](crate::constants::MAX_SYMLINK_DEREF)
    /// hops (both naming `target` as the caller spelled it), and
    /// [`Error::Io`] for any underlying failure.
    pub fn open(target: impl AsRef<Path>) -> Result<Self> {
        let dest = resolve_target(target.as_ref())?;
        Self::stage_for(dest)
    }

    /// Open a replacement session treating `target` as the literal final
    /// name, without touching symlinks.
    ///
    /// Committing over a symlink replaces the link itself, not whatever it
    /// points at. Useful when the caller has already resolved the
    /// destination, or wants the link gone.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] when the staging file cannot be created.
    pub fn open_no_deref(target: impl AsRef<Path>) -> Result<Self> {
        Self::stage_for(target.as_ref().to_path_buf())
    }

    fn stage_for(dest: PathBuf) -> Result<Self> {
        let fname = dest.file_name().and_then(|s| s.to_str()).unwrap_or("target");
        let pid = std::process::id();
        let ctr = NEXT_STAGING_COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = parent_dir(&dest).join(format!(".{fname}.{pid}.{ctr}{STAGING_SUFFIX}"));
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .mode(0o600)
            .open(&path)
            .map_err(|e| Error::io("open", path.clone(), e))?;
        debug!("staging {} for {}", path.display(), dest.display());
        Ok(StagedFile {
            file,
            dest,
            staging: StagingPath { path },
        })
    }

    /// The destination path the staging file will be renamed to on commit.
    /// Differs from the path passed to [`open`](StagedFile::open) when that
    /// path was a symlink.
    pub fn dest_path(&self) -> &Path {
        &self.dest
    }

    /// Where the staging file currently lives. Always in the same directory
    /// as [`dest_path`](StagedFile::dest_path).
    pub fn staging_path(&self) -> &Path {
        self.staging.path()
    }

    /// The open staging file handle.
    pub fn as_file(&self) -> &File {
        &self.file
    }

    /// The open staging file handle, mutably.
    pub fn as_file_mut(&mut self) -> &mut File {
        &mut self.file
    }

    /// Persist the staged content and atomically rename it over the
    /// destination.
    ///
    /// The staged bytes are synced to stable storage before the rename, so
    /// the swap cannot be reordered ahead of the data it exposes. If a file
    /// already exists at the destination its permission bits are copied onto
    /// the staging file first (best-effort; a failure there never fails the
    /// commit). The rename is the single externally visible mutation: a
    /// concurrent reader of the destination sees the old content up to that
    /// instant and the complete new content after it.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] when the sync or the rename fails; the staging file is
    /// removed before the error is returned and the destination is left
    /// untouched.
    pub fn commit(self) -> Result<()> {
        let StagedFile {
            file,
            dest,
            staging,
        } = self;

        // Gate the rename on the data being durable. On failure `staging`
        // drops here and takes the temporary file with it.
        file.sync_data()
            .map_err(|e| Error::io("sync", staging.path(), e))?;

        // Inherit permission bits from any file being replaced.
        if let Ok(md) = fs::metadata(&dest) {
            let mode = Mode::from_bits_truncate(md.permissions().mode() & 0o777);
            let _ = fchmod(&file, mode);
        }

        // Close before renaming; the sync above already surfaced any
        // write-back error a close could report.
        drop(file);

        fs::rename(staging.path(), &dest).map_err(|e| Error::io("rename", dest.clone(), e))?;
        staging.defuse();

        // Make the new directory entry itself durable.
        if let Err(e) = fsync_parent_dir(&dest) {
            debug!("fsync of parent dir for {} failed: {e}", dest.display());
        }
        Ok(())
    }

    /// Discard the staged content, leaving the destination untouched.
    ///
    /// Closing and removing the staging file are both best-effort; a leftover
    /// staging file after a failed removal is inert and matches the reserved
    /// naming pattern, so external sweep tooling can reclaim it.
    pub fn abort(self) {
        // Dropping the handle closes it; dropping the guard unlinks the file.
        drop(self);
    }
}

impl Write for StagedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Read for StagedFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Seek for StagedFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.file.seek(pos)
    }
}

/// Owner of the staging file's name on disk. Unless defused by a successful
/// commit, dropping it removes the file, which is what turns an early return
/// in caller code into an abort instead of an orphaned temporary.
#[derive(Debug)]
struct StagingPath {
    path: PathBuf,
}

impl StagingPath {
    fn path(&self) -> &Path {
        &self.path
    }

    /// Forget the staging name without removing anything; the file now lives
    /// under the destination name.
    fn defuse(mut self) {
        self.path = PathBuf::new();
    }
}

impl Drop for StagingPath {
    fn drop(&mut self) {
        if self.path.as_os_str().is_empty() {
            return;
        }
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!("could not remove staging file {}: {e}", self.path.display());
            }
        }
    }
}

fn fsync_parent_dir(path: &Path) -> io::Result<()> {
    let dir = File::open(parent_dir(path))?;
    dir.sync_all()
}
