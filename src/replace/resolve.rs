//! Bounded symlink resolution for replacement targets.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::constants::MAX_SYMLINK_DEREF;
use crate::errors::{Error, Result};

/// Follow symlinks from `target` until reaching a regular file or an absent
/// entry, which becomes the final destination of the replacement.
///
/// Each hop is inspected with a link-aware metadata query so the chain is
/// walked one link at a time; the walk is an explicit loop bounded by
/// [`MAX_SYMLINK_DEREF`], which keeps stack use constant and makes cycles
/// (`a -> b -> a`) fail cleanly instead of spinning.
///
/// Every error reports `target` as passed by the caller, never an
/// intermediate hop.
pub(super) fn resolve_target(target: &Path) -> Result<PathBuf> {
    let mut current = target.to_path_buf();
    for _ in 0..MAX_SYMLINK_DEREF {
        let md = match fs::symlink_metadata(&current) {
            Ok(md) => md,
            // Nothing there yet: commit will create it.
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(current),
            Err(e) => return Err(Error::io("lstat", target, e)),
        };
        let ft = md.file_type();
        if ft.is_file() {
            return Ok(current);
        }
        if !ft.is_symlink() {
            return Err(Error::NotRegularFile {
                path: target.to_path_buf(),
            });
        }
        let link = fs::read_link(&current).map_err(|e| Error::io("readlink", target, e))?;
        current = if link.is_absolute() {
            link
        } else {
            clean(&parent_dir(&current).join(link))
        };
    }
    Err(Error::TooManySymlinks {
        path: target.to_path_buf(),
    })
}

/// Parent directory of `path`, with a bare filename living in `"."`.
pub(super) fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding normal component where one exists. Purely textual; the
/// filesystem is not consulted.
fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !matches!(out.components().next_back(), Some(Component::RootDir)) {
                    // `..` at the root stays at the root; otherwise it is
                    // kept, since there is nothing left to fold it into.
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::symlink;

    #[test]
    fn clean_folds_dot_and_dotdot() {
        assert_eq!(clean(Path::new("a/./b")), Path::new("a/b"));
        assert_eq!(clean(Path::new("a/b/../c")), Path::new("a/c"));
        assert_eq!(clean(Path::new("a/../../b")), Path::new("../b"));
        assert_eq!(clean(Path::new("/../a")), Path::new("/a"));
        assert_eq!(clean(Path::new("a/..")), Path::new("."));
    }

    #[test]
    fn plain_file_resolves_to_itself() {
        let td = tempfile::tempdir().unwrap();
        let f = td.path().join("plain");
        std::fs::write(&f, b"x").unwrap();
        assert_eq!(resolve_target(&f).unwrap(), f);
    }

    #[test]
    fn missing_path_resolves_to_itself() {
        let td = tempfile::tempdir().unwrap();
        let f = td.path().join("nothing-here");
        assert_eq!(resolve_target(&f).unwrap(), f);
    }

    #[test]
    fn relative_link_joins_to_link_directory() {
        let td = tempfile::tempdir().unwrap();
        let tgt = td.path().join("file");
        std::fs::write(&tgt, b"x").unwrap();
        let link = td.path().join("link");
        symlink("file", &link).unwrap();
        assert_eq!(resolve_target(&link).unwrap(), tgt);
    }

    #[test]
    fn absolute_link_replaces_path_wholesale() {
        let td = tempfile::tempdir().unwrap();
        let tgt = td.path().join("file");
        std::fs::write(&tgt, b"x").unwrap();
        let link = td.path().join("link");
        symlink(&tgt, &link).unwrap();
        assert_eq!(resolve_target(&link).unwrap(), tgt);
    }

    #[test]
    fn dangling_link_resolves_to_its_target() {
        let td = tempfile::tempdir().unwrap();
        let link = td.path().join("dangling");
        symlink("not-yet", &link).unwrap();
        assert_eq!(resolve_target(&link).unwrap(), td.path().join("not-yet"));
    }

    #[test]
    fn cycle_fails_with_original_path() {
        let td = tempfile::tempdir().unwrap();
        let a = td.path().join("a");
        let b = td.path().join("b");
        symlink(&b, &a).unwrap();
        symlink(&a, &b).unwrap();
        match resolve_target(&a) {
            Err(Error::TooManySymlinks { path }) => assert_eq!(path, a),
            other => panic!("expected TooManySymlinks, got {other:?}"),
        }
    }

    #[test]
    fn directory_behind_link_is_rejected_with_original_path() {
        let td = tempfile::tempdir().unwrap();
        let dir = td.path().join("dir");
        std::fs::create_dir(&dir).unwrap();
        let link = td.path().join("link");
        symlink(&dir, &link).unwrap();
        match resolve_target(&link) {
            Err(Error::NotRegularFile { path }) => assert_eq!(path, link),
            other => panic!("expected NotRegularFile, got {other:?}"),
        }
    }

    #[test]
    fn directory_itself_is_rejected() {
        let td = tempfile::tempdir().unwrap();
        match resolve_target(td.path()) {
            Err(Error::NotRegularFile { path }) => assert_eq!(path, td.path()),
            other => panic!("expected NotRegularFile, got {other:?}"),
        }
    }

    #[test]
    fn long_chain_within_bound_resolves() {
        let td = tempfile::tempdir().unwrap();
        let tgt = td.path().join("end");
        std::fs::write(&tgt, b"x").unwrap();
        let mut prev = tgt.clone();
        for i in 0..MAX_SYMLINK_DEREF - 1 {
            let link = td.path().join(format!("hop{i}"));
            symlink(&prev, &link).unwrap();
            prev = link;
        }
        assert_eq!(resolve_target(&prev).unwrap(), tgt);
    }
}
