//! Optional write-back of a move log.
//! - Follows a symlinked move file so the link survives and its target is updated
//! - Writes to a temp file in the destination directory and fsyncs it
//! - Atomically renames temp -> target (Windows: removes the target first)
//! - Fsyncs the destination directory on Unix (best-effort)

use anyhow::{Context, Result, anyhow};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

use crate::move_log::MoveLog;

const MAX_SYMLINK_HOPS: usize = 40;

/// Replace the contents of `path` with the rendered `log`.
pub fn save_atomic(log: &MoveLog, path: &Path) -> Result<()> {
    let target = resolve_symlinks(path)?;
    if target != path {
        debug!(link = %path.display(), target = %target.display(), "Writing through symlink");
    }
    let path = target.as_path();

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        Some(_) => PathBuf::from("."),
        None => return Err(anyhow!("move file has no parent directory: {}", path.display())),
    };

    let tmp_path = unique_temp_path(&dir);
    if let Err(e) = write_synced(&tmp_path, log) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e).with_context(|| format!("write temporary file '{}'", tmp_path.display()));
    }

    if let Err(e) = replace(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    info!(path = %path.display(), moves = log.len(), "Saved move log");
    Ok(())
}

/// Follow `path` through any chain of symlinks to the file that holds the data.
/// A dangling link resolves to the path it names, so the save creates it.
fn resolve_symlinks(path: &Path) -> Result<PathBuf> {
    let mut current = path.to_path_buf();
    for _ in 0..MAX_SYMLINK_HOPS {
        match fs::symlink_metadata(&current) {
            Ok(meta) if meta.file_type().is_symlink() => {
                let link = fs::read_link(&current)
                    .with_context(|| format!("read symlink '{}'", current.display()))?;
                current = match current.parent() {
                    Some(parent) if link.is_relative() => parent.join(link),
                    _ => link,
                };
            }
            _ => return Ok(current),
        }
    }
    Err(anyhow!("too many levels of symbolic links: {}", path.display()))
}

fn write_synced(tmp_path: &Path, log: &MoveLog) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(tmp_path)?;
    log.write_to(&mut file)?;
    file.flush()?;
    file.sync_all()
}

fn replace(src: &Path, dst: &Path) -> Result<()> {
    // Windows: rename doesn't overwrite.
    #[cfg(windows)]
    {
        if let Err(e) = fs::remove_file(dst) {
            if e.kind() != io::ErrorKind::NotFound {
                return Err(e).with_context(|| {
                    format!("remove existing move file before rename: {}", dst.display())
                });
            }
        }
    }

    fs::rename(src, dst)
        .with_context(|| format!("atomic rename '{}' -> '{}'", src.display(), dst.display()))?;

    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        let parent = if parent.as_os_str().is_empty() { Path::new(".") } else { parent };
        let _ = fsync_dir(parent);
    }

    Ok(())
}

#[cfg(unix)]
fn fsync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

fn unique_temp_path(dir: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    dir.join(format!(".move_log.{pid}.{nanos}.tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_log::MOVE_MAX_LEN;
    use tempfile::tempdir;

    #[test]
    fn save_then_load_keeps_order() {
        let td = tempdir().unwrap();
        let path = td.path().join("moves.txt");
        let log = MoveLog::parse("e4\ne5\nNf3\n", MOVE_MAX_LEN);
        save_atomic(&log, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "e4\ne5\nNf3\n");
        assert_eq!(MoveLog::load(&path), log);
    }

    #[test]
    fn save_overwrites_existing_file() {
        let td = tempdir().unwrap();
        let path = td.path().join("moves.txt");
        fs::write(&path, "e4\r\ne5\r\nNf3\r\n").unwrap();
        let mut log = MoveLog::load(&path);
        log.remove_last();
        save_atomic(&log, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "e4\ne5\n");
    }

    #[test]
    fn save_empty_log_writes_empty_file() {
        let td = tempdir().unwrap();
        let path = td.path().join("moves.txt");
        fs::write(&path, "e4\n").unwrap();
        save_atomic(&MoveLog::new(), &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn save_leaves_no_temp_files() {
        let td = tempdir().unwrap();
        let path = td.path().join("moves.txt");
        save_atomic(&MoveLog::parse("e4", MOVE_MAX_LEN), &path).unwrap();
        let names: Vec<_> = fs::read_dir(td.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("moves.txt")]);
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let td = tempdir().unwrap();
        let path = td.path().join("no_such_dir").join("moves.txt");
        let err = save_atomic(&MoveLog::new(), &path).unwrap_err();
        assert!(format!("{err:#}").contains("write temporary file"));
    }

    #[cfg(unix)]
    #[test]
    fn save_through_symlink_updates_target_and_keeps_link() {
        use std::os::unix::fs::symlink;
        let td = tempdir().unwrap();
        let real = td.path().join("real.txt");
        let link = td.path().join("link.txt");
        fs::write(&real, "e4\n").unwrap();
        symlink("real.txt", &link).unwrap();

        let mut log = MoveLog::load(&link);
        log.append("e5").unwrap();
        save_atomic(&log, &link).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "e4\ne5\n");
    }

    #[cfg(unix)]
    #[test]
    fn save_through_dangling_symlink_creates_target() {
        use std::os::unix::fs::symlink;
        let td = tempdir().unwrap();
        let real = td.path().join("real.txt");
        let link = td.path().join("link.txt");
        symlink(&real, &link).unwrap();

        save_atomic(&MoveLog::parse("e4", MOVE_MAX_LEN), &link).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "e4\n");
    }

    #[cfg(unix)]
    #[test]
    fn save_through_symlink_loop_fails() {
        use std::os::unix::fs::symlink;
        let td = tempdir().unwrap();
        let a = td.path().join("a.txt");
        let b = td.path().join("b.txt");
        symlink(&b, &a).unwrap();
        symlink(&a, &b).unwrap();

        let err = save_atomic(&MoveLog::new(), &a).unwrap_err();
        assert!(err.to_string().contains("symbolic links"));
    }
}
