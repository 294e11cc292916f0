// Filesystem helpers: existence checks, recursive copy, empty directory
// cleanup, hashing and unique archive names.

use crate::error::{HelperError, Result};
use crate::progress::TimeTrack;
use chrono::{DateTime, Local};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const MAX_FILENAME_ATTEMPTS: usize = 50;
const ARCHIVE_EXTENSION: &str = "tar.gz";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Whether `path` exists and is a directory.
pub fn directory_exists(path: impl AsRef<Path>) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

/// Whether the directory at `path` has no entries.
pub fn is_directory_empty(path: impl AsRef<Path>) -> Result<bool> {
    let mut entries = fs::read_dir(path)?;
    Ok(entries.next().is_none())
}

/// Whether `path` exists and is a regular file.
pub fn absolute_file_exists(path: impl AsRef<Path>) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// Resolve `path` against the current directory and return it if it points
/// to an existing regular file.
pub fn file_exists(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let candidate = if path.is_absolute() { path.to_path_buf() } else { std::env::current_dir()?.join(path) };
    if absolute_file_exists(&candidate) {
        Ok(candidate)
    } else {
        Err(HelperError::FileNotFound { path: candidate })
    }
}

/// Remove every empty directory below `root`, including the ones that only
/// become empty once their own empty children are gone. `root` is kept.
/// Returns the number of directories removed.
pub fn delete_empty_folders(root: impl AsRef<Path>) -> Result<usize> {
    let root = root.as_ref();
    let _track = TimeTrack::start("Scanning files");
    tracing::debug!("Scanning for empty directories in {}", root.display());

    let mut deleted = 0;
    // children come before their parent, so a parent is checked after its
    // empty subdirectories have already been removed
    for entry in WalkDir::new(root).min_depth(1).contents_first(true) {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if is_directory_empty(entry.path())? {
            tracing::debug!("Removing empty directory {}", entry.path().display());
            match fs::remove_dir(entry.path()) {
                Ok(()) => deleted += 1,
                Err(e) => tracing::error!("Error removing {}: {}", entry.path().display(), e),
            }
        }
    }

    tracing::debug!("Removed {} directories.", deleted);
    Ok(deleted)
}

/// Recursively copy the directory tree at `src` to `dst`, preserving
/// permissions. `dst` must not exist yet. Symlinks are skipped.
pub fn copy_dir(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<()> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    let src_meta = fs::metadata(src)?;
    if !src_meta.is_dir() {
        return Err(HelperError::NotADirectory { path: src.to_path_buf() });
    }
    match fs::symlink_metadata(dst) {
        Ok(_) => return Err(HelperError::DestinationExists { path: dst.to_path_buf() }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let target = dst.join(entry.file_name());
        if file_type.is_dir() {
            copy_dir(entry.path(), &target)?;
        } else if file_type.is_symlink() {
            tracing::debug!("Skipping symlink {}", entry.path().display());
        } else {
            copy_file(entry.path(), &target)?;
        }
    }
    // set last so a read-only source directory can still be filled
    fs::set_permissions(dst, src_meta.permissions())?;
    Ok(())
}

/// Copy the regular file `src` to `dst`, replacing its contents if it
/// exists. Copying a file onto itself is a no-op.
pub fn copy_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<()> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    let src_meta = fs::metadata(src)?;
    if !src_meta.is_file() {
        return Err(HelperError::NonRegularSource { path: src.to_path_buf() });
    }
    match fs::metadata(dst) {
        Ok(dst_meta) => {
            if !dst_meta.is_file() {
                return Err(HelperError::NonRegularDestination { path: dst.to_path_buf() });
            }
            if same_file(src, &src_meta, dst, &dst_meta)? {
                return Ok(());
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let mut input = File::open(src)?;
    let mut output = File::create(dst)?;
    io::copy(&mut input, &mut output)?;
    output.sync_all()?;
    fs::set_permissions(dst, src_meta.permissions())?;
    Ok(())
}

// hard links share the inode, so paths alone can't tell
#[cfg(unix)]
fn same_file(_src: &Path, src_meta: &fs::Metadata, _dst: &Path, dst_meta: &fs::Metadata) -> io::Result<bool> {
    use std::os::unix::fs::MetadataExt;
    Ok(src_meta.dev() == dst_meta.dev() && src_meta.ino() == dst_meta.ino())
}

#[cfg(not(unix))]
fn same_file(src: &Path, _src_meta: &fs::Metadata, dst: &Path, _dst_meta: &fs::Metadata) -> io::Result<bool> {
    Ok(fs::canonicalize(src)? == fs::canonicalize(dst)?)
}

/// Hex-encoded SHA-256 digest of the file at `path`.
pub fn calculate_sha256(path: impl AsRef<Path>) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Pick a path in `dir` named `"<timestamp> - <stem>[_n].tar.gz"` that does
/// not exist yet, creating `dir` if needed.
pub fn unique_timestamped_filename(dir: impl AsRef<Path>, filename: &str) -> Result<PathBuf> {
    unique_timestamped_filename_at(dir.as_ref(), filename, Local::now())
}

pub(crate) fn unique_timestamped_filename_at(dir: &Path, filename: &str, now: DateTime<Local>) -> Result<PathBuf> {
    if !directory_exists(dir) {
        create_private_dir(dir)?;
    }
    // dot-files such as `.library` keep their whole name as stem
    let stem = Path::new(filename).file_stem().and_then(|s| s.to_str()).unwrap_or(filename);
    let timestamp = now.format(TIMESTAMP_FORMAT);

    for attempt in 0..MAX_FILENAME_ATTEMPTS {
        let suffix = if attempt > 0 { format!("_{attempt}") } else { String::new() };
        let candidate = dir.join(format!("{timestamp} - {stem}{suffix}.{ARCHIVE_EXTENSION}"));
        if file_exists(&candidate).is_err() {
            return Ok(candidate);
        }
    }
    Err(HelperError::NoUniqueFilename { dir: dir.to_path_buf(), attempts: MAX_FILENAME_ATTEMPTS })
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2017, 3, 14, 15, 9, 26).single().expect("unambiguous local time")
    }

    #[test]
    fn directory_checks() {
        let tmp = TempDir::new().unwrap();
        assert!(directory_exists(tmp.path()));
        assert!(is_directory_empty(tmp.path()).unwrap());

        let missing = tmp.path().join("doesnotexist");
        assert!(!directory_exists(&missing));
        assert!(is_directory_empty(&missing).is_err());

        fs::write(tmp.path().join("book.epub"), b"epub").unwrap();
        assert!(!is_directory_empty(tmp.path()).unwrap());
        assert!(!directory_exists(tmp.path().join("book.epub")));
    }

    #[test]
    fn file_checks() {
        let tmp = TempDir::new().unwrap();
        let book = tmp.path().join("book.epub");
        fs::write(&book, b"epub").unwrap();

        assert!(absolute_file_exists(&book));
        assert!(!absolute_file_exists(tmp.path()));
        assert_eq!(file_exists(&book).unwrap(), book);
        assert!(matches!(file_exists(tmp.path().join("nope.epub")), Err(HelperError::FileNotFound { .. })));
    }

    #[test]
    fn unique_filename_uses_timestamp_and_stem() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("backups");
        let name = unique_timestamped_filename_at(&dir, "library.db", fixed_time()).unwrap();

        assert!(directory_exists(&dir));
        assert_eq!(name, dir.join("2017-03-14 15:09:26 - library.tar.gz"));
    }

    #[test]
    fn unique_filename_stem_drops_only_last_extension() {
        let tmp = TempDir::new().unwrap();
        let archive = unique_timestamped_filename_at(tmp.path(), "library.tar.gz", fixed_time()).unwrap();
        assert_eq!(archive, tmp.path().join("2017-03-14 15:09:26 - library.tar.tar.gz"));

        let hidden = unique_timestamped_filename_at(tmp.path(), ".library", fixed_time()).unwrap();
        assert_eq!(hidden, tmp.path().join("2017-03-14 15:09:26 - .library.tar.gz"));
    }

    #[test]
    fn unique_filename_adds_counter_suffix() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("2017-03-14 15:09:26 - library.tar.gz"), b"").unwrap();
        fs::write(tmp.path().join("2017-03-14 15:09:26 - library_1.tar.gz"), b"").unwrap();

        let name = unique_timestamped_filename_at(tmp.path(), "library.db", fixed_time()).unwrap();
        assert_eq!(name, tmp.path().join("2017-03-14 15:09:26 - library_2.tar.gz"));
    }

    #[test]
    fn unique_filename_gives_up_after_max_attempts() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("2017-03-14 15:09:26 - library.tar.gz"), b"").unwrap();
        for n in 1..MAX_FILENAME_ATTEMPTS {
            fs::write(tmp.path().join(format!("2017-03-14 15:09:26 - library_{n}.tar.gz")), b"").unwrap();
        }

        let result = unique_timestamped_filename_at(tmp.path(), "library.db", fixed_time());
        assert!(matches!(result, Err(HelperError::NoUniqueFilename { attempts: MAX_FILENAME_ATTEMPTS, .. })));
    }

    #[cfg(unix)]
    #[test]
    fn unique_filename_creates_private_directory() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("private");
        unique_timestamped_filename_at(&dir, "library.db", fixed_time()).unwrap();
        let mode = fs::metadata(&dir).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
    }
}
