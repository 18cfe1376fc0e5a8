use std::fs::{self, File};
use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use log::debug;
use tempfile::NamedTempFile;

use crate::common::error::{Result, TagError};

/// Open a file for read-only access, reporting a missing file as bad input.
pub fn open_ro(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => TagError::FileNotFound(path.to_path_buf()),
        _ => TagError::Io(e),
    })
}

/// Copy everything from `offset` to the end of `src` into `dst`, unchanged.
/// Returns the number of bytes copied.
pub fn copy_tail<W: Write + ?Sized>(src: &mut File, offset: u64, dst: &mut W) -> Result<u64> {
    src.seek(SeekFrom::Start(offset))?;
    Ok(io::copy(src, dst)?)
}

/// Replace `path` with content produced by `write`.
///
/// The content goes to a temporary file next to `path`, which is synced and
/// then renamed over the original in one step. On any failure the temporary
/// file is dropped and the original stays as it was.
pub fn replace_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    // replace the link target, not the link
    let resolved = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let path = resolved.as_path();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    {
        let mut out = BufWriter::new(temp.as_file_mut());
        write(&mut out)?;
        out.flush()?;
    }
    temp.as_file().sync_all()?;

    if let Ok(meta) = fs::metadata(path) {
        fs::set_permissions(temp.path(), meta.permissions())?;
    }

    debug!("renaming {} over {}", temp.path().display(), path.display());
    temp.persist(path).map_err(|e| TagError::Commit {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::ErrorKind;

    #[test]
    fn missing_file_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_ro(&dir.path().join("nope.mp3")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn copy_tail_from_offset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("src.bin");
        fs::write(&path, b"headerAUDIO").unwrap();
        let mut src = File::open(&path).unwrap();
        let mut out = Vec::new();
        let n = copy_tail(&mut src, 6, &mut out).unwrap();
        assert_eq!(n, 5);
        assert_eq!(out, b"AUDIO");
    }

    #[test]
    fn replace_file_swaps_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mp3");
        fs::write(&path, b"old").unwrap();
        replace_file(&path, |w| {
            w.write_all(b"new content")?;
            Ok(())
        })
        .unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new content");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn replace_through_symlink_updates_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("real.mp3");
        let link = dir.path().join("link.mp3");
        fs::write(&target, b"old").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        replace_file(&link, |w| {
            w.write_all(b"new")?;
            Ok(())
        })
        .unwrap();
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read(&target).unwrap(), b"new");
    }

    #[test]
    fn failed_write_keeps_original() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mp3");
        fs::write(&path, b"old").unwrap();
        let res = replace_file(&path, |w| {
            w.write_all(b"partial")?;
            Err(TagError::NoHeader)
        });
        assert!(res.is_err());
        assert_eq!(fs::read(&path).unwrap(), b"old");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
