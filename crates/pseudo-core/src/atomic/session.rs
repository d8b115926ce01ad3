//! Write sessions: one staged file, one commit or rollback.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::{PathPersistError, TempPath};

use super::options::{AtomicWriteOptions, WriteMode};
use crate::error::WriteError;

/// Buffered handle to a staged file.
#[derive(Debug)]
pub struct StagedFile {
    writer: BufWriter<File>,
    path: PathBuf,
    mode: WriteMode,
}

impl StagedFile {
    /// Path of the staged (temporary) file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mode the session was opened with.
    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    /// Write a string as UTF-8.
    pub fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())
    }

    /// Flush, optionally sync, and close.
    fn finish(self, sync: bool) -> Result<(), WriteError> {
        let file = self
            .writer
            .into_inner()
            .map_err(|e| WriteError::io("flush", &self.path, e.into_error()))?;

        if sync {
            file.sync_all()
                .map_err(|e| WriteError::io("sync", &self.path, e))?;
        }

        drop(file);
        Ok(())
    }

    /// Best-effort flush and sync before the file is thrown away.
    fn discard(mut self) {
        if let Err(err) = self.writer.flush() {
            tracing::debug!(temp = %self.path.display(), error = %err, "flush during rollback failed");
        }
        if let Err(err) = self.writer.get_ref().sync_all() {
            tracing::debug!(temp = %self.path.display(), error = %err, "sync during rollback failed");
        }
    }
}

impl Write for StagedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// A single atomic write.
///
/// A session is `Open` while it is held. [`commit`](Self::commit) moves it to
/// `Committed` by renaming the staged file onto the target;
/// [`rollback`](Self::rollback) moves it to `RolledBack` by deleting the staged
/// file. Both consume the session, so no transition leads back to `Open`.
/// Dropping an open session (early return, panic) deletes the staged file.
#[derive(Debug)]
pub struct WriteSession {
    target_path: PathBuf,
    // Declared before `temp` so the handle is closed before the file is removed.
    file: StagedFile,
    temp: TempPath,
    options: AtomicWriteOptions,
}

impl WriteSession {
    /// Open a session for `path`.
    ///
    /// Fails with [`WriteError::AlreadyExists`] before anything is created if
    /// the target is already present. The staged file lives in the target's
    /// directory and carries the target's extension.
    pub fn begin(path: impl AsRef<Path>, options: &AtomicWriteOptions) -> Result<Self, WriteError> {
        let target_path = path.as_ref().to_path_buf();

        let exists = target_path
            .try_exists()
            .map_err(|e| WriteError::io("inspect", &target_path, e))?;
        if exists {
            return Err(WriteError::AlreadyExists { path: target_path });
        }

        let dir = staging_dir(&target_path)?;
        if options.create_parent_dirs {
            fs::create_dir_all(&dir).map_err(|e| WriteError::io("create directory", &dir, e))?;
        }

        let suffix = staging_suffix(&target_path);
        let named = tempfile::Builder::new()
            .suffix(&suffix)
            .tempfile_in(&dir)
            .map_err(|e| WriteError::io("create temporary", &dir, e))?;

        let (file, temp) = named.into_parts();
        let temp_path = temp.to_path_buf();

        tracing::debug!(
            path = %target_path.display(),
            temp = %temp_path.display(),
            mode = ?options.mode,
            "opened write session"
        );

        Ok(Self {
            target_path,
            file: StagedFile {
                writer: BufWriter::with_capacity(options.buffer_capacity, file),
                path: temp_path,
                mode: options.mode,
            },
            temp,
            options: options.clone(),
        })
    }

    /// Final destination of the write.
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Path of the staged file.
    pub fn temp_path(&self) -> &Path {
        &self.temp
    }

    /// Mode the session was opened with.
    pub fn mode(&self) -> WriteMode {
        self.options.mode
    }

    /// Handle to the staged file.
    pub fn file_mut(&mut self) -> &mut StagedFile {
        &mut self.file
    }

    /// Flush, sync, close and rename the staged file onto the target.
    ///
    /// The rename refuses to replace a target that appeared after the session
    /// was opened; that case is reported as [`WriteError::AlreadyExists`].
    /// On any error the staged file is removed and the target is not touched.
    pub fn commit(self) -> Result<PathBuf, WriteError> {
        let Self {
            target_path,
            file,
            temp,
            options,
        } = self;

        if let Err(err) = file.finish(options.sync) {
            tracing::warn!(path = %target_path.display(), error = %err, "failed to finalize staged file");
            discard_staged(temp, &target_path, &options);
            return Err(err);
        }

        let temp_path = temp.to_path_buf();
        match temp.persist_noclobber(&target_path) {
            Ok(()) => {
                tracing::debug!(path = %target_path.display(), "committed atomic write");
                Ok(target_path)
            }
            Err(PathPersistError { error, path }) => {
                if let Err(err) = path.close() {
                    tracing::warn!(temp = %temp_path.display(), error = %err, "failed to remove staged file");
                }
                tracing::warn!(path = %target_path.display(), error = %error, "rename failed; rolled back");
                if error.kind() == io::ErrorKind::AlreadyExists {
                    Err(WriteError::AlreadyExists { path: target_path })
                } else {
                    Err(WriteError::CommitFailed {
                        temp_path,
                        target_path,
                        source: error,
                    })
                }
            }
        }
    }

    /// Discard the staged file, leaving the target as it was.
    pub fn rollback(self) {
        let Self {
            target_path,
            file,
            temp,
            options,
        } = self;

        file.discard();
        discard_staged(temp, &target_path, &options);
    }
}

/// Directory the staged file is created in: the target's own directory.
fn staging_dir(target: &Path) -> Result<PathBuf, WriteError> {
    if target.file_name().is_none() {
        return Err(WriteError::NoParent {
            path: target.to_path_buf(),
        });
    }
    match target.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Ok(PathBuf::from(".")),
        Some(parent) => Ok(parent.to_path_buf()),
        None => Err(WriteError::NoParent {
            path: target.to_path_buf(),
        }),
    }
}

/// `.ext` of the target, or empty when it has none.
fn staging_suffix(target: &Path) -> OsString {
    let mut suffix = OsString::new();
    if let Some(ext) = target.extension() {
        suffix.push(".");
        suffix.push(ext);
    }
    suffix
}

fn discard_staged(temp: TempPath, target: &Path, options: &AtomicWriteOptions) {
    let temp_path = temp.to_path_buf();
    if let Err(err) = temp.close() {
        tracing::warn!(temp = %temp_path.display(), error = %err, "failed to remove staged file");
    }

    // Nothing in a session writes to the target, so a file here came from outside.
    if options.remove_stray_target && target.exists() {
        match fs::remove_file(target) {
            Ok(()) => tracing::warn!(path = %target.display(), "removed stray target file"),
            Err(err) => {
                tracing::warn!(path = %target.display(), error = %err, "failed to remove stray target file");
            }
        }
    }

    tracing::debug!(path = %target.display(), "rolled back atomic write");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn dir_entries(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }

    #[test]
    fn test_staging_suffix() {
        assert_eq!(staging_suffix(Path::new("data/out.parquet")), ".parquet");
        assert_eq!(staging_suffix(Path::new("archive.tar.gz")), ".gz");
        assert_eq!(staging_suffix(Path::new("README")), "");
    }

    #[test]
    fn test_staging_dir() {
        assert_eq!(staging_dir(Path::new("abcd.txt")).unwrap(), PathBuf::from("."));
        assert_eq!(
            staging_dir(Path::new("/data/abcd.txt")).unwrap(),
            PathBuf::from("/data")
        );
        assert!(matches!(
            staging_dir(Path::new("/")),
            Err(WriteError::NoParent { .. })
        ));
    }

    #[test]
    fn test_begin_stages_next_to_target() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out.parquet");

        let session = WriteSession::begin(&target, &AtomicWriteOptions::binary()).unwrap();

        assert_eq!(session.temp_path().parent(), Some(dir.path()));
        assert_eq!(
            session.temp_path().extension().and_then(|e| e.to_str()),
            Some("parquet")
        );
        assert!(session.temp_path().exists());
        assert!(!target.exists());
        assert_eq!(session.mode(), WriteMode::Binary);
        assert_eq!(session.target_path(), target.as_path());
    }

    #[test]
    fn test_commit_renames_staged_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("abcd.txt");

        let mut session = WriteSession::begin(&target, &AtomicWriteOptions::default()).unwrap();
        let temp_path = session.temp_path().to_path_buf();
        session.file_mut().write_text("1234").unwrap();
        let committed = session.commit().unwrap();

        assert_eq!(committed, target);
        assert_eq!(fs::read_to_string(&target).unwrap(), "1234");
        assert!(!temp_path.exists());
        assert_eq!(dir_entries(dir.path()), vec![target]);
    }

    #[test]
    fn test_rollback_removes_staged_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("abcd.txt");

        let mut session = WriteSession::begin(&target, &AtomicWriteOptions::default()).unwrap();
        session.file_mut().write_all(b"partial").unwrap();
        session.rollback();

        assert!(!target.exists());
        assert!(dir_entries(dir.path()).is_empty());
    }

    #[test]
    fn test_drop_removes_staged_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("abcd.txt");

        {
            let mut session =
                WriteSession::begin(&target, &AtomicWriteOptions::default()).unwrap();
            session.file_mut().write_all(b"never committed").unwrap();
        }

        assert!(!target.exists());
        assert!(dir_entries(dir.path()).is_empty());
    }

    #[test]
    fn test_commit_refuses_to_replace_late_target() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("abcd.txt");

        let mut session = WriteSession::begin(&target, &AtomicWriteOptions::default()).unwrap();
        session.file_mut().write_text("mine").unwrap();
        fs::write(&target, "theirs").unwrap();

        let result = session.commit();

        assert!(matches!(result, Err(WriteError::AlreadyExists { .. })));
        assert_eq!(fs::read_to_string(&target).unwrap(), "theirs");
        assert_eq!(dir_entries(dir.path()), vec![target]);
    }

    #[test]
    fn test_rollback_removes_stray_target_when_enabled() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("abcd.txt");
        let options = AtomicWriteOptions::default().with_remove_stray_target(true);

        let session = WriteSession::begin(&target, &options).unwrap();
        fs::write(&target, "stray").unwrap();
        session.rollback();

        assert!(dir_entries(dir.path()).is_empty());
    }

    #[test]
    fn test_rollback_keeps_stray_target_by_default() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("abcd.txt");

        let session = WriteSession::begin(&target, &AtomicWriteOptions::default()).unwrap();
        fs::write(&target, "stray").unwrap();
        session.rollback();

        assert_eq!(fs::read_to_string(&target).unwrap(), "stray");
        assert_eq!(dir_entries(dir.path()), vec![target]);
    }

    #[test]
    fn test_begin_missing_directory() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("missing").join("abcd.txt");

        let result = WriteSession::begin(&target, &AtomicWriteOptions::default());
        assert!(matches!(result, Err(WriteError::Io { .. })));

        let options = AtomicWriteOptions::default().with_create_parent_dirs(true);
        let session = WriteSession::begin(&target, &options).unwrap();
        session.commit().unwrap();
        assert!(target.exists());
    }
}
