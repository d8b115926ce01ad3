//! Atomic file writes.
//!
//! A write is staged in a temporary file created in the target's directory
//! and made visible with a single rename. The write body runs inside a
//! [`WriteSession`]; if it fails the staged file is removed and the body's
//! error is returned unchanged.
//!
//! ```no_run
//! use std::path::Path;
//! use pseudo_core::{AtomicWriteOptions, WriteError, atomic_write_path};
//!
//! // Hand the staged path to a writer that wants a filename.
//! atomic_write_path(Path::new("out.bin"), &AtomicWriteOptions::binary(), |path| {
//!     std::fs::write(path, [0u8, 1, 2]).map_err(|e| WriteError::Io {
//!         operation: "write",
//!         path: path.to_path_buf(),
//!         source: e,
//!     })
//! })?;
//! # Ok::<(), WriteError>(())
//! ```

mod options;
mod session;

use std::path::{Path, PathBuf};

pub use options::{AtomicWriteOptions, DEFAULT_BUFFER_CAPACITY, WriteMode, YieldAs};
pub use session::{StagedFile, WriteSession};

use crate::error::WriteError;

/// What the write body receives, chosen by [`AtomicWriteOptions::yield_as`].
#[derive(Debug)]
pub enum Staged<'a> {
    /// Open handle to the staged file.
    Handle(&'a mut StagedFile),
    /// Path of the staged file.
    Path(&'a Path),
}

/// Write `path` atomically, handing the body a handle or a path per `options`.
///
/// `path` must not exist. On success the staged file is flushed, synced,
/// closed and renamed onto `path`. If the body returns an error (or panics)
/// the staged file is removed and the error is returned as-is. Storage
/// failures are converted into `E` through [`WriteError`].
pub fn atomic_write<P, F, T, E>(path: P, options: &AtomicWriteOptions, body: F) -> Result<T, E>
where
    P: AsRef<Path>,
    F: FnOnce(Staged<'_>) -> Result<T, E>,
    E: From<WriteError>,
{
    run_session(path.as_ref(), options, |session| match options.yield_as {
        YieldAs::Handle => body(Staged::Handle(session.file_mut())),
        YieldAs::Path => body(Staged::Path(session.temp_path())),
    })
}

/// Write `path` atomically through a buffered handle.
pub fn atomic_write_file<P, F, T, E>(path: P, options: &AtomicWriteOptions, body: F) -> Result<T, E>
where
    P: AsRef<Path>,
    F: FnOnce(&mut StagedFile) -> Result<T, E>,
    E: From<WriteError>,
{
    run_session(path.as_ref(), options, |session| body(session.file_mut()))
}

/// Write `path` atomically by handing the staged file's path to the body.
///
/// Useful for third-party writers that open files themselves.
pub fn atomic_write_path<P, F, T, E>(path: P, options: &AtomicWriteOptions, body: F) -> Result<T, E>
where
    P: AsRef<Path>,
    F: FnOnce(&Path) -> Result<T, E>,
    E: From<WriteError>,
{
    run_session(path.as_ref(), options, |session| body(session.temp_path()))
}

/// Create `path` with `contents`, atomically.
pub fn write_new(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<PathBuf, WriteError> {
    let mut session = WriteSession::begin(path, &AtomicWriteOptions::binary())?;
    if let Err(err) = std::io::Write::write_all(session.file_mut(), contents.as_ref()) {
        let temp_path = session.temp_path().to_path_buf();
        session.rollback();
        return Err(WriteError::io("write", temp_path, err));
    }
    session.commit()
}

fn run_session<T, E>(
    path: &Path,
    options: &AtomicWriteOptions,
    body: impl FnOnce(&mut WriteSession) -> Result<T, E>,
) -> Result<T, E>
where
    E: From<WriteError>,
{
    let mut session = WriteSession::begin(path, options)?;

    match body(&mut session) {
        Ok(value) => {
            session.commit()?;
            Ok(value)
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), "write failed; rolling back");
            session.rollback();
            Err(err)
        }
    }
}
