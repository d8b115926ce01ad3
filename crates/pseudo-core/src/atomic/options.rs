//! Configuration for atomic writes.

/// Default capacity of the buffered writer over the staged file (8 KiB).
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// How the content is meant to be interpreted.
///
/// The mode is carried with the session and reported to the write body; the
/// bytes written are never transformed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// UTF-8 text.
    #[default]
    Text,
    /// Raw bytes.
    Binary,
}

/// What the write body receives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum YieldAs {
    /// An open, buffered handle to the staged file.
    #[default]
    Handle,
    /// The staged file's path, for writers that want a plain filename.
    Path,
}

/// Options for an atomic write.
#[derive(Debug, Clone)]
pub struct AtomicWriteOptions {
    /// Text or binary content.
    pub mode: WriteMode,
    /// Whether the body gets a handle or a path.
    pub yield_as: YieldAs,
    /// Sync the staged file to stable storage before the rename.
    pub sync: bool,
    /// Create missing parent directories of the target.
    pub create_parent_dirs: bool,
    /// On rollback, also delete a file that appeared at the target path.
    pub remove_stray_target: bool,
    /// Capacity of the buffered writer over the staged file.
    pub buffer_capacity: usize,
}

impl Default for AtomicWriteOptions {
    fn default() -> Self {
        Self {
            mode: WriteMode::default(),
            yield_as: YieldAs::default(),
            sync: true,
            create_parent_dirs: false,
            remove_stray_target: false,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl AtomicWriteOptions {
    /// Options for binary content.
    #[must_use]
    pub fn binary() -> Self {
        Self::default().with_mode(WriteMode::Binary)
    }

    /// Set the write mode.
    #[must_use]
    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set what the write body receives.
    #[must_use]
    pub fn with_yield_as(mut self, yield_as: YieldAs) -> Self {
        self.yield_as = yield_as;
        self
    }

    /// Enable or disable the pre-commit sync.
    #[must_use]
    pub fn with_sync(mut self, enable: bool) -> Self {
        self.sync = enable;
        self
    }

    /// Enable or disable parent directory creation.
    #[must_use]
    pub fn with_create_parent_dirs(mut self, enable: bool) -> Self {
        self.create_parent_dirs = enable;
        self
    }

    /// Enable or disable stray target removal on rollback.
    #[must_use]
    pub fn with_remove_stray_target(mut self, enable: bool) -> Self {
        self.remove_stray_target = enable;
        self
    }

    /// Set the buffer capacity (clamped to at least 1 byte).
    #[must_use]
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity.max(1);
        self
    }
}
