//! Atomic file writes and salted pseudonymization.
//!
//! This crate provides two independent building blocks for the data pipeline:
//!
//! - **Atomic writes**: content is staged in a temporary file next to the
//!   target and committed with a single rename. A target is either absent or
//!   present with its full content, never half-written.
//! - **Salted hashing**: SHA-256 over `salt || value`, used to derive stable
//!   pseudonymous identifiers.
//!
//! # Example
//!
//! ```no_run
//! use std::io::Write;
//! use std::path::Path;
//! use pseudo_core::{AtomicWriteOptions, Salt, atomic_write_file, user_id};
//!
//! atomic_write_file(Path::new("report.txt"), &AtomicWriteOptions::default(), |file| {
//!     file.write_all(b"hello")?;
//!     Ok::<_, std::io::Error>(())
//! })?;
//!
//! let salt = Salt::from_default_env()?;
//! println!("{}", user_id("Gorlins", &salt));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Architecture
//!
//! - `atomic/` - Write sessions, options and the scoped write functions
//! - `hash/` - Digests, salts and user ids
//! - `error.rs` - Error types for both components

mod atomic;
mod error;
mod hash;

// === Error Types ===
pub use error::{HashError, WriteError};

// === Atomic Writes ===
pub use atomic::{
    AtomicWriteOptions, DEFAULT_BUFFER_CAPACITY, Staged, StagedFile, WriteMode, WriteSession,
    YieldAs, atomic_write, atomic_write_file, atomic_write_path, write_new,
};

// === Salted Hashing ===
pub use hash::{
    DIGEST_LEN, Digest, HashInput, SALT_ENV_VAR, Salt, SaltedHasher, USER_ID_HEX_LEN, digest,
    user_id,
};
#[cfg(feature = "polars")]
pub use hash::digest_dynamic;
