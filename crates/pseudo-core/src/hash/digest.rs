//! Salted SHA-256 digests.

use std::fmt;

use sha2::{Digest as _, Sha256};

use super::input::HashInput;
#[cfg(feature = "polars")]
use crate::error::HashError;

/// Length of a digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// A SHA-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lower-case hex encoding (64 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The first `len` hex characters (all 64 if `len` is larger).
    pub fn short_hex(&self, len: usize) -> String {
        let mut hex = self.to_hex();
        hex.truncate(len);
        hex
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Digest> for [u8; DIGEST_LEN] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

/// Hash `salt` followed by `value` with SHA-256.
///
/// The order is fixed: salt bytes first, then value bytes. Changing it would
/// change every identifier derived from it.
///
/// # Examples
///
/// ```
/// use pseudo_core::digest;
///
/// assert!(digest("", "").to_hex().starts_with("e3b0c4"));
/// assert!(digest("John", " Doe").to_hex().starts_with("ec9a41"));
/// assert_eq!(digest(b"raw".as_slice(), "salt"), digest("raw", b"salt"));
/// ```
pub fn digest<'v, 's>(value: impl Into<HashInput<'v>>, salt: impl Into<HashInput<'s>>) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(salt.into().as_bytes());
    hasher.update(value.into().as_bytes());
    Digest(hasher.finalize().into())
}

/// Like [`digest`], for a value whose type is only known at runtime.
///
/// Fails with [`HashError::TypeMismatch`] unless `value` is a string or
/// binary cell.
#[cfg(feature = "polars")]
pub fn digest_dynamic<'s>(
    value: polars::prelude::AnyValue<'_>,
    salt: impl Into<HashInput<'s>>,
) -> Result<Digest, HashError> {
    let value = HashInput::try_from(value)?;
    Ok(digest(value, salt))
}
