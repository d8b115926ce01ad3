//! Salted hashing for pseudonymization.
//!
//! Digests are SHA-256 over the salt bytes followed by the value bytes.
//! [`user_id`] derives short, stable identifiers from usernames.

mod digest;
mod input;
mod salt;

pub use digest::{DIGEST_LEN, Digest, digest};
#[cfg(feature = "polars")]
pub use digest::digest_dynamic;
pub use input::HashInput;
pub use salt::{SALT_ENV_VAR, Salt};

use crate::error::HashError;

/// Number of hex characters in a user id.
pub const USER_ID_HEX_LEN: usize = 8;

/// Short pseudonymous id for `username`.
///
/// The username is lower-cased, hashed with `salt`, and the hex digest is cut
/// to [`USER_ID_HEX_LEN`] characters. Collisions are unlikely but possible at
/// that length.
pub fn user_id(username: &str, salt: &Salt) -> String {
    digest(username.to_lowercase(), salt).short_hex(USER_ID_HEX_LEN)
}

/// A hasher bound to one salt.
#[derive(Debug, Clone)]
pub struct SaltedHasher {
    salt: Salt,
}

impl SaltedHasher {
    pub fn new(salt: Salt) -> Self {
        Self { salt }
    }

    /// Build a hasher from the salt in environment variable `var`.
    pub fn from_env(var: &str) -> Result<Self, HashError> {
        Salt::from_env(var).map(Self::new)
    }

    pub fn salt(&self) -> &Salt {
        &self.salt
    }

    pub fn digest<'v>(&self, value: impl Into<HashInput<'v>>) -> Digest {
        digest(value, &self.salt)
    }

    pub fn user_id(&self, username: &str) -> String {
        user_id(username, &self.salt)
    }
}
