//! Salt configuration.

use std::borrow::Cow;
use std::env::{self, VarError};
use std::fmt;

use super::input::HashInput;
use crate::error::HashError;

/// Environment variable holding the hex-encoded salt.
pub const SALT_ENV_VAR: &str = "PSEUDO_SALT";

/// A secret salt.
///
/// Passed explicitly into every hashing call. `Debug` never prints the bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Salt(Vec<u8>);

impl Salt {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Decode a hex-encoded salt. Surrounding whitespace is ignored.
    pub fn from_hex(encoded: &str) -> Result<Self, HashError> {
        decode_hex(encoded, "hex string")
    }

    /// Read a hex-encoded salt from the environment variable `var`.
    ///
    /// An unset variable is [`HashError::ConfigurationMissing`].
    pub fn from_env(var: &str) -> Result<Self, HashError> {
        match env::var(var) {
            Ok(encoded) => decode_hex(&encoded, var),
            Err(VarError::NotPresent) => Err(HashError::ConfigurationMissing {
                var: var.to_string(),
            }),
            Err(VarError::NotUnicode(_)) => Err(HashError::InvalidSalt {
                origin: var.to_string(),
                reason: "value is not valid unicode".to_string(),
            }),
        }
    }

    /// Read the salt from [`SALT_ENV_VAR`].
    pub fn from_default_env() -> Result<Self, HashError> {
        Self::from_env(SALT_ENV_VAR)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn decode_hex(encoded: &str, origin: &str) -> Result<Salt, HashError> {
    hex::decode(encoded.trim())
        .map(Salt)
        .map_err(|e| HashError::InvalidSalt {
            origin: origin.to_string(),
            reason: e.to_string(),
        })
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Salt([REDACTED; {} bytes])", self.0.len())
    }
}

impl<'a> From<&'a Salt> for HashInput<'a> {
    fn from(salt: &'a Salt) -> Self {
        HashInput::Bytes(Cow::Borrowed(salt.as_bytes()))
    }
}
