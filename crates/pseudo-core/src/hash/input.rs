//! Hash inputs: text or raw bytes.

use std::borrow::Cow;

/// A value or salt to be hashed.
///
/// Text is hashed as its UTF-8 encoding, so equal strings always hash the
/// same no matter how they were held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashInput<'a> {
    Text(Cow<'a, str>),
    Bytes(Cow<'a, [u8]>),
}

impl HashInput<'_> {
    /// The bytes fed to the hash function.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }

    pub fn into_owned(self) -> HashInput<'static> {
        match self {
            Self::Text(text) => HashInput::Text(Cow::Owned(text.into_owned())),
            Self::Bytes(bytes) => HashInput::Bytes(Cow::Owned(bytes.into_owned())),
        }
    }
}

impl<'a> From<&'a str> for HashInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for HashInput<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(Cow::Borrowed(value.as_str()))
    }
}

impl From<String> for HashInput<'_> {
    fn from(value: String) -> Self {
        Self::Text(Cow::Owned(value))
    }
}

impl<'a> From<&'a [u8]> for HashInput<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self::Bytes(Cow::Borrowed(value))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for HashInput<'a> {
    fn from(value: &'a [u8; N]) -> Self {
        Self::Bytes(Cow::Borrowed(value.as_slice()))
    }
}

impl<'a> From<&'a Vec<u8>> for HashInput<'a> {
    fn from(value: &'a Vec<u8>) -> Self {
        Self::Bytes(Cow::Borrowed(value.as_slice()))
    }
}

impl From<Vec<u8>> for HashInput<'_> {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(Cow::Owned(value))
    }
}

#[cfg(feature = "polars")]
mod polars_ext {
    use std::borrow::Cow;

    use polars::prelude::AnyValue;

    use super::HashInput;
    use crate::error::HashError;

    /// Only string and binary cells can be hashed; anything else (numbers,
    /// dates, nulls, nested values) is a type mismatch.
    impl<'a> TryFrom<AnyValue<'a>> for HashInput<'a> {
        type Error = HashError;

        fn try_from(value: AnyValue<'a>) -> Result<Self, Self::Error> {
            match value {
                AnyValue::String(text) => Ok(Self::Text(Cow::Borrowed(text))),
                AnyValue::StringOwned(text) => Ok(Self::Text(Cow::Owned(text.to_string()))),
                AnyValue::Binary(bytes) => Ok(Self::Bytes(Cow::Borrowed(bytes))),
                AnyValue::BinaryOwned(bytes) => Ok(Self::Bytes(Cow::Owned(bytes))),
                other => Err(HashError::TypeMismatch {
                    found: other.dtype().to_string(),
                }),
            }
        }
    }
}
