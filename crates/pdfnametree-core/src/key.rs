//! Name tree keys.
//!
//! A [`NameKey`] is the raw byte string stored as a key in a name tree's
//! `/Names` array. Keys are compared byte-lexicographically and are never
//! normalized: two keys are equal only if their bytes are identical.

use std::borrow::Borrow;
use std::fmt;

/// A byte-string key in a PDF name tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NameKey(Vec<u8>);

impl NameKey {
    /// Create a key from raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the key, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Number of bytes in the key.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the zero-length key.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode the key as a PDF text string for display.
    ///
    /// Keys starting with the UTF-16BE byte order mark are decoded as UTF-16;
    /// everything else is decoded as lossy UTF-8. The result is for humans
    /// only and plays no part in comparisons.
    pub fn to_text_lossy(&self) -> String {
        let bytes = &self.0;
        if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
            let units: Vec<u16> = bytes[2..]
                .chunks(2)
                .filter_map(|c| {
                    if c.len() == 2 {
                        Some(u16::from_be_bytes([c[0], c[1]]))
                    } else {
                        None
                    }
                })
                .collect();
            String::from_utf16_lossy(&units)
        } else {
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

impl fmt::Display for NameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_text_lossy())
    }
}

impl Borrow<[u8]> for NameKey {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for NameKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&[u8]> for NameKey {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for NameKey {
    fn from(bytes: &[u8; N]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<Vec<u8>> for NameKey {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&str> for NameKey {
    fn from(text: &str) -> Self {
        Self(text.as_bytes().to_vec())
    }
}

impl From<String> for NameKey {
    fn from(text: String) -> Self {
        Self(text.into_bytes())
    }
}

impl From<&NameKey> for NameKey {
    fn from(key: &NameKey) -> Self {
        key.clone()
    }
}
