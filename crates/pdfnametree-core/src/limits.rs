//! Key range metadata carried by name tree nodes.

use std::fmt;

use crate::key::NameKey;

/// The `/Limits` of a node: the smallest and largest key in its subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Limits {
    /// Smallest key in the subtree.
    pub min: NameKey,
    /// Largest key in the subtree.
    pub max: NameKey,
}

impl Limits {
    /// Create limits from a minimum and maximum key.
    pub fn new(min: impl Into<NameKey>, max: impl Into<NameKey>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    /// Limits covering exactly one key.
    pub fn single(key: &NameKey) -> Self {
        Self {
            min: key.clone(),
            max: key.clone(),
        }
    }

    /// Returns `true` if `key` lies within `[min, max]`.
    pub fn contains(&self, key: &[u8]) -> bool {
        self.min.as_bytes() <= key && key <= self.max.as_bytes()
    }

    /// Returns `true` if `min <= max`.
    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }

    /// Widen the range so it includes `key`.
    pub fn widen(&mut self, key: &NameKey) {
        if *key < self.min {
            self.min = key.clone();
        }
        if *key > self.max {
            self.max = key.clone();
        }
    }

    /// The smallest range covering both `self` and `other`.
    pub fn union(&self, other: &Limits) -> Limits {
        Limits {
            min: self.min.clone().min(other.min.clone()),
            max: self.max.clone().max(other.max.clone()),
        }
    }

    /// Limits of an ascending sequence of keys, or `None` if it is empty.
    pub fn from_sorted<'a, I>(keys: I) -> Option<Limits>
    where
        I: IntoIterator<Item = &'a NameKey>,
        I::IntoIter: DoubleEndedIterator,
    {
        let mut iter = keys.into_iter();
        let first = iter.next()?;
        let last = iter.next_back().unwrap_or(first);
        Some(Limits {
            min: first.clone(),
            max: last.clone(),
        })
    }
}

impl fmt::Display for Limits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}]", self.min, self.max)
    }
}
