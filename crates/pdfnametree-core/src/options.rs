//! Configuration for name tree holders.
//!
//! Provides [`NameTreeOptions`] for tuning repair policy, node fan-out and
//! traversal bounds, and [`TreeState`] for the one-time validity check a
//! holder performs on first use.

use std::fmt;

/// Default maximum number of entries per leaf and kids per intermediate node.
pub const DEFAULT_FAN_OUT: usize = 32;

/// Default bound on tree height during descent and validation.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Smallest fan-out that still lets a full node split into two non-full halves.
pub const MIN_FAN_OUT: usize = 2;

/// Options controlling name tree behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NameTreeOptions {
    /// Rebuild malformed trees instead of failing (default: true).
    pub auto_repair: bool,
    /// Maximum entries per leaf and kids per intermediate node (default: 32).
    ///
    /// Values below [`MIN_FAN_OUT`] are treated as [`MIN_FAN_OUT`].
    pub fan_out: usize,
    /// Maximum number of levels below the root (default: 64).
    pub max_depth: usize,
}

impl NameTreeOptions {
    /// Default options with the given auto-repair policy.
    pub fn with_auto_repair(auto_repair: bool) -> Self {
        Self {
            auto_repair,
            ..Self::default()
        }
    }

    /// Set the fan-out, returning the modified options (builder pattern).
    pub fn fan_out(mut self, fan_out: usize) -> Self {
        self.fan_out = fan_out;
        self
    }

    /// The fan-out actually used for splits and rebuilds.
    pub fn effective_fan_out(&self) -> usize {
        self.fan_out.max(MIN_FAN_OUT)
    }
}

impl Default for NameTreeOptions {
    fn default() -> Self {
        Self {
            auto_repair: true,
            fan_out: DEFAULT_FAN_OUT,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl fmt::Display for NameTreeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NameTreeOptions(auto_repair={}, fan_out={}, max_depth={})",
            self.auto_repair, self.fan_out, self.max_depth
        )
    }
}

/// Validity status cached by a name tree holder.
///
/// Starts as [`Unchecked`](TreeState::Unchecked) and changes once, on the
/// first operation that needs a well-formed tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TreeState {
    /// The tree has not been checked yet.
    #[default]
    Unchecked,
    /// The tree passed the validity check.
    Valid,
    /// The tree was malformed and has been rebuilt.
    Repaired,
    /// The tree is malformed and auto-repair is disabled.
    Invalid(String),
}

impl TreeState {
    /// Returns `true` once the tree is known to be usable.
    pub fn is_usable(&self) -> bool {
        matches!(self, TreeState::Valid | TreeState::Repaired)
    }
}

impl fmt::Display for TreeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeState::Unchecked => write!(f, "unchecked"),
            TreeState::Valid => write!(f, "valid"),
            TreeState::Repaired => write!(f, "repaired"),
            TreeState::Invalid(reason) => write!(f, "invalid ({reason})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = NameTreeOptions::default();
        assert!(opts.auto_repair);
        assert_eq!(opts.fan_out, 32);
        assert_eq!(opts.max_depth, 64);
    }

    #[test]
    fn with_auto_repair_keeps_other_defaults() {
        let opts = NameTreeOptions::with_auto_repair(false);
        assert!(!opts.auto_repair);
        assert_eq!(opts.fan_out, DEFAULT_FAN_OUT);
    }

    #[test]
    fn effective_fan_out_is_clamped() {
        assert_eq!(NameTreeOptions::default().fan_out(0).effective_fan_out(), 2);
        assert_eq!(NameTreeOptions::default().fan_out(1).effective_fan_out(), 2);
        assert_eq!(NameTreeOptions::default().fan_out(7).effective_fan_out(), 7);
    }

    #[test]
    fn display() {
        let s = NameTreeOptions::default().to_string();
        assert!(s.contains("auto_repair=true"));
        assert!(s.contains("fan_out=32"));
        assert!(s.contains("max_depth=64"));
    }

    #[test]
    fn tree_state_default_and_usable() {
        assert_eq!(TreeState::default(), TreeState::Unchecked);
        assert!(!TreeState::Unchecked.is_usable());
        assert!(TreeState::Valid.is_usable());
        assert!(TreeState::Repaired.is_usable());
        assert!(!TreeState::Invalid("cycle".into()).is_usable());
    }

    #[test]
    fn tree_state_display() {
        assert_eq!(TreeState::Repaired.to_string(), "repaired");
        assert_eq!(TreeState::Invalid("x".into()).to_string(), "invalid (x)");
    }
}
