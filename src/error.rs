//! Errors reported when auditing a tree's ordering.

use thiserror::Error;

/// Which subtree of an ancestor a misplaced value was found in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    /// The ancestor's left subtree.
    Left,
    /// The ancestor's right subtree.
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Violations of the search tree ordering reported by
/// [`Tree::validate`][crate::Tree::validate].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A value sits on the wrong side of one of its ancestors.
    #[error("{value} in the {side} subtree of {ancestor} is out of order")]
    OutOfOrder {
        /// The misplaced value.
        value: String,
        /// The ancestor whose ordering it breaks.
        ancestor: String,
        /// Which subtree of `ancestor` holds `value`.
        side: Side,
    },

    /// A value appears more than once.
    #[error("duplicate value {0}")]
    Duplicate(String),
}

/// Result alias for tree audits.
pub type TreeResult<T> = Result<T, TreeError>;
