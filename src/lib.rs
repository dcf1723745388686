//! This crate exposes a Binary Search Tree (BST) that is built balanced and
//! only restructured on request.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value and
//! will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is the
//! longest path from the root `Node` to a leaf `Node`). Building the tree from
//! sorted values by always rooting a subtree at its middle value limits the
//! height to `⌊lg N⌋` where `N` is the number of nodes. Inserts and deletes
//! here don't rotate anything, so they can grow the height again until
//! [`Tree::rebalance`] rebuilds the tree. BSTs also naturally support sorted
//! iteration by visiting the left subtree, then the subtree root, then the
//! right subtree.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod display;
pub mod error;
mod node;
pub mod tree;
mod util;


pub use error::{Side, TreeError, TreeResult};
pub use node::Node;
pub use tree::Tree;
