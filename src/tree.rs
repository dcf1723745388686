//! A Binary Search Tree over unique values that is balanced when it's built
//! and only rebalanced when asked. `insert` and `delete` are the textbook
//! recursive algorithms and never rotate, so a run of mutations can leave the
//! tree lopsided until [`Tree::rebalance`] rebuilds it at minimal height.
//!
//! # Examples
//!
//! ```
//! use rebuild_bst::Tree;
//!
//! let mut tree = Tree::from_values([1, 7, 4, 23, 8, 9, 4, 3, 5, 7, 9, 67, 6345, 324]);
//!
//! // Duplicates are dropped and the rest are spread evenly.
//! assert_eq!(tree.len(), 11);
//! assert_eq!(tree.height(), 3);
//! assert!(tree.is_balanced());
//!
//! // Growing a chain off the right side unbalances it...
//! for x in [100, 200, 300] {
//!     tree.insert(x);
//! }
//! assert!(!tree.is_balanced());
//!
//! // ...until it's rebuilt.
//! tree.rebalance();
//! assert!(tree.is_balanced());
//! assert_eq!(tree.height(), 3);
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, instrument, trace, Level};

use crate::error::{Side, TreeError, TreeResult};
use crate::node::{Link, Node};
use crate::util;

/// A Binary Search Tree holding each value at most once. This can be used for
/// inserting, finding, and deleting values, for walking them in any of the
/// usual orders, and for asking about the shape of the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree<T> {
    root: Link<T>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// The root node, or `None` if the tree is empty.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of values in the tree.
    pub fn len(&self) -> usize {
        count(self.root())
    }

    /// The number of edges on the longest path from the root down to a leaf.
    /// A lone root has a height of 0 and an empty tree has a height of -1.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::Tree;
    ///
    /// assert_eq!(Tree::<i32>::new().height(), -1);
    /// assert_eq!(Tree::from_values([1]).height(), 0);
    /// assert_eq!(Tree::from_values(1..=7).height(), 2);
    /// ```
    pub fn height(&self) -> isize {
        height_of(self.root())
    }

    /// How many edges separate the root from the node holding `value`, or
    /// `None` if no node holds it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::Tree;
    ///
    /// let tree = Tree::from_values([1, 2, 3]);
    ///
    /// assert_eq!(tree.depth(&2), Some(0));
    /// assert_eq!(tree.depth(&3), Some(1));
    /// assert_eq!(tree.depth(&42), None);
    /// ```
    pub fn depth(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        depth_in(self.root(), value)
    }

    /// Whether, at every node, the heights of the two subtrees differ by at
    /// most one. An empty tree is balanced.
    pub fn is_balanced(&self) -> bool {
        balanced_height(self.root()).is_some()
    }

    /// Calls `visit` on every node in breadth-first order, each level from
    /// left to right.
    pub fn level_order_with<'a>(&'a self, mut visit: impl FnMut(&'a Node<T>)) {
        let mut queue: VecDeque<&Node<T>> = self.root().into_iter().collect();
        while let Some(node) = queue.pop_front() {
            visit(node);
            queue.extend(node.left());
            queue.extend(node.right());
        }
    }

    /// The values in breadth-first order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::Tree;
    ///
    /// let tree = Tree::from_values(1..=5);
    /// assert_eq!(tree.level_order(), [&3, &2, &5, &1, &4]);
    /// ```
    pub fn level_order(&self) -> Vec<&T> {
        let mut values = Vec::new();
        self.level_order_with(|node| values.push(node.value()));
        values
    }

    /// Calls `visit` on each node before visiting its left and then right
    /// subtrees.
    pub fn preorder_with<'a>(&'a self, mut visit: impl FnMut(&'a Node<T>)) {
        preorder_from(self.root(), &mut visit);
    }

    /// The values in pre-order.
    pub fn preorder(&self) -> Vec<&T> {
        let mut values = Vec::new();
        self.preorder_with(|node| values.push(node.value()));
        values
    }

    /// Calls `visit` on each node after its left subtree and before its right
    /// subtree, which is ascending order.
    pub fn inorder_with<'a>(&'a self, mut visit: impl FnMut(&'a Node<T>)) {
        inorder_from(self.root(), &mut visit);
    }

    /// The values in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::Tree;
    ///
    /// let tree = Tree::from_values([3, 1, 2, 3]);
    /// assert_eq!(tree.inorder(), [&1, &2, &3]);
    /// ```
    pub fn inorder(&self) -> Vec<&T> {
        let mut values = Vec::new();
        self.inorder_with(|node| values.push(node.value()));
        values
    }

    /// Calls `visit` on each node after visiting its left and then right
    /// subtrees.
    pub fn postorder_with<'a>(&'a self, mut visit: impl FnMut(&'a Node<T>)) {
        postorder_from(self.root(), &mut visit);
    }

    /// The values in post-order.
    pub fn postorder(&self) -> Vec<&T> {
        let mut values = Vec::new();
        self.postorder_with(|node| values.push(node.value()));
        values
    }
}

impl<T: Ord> Tree<T> {
    /// Builds a tree of minimal height from arbitrary values. The values are
    /// sorted and duplicates are dropped first.
    #[instrument(level = "debug", skip_all)]
    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self {
        let tree = Self::from_sorted_unique(util::sorted_unique(values));
        debug!(len = tree.len(), height = tree.height(), "built tree");
        tree
    }

    /// Builds a tree of minimal height from values that are already strictly
    /// ascending. Passing anything else breaks the search tree ordering.
    pub fn from_sorted_unique(values: Vec<T>) -> Self {
        debug_assert!(
            util::is_strictly_ascending(&values),
            "`from_sorted_unique` needs strictly ascending values"
        );
        Self {
            root: build(values),
        }
    }

    /// Inserts `value` and returns whether it was added. Inserting a value
    /// that's already present leaves the tree untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let (root, inserted) = insert_into(self.root.take(), value);
        self.root = Some(root);
        if !inserted {
            trace!("value already present, nothing inserted");
        }
        inserted
    }

    /// Deletes the node holding `value` and returns the removed value. If the
    /// tree doesn't contain it, nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::Tree;
    ///
    /// let mut tree = Tree::from_values([1, 2, 3]);
    ///
    /// assert_eq!(tree.delete(&2), Some(2));
    /// assert_eq!(tree.delete(&2), None);
    /// assert_eq!(tree.inorder(), [&1, &3]);
    /// ```
    pub fn delete(&mut self, value: &T) -> Option<T> {
        let (root, removed) = delete_from(self.root.take(), value);
        self.root = root;
        if removed.is_none() {
            trace!("value absent, nothing deleted");
        }
        removed
    }

    /// Potentially finds the node holding `value`. If no node holds it,
    /// `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::Tree;
    ///
    /// let tree = Tree::from_values([1, 2]);
    ///
    /// assert_eq!(tree.find(&1).map(|node| node.value()), Some(&1));
    /// assert!(tree.find(&42).is_none());
    /// ```
    pub fn find(&self, value: &T) -> Option<&Node<T>> {
        find_in(self.root(), value)
    }

    /// Whether some node holds `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Rebuilds the tree from its values so it has minimal height again.
    #[instrument(level = "debug", skip_all)]
    pub fn rebalance(&mut self) {
        let before = tracing::enabled!(Level::DEBUG).then(|| self.height());
        let mut values = Vec::new();
        into_inorder(self.root.take(), &mut values);
        debug_assert!(util::is_strictly_ascending(&values));

        self.root = build(values);
        debug!(?before, after = self.height(), "rebalanced tree");
    }

    /// Checks that every value is strictly between the bounds its ancestors
    /// impose and reports the first one that isn't.
    pub fn validate(&self) -> TreeResult<()>
    where
        T: fmt::Debug,
    {
        validate_between(self.root(), None, None)
    }
}

impl<T: Ord> FromIterator<T> for Tree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<T: Ord> From<Vec<T>> for Tree<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_values(values)
    }
}

/// Builds a subtree from strictly ascending `values` by rooting it at the
/// middle element. When the halves can't be even the left one is larger.
fn build<T>(mut values: Vec<T>) -> Link<T> {
    if values.is_empty() {
        return None;
    }

    // `mid < len`, so `right` starts with the subtree's root value.
    let mid = values.len() / 2;
    let mut right = values.split_off(mid);
    let value = right.remove(0);

    Some(Box::new(Node {
        value,
        left: build(values),
        right: build(right),
    }))
}

/// Inserts `value` into the subtree and returns the subtree's root along with
/// whether a node was added.
fn insert_into<T: Ord>(link: Link<T>, value: T) -> (Box<Node<T>>, bool) {
    let Some(mut node) = link else {
        return (Node::new_boxed(value), true);
    };

    let inserted = match value.cmp(&node.value) {
        Ordering::Less => {
            let (left, inserted) = insert_into(node.left.take(), value);
            node.left = Some(left);
            inserted
        }
        Ordering::Equal => false,
        Ordering::Greater => {
            let (right, inserted) = insert_into(node.right.take(), value);
            node.right = Some(right);
            inserted
        }
    };

    if cfg!(debug_assertions) {
        if let Some(left) = node.left() {
            assert!(node.value > left.value);
        }
        if let Some(right) = node.right() {
            assert!(node.value < right.value);
        }
    }
    (node, inserted)
}

/// Deletes `value` from the subtree and returns the subtree's new root along
/// with the removed value.
fn delete_from<T: Ord>(link: Link<T>, value: &T) -> (Link<T>, Option<T>) {
    let Some(mut node) = link else {
        return (None, None);
    };

    match value.cmp(&node.value) {
        Ordering::Less => {
            let (left, removed) = delete_from(node.left.take(), value);
            node.left = left;
            (Some(node), removed)
        }
        Ordering::Greater => {
            let (right, removed) = delete_from(node.right.take(), value);
            node.right = right;
            (Some(node), removed)
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, right) => (right, Some(node.value)),
            (left, None) => (left, Some(node.value)),

            // With two children the successor (the smallest value in the
            // right subtree) takes this node's place.
            (Some(left), Some(right)) => {
                let (right, successor) = take_min(right);
                let removed = std::mem::replace(&mut node.value, successor);
                node.left = Some(left);
                node.right = right;
                (Some(node), Some(removed))
            }
        },
    }
}

/// Unlinks the leftmost node of the subtree. Returns what's left of the
/// subtree and the value that was unlinked.
fn take_min<T>(mut node: Box<Node<T>>) -> (Link<T>, T) {
    match node.left.take() {
        None => {
            let Node { value, right, .. } = *node;
            (right, value)
        }
        Some(left) => {
            let (left, min) = take_min(left);
            node.left = left;
            (Some(node), min)
        }
    }
}

fn find_in<'a, T: Ord>(node: Option<&'a Node<T>>, value: &T) -> Option<&'a Node<T>> {
    let node = node?;
    match value.cmp(&node.value) {
        Ordering::Less => find_in(node.left(), value),
        Ordering::Equal => Some(node),
        Ordering::Greater => find_in(node.right(), value),
    }
}

fn count<T>(node: Option<&Node<T>>) -> usize {
    node.map_or(0, |n| 1 + count(n.left()) + count(n.right()))
}

fn height_of<T>(node: Option<&Node<T>>) -> isize {
    match node {
        None => -1,
        Some(n) => 1 + height_of(n.left()).max(height_of(n.right())),
    }
}

/// The height of the subtree, or `None` as soon as some node's subtrees
/// differ in height by more than one.
fn balanced_height<T>(node: Option<&Node<T>>) -> Option<isize> {
    let Some(node) = node else {
        return Some(-1);
    };

    let left = balanced_height(node.left())?;
    let right = balanced_height(node.right())?;
    if left.abs_diff(right) > 1 {
        return None;
    }
    Some(1 + left.max(right))
}

/// Searches the node, then its left subtree, then its right subtree.
fn depth_in<T: PartialEq>(node: Option<&Node<T>>, value: &T) -> Option<usize> {
    let node = node?;
    if node.value == *value {
        return Some(0);
    }

    depth_in(node.left(), value)
        .or_else(|| depth_in(node.right(), value))
        .map(|depth| depth + 1)
}

fn preorder_from<'a, T, F>(node: Option<&'a Node<T>>, visit: &mut F)
where
    F: FnMut(&'a Node<T>),
{
    if let Some(node) = node {
        visit(node);
        preorder_from(node.left(), visit);
        preorder_from(node.right(), visit);
    }
}

fn inorder_from<'a, T, F>(node: Option<&'a Node<T>>, visit: &mut F)
where
    F: FnMut(&'a Node<T>),
{
    if let Some(node) = node {
        inorder_from(node.left(), visit);
        visit(node);
        inorder_from(node.right(), visit);
    }
}

fn postorder_from<'a, T, F>(node: Option<&'a Node<T>>, visit: &mut F)
where
    F: FnMut(&'a Node<T>),
{
    if let Some(node) = node {
        postorder_from(node.left(), visit);
        postorder_from(node.right(), visit);
        visit(node);
    }
}

/// Moves every value out of the subtree in ascending order.
fn into_inorder<T>(link: Link<T>, values: &mut Vec<T>) {
    if let Some(node) = link {
        let Node { value, left, right } = *node;
        into_inorder(left, values);
        values.push(value);
        into_inorder(right, values);
    }
}

/// `lower` is the nearest ancestor this subtree is to the right of and
/// `upper` is the nearest ancestor it is to the left of.
fn validate_between<T: Ord + fmt::Debug>(
    node: Option<&Node<T>>,
    lower: Option<&T>,
    upper: Option<&T>,
) -> TreeResult<()> {
    let Some(node) = node else {
        return Ok(());
    };

    if let Some(lower) = lower {
        check_bound(&node.value, lower, Side::Right)?;
    }
    if let Some(upper) = upper {
        check_bound(&node.value, upper, Side::Left)?;
    }

    validate_between(node.left(), lower, Some(&node.value))?;
    validate_between(node.right(), Some(&node.value), upper)
}

fn check_bound<T: Ord + fmt::Debug>(value: &T, ancestor: &T, side: Side) -> TreeResult<()> {
    let expected = match side {
        Side::Left => Ordering::Less,
        Side::Right => Ordering::Greater,
    };

    match value.cmp(ancestor) {
        Ordering::Equal => Err(TreeError::Duplicate(format!("{value:?}"))),
        ordering if ordering == expected => Ok(()),
        _ => Err(TreeError::OutOfOrder {
            value: format!("{value:?}"),
            ancestor: format!("{ancestor:?}"),
            side,
        }),
    }
}
