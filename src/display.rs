//! Textual rendering of a tree's shape for debugging.

use std::fmt;

use termtree::Tree as TermTree;

use crate::node::Node;
use crate::tree::Tree;

/// Stands in for the missing child of a node that has only one.
const ABSENT_CHILD: &str = "∅";

const EMPTY_TREE: &str = "(empty)";

impl<T: fmt::Display> Tree<T> {
    /// Converts the tree into a [`termtree::Tree`] of rendered values. Each
    /// node lists its left child and then its right child.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::Tree;
    ///
    /// let tree = Tree::from_values([1, 2, 3]);
    /// let rendered = tree.to_termtree().to_string();
    ///
    /// assert_eq!(rendered.lines().next(), Some("2"));
    /// assert_eq!(rendered.lines().count(), 3);
    /// ```
    pub fn to_termtree(&self) -> TermTree<String> {
        match self.root() {
            Some(root) => node_to_termtree(root),
            None => TermTree::new(EMPTY_TREE.to_string()),
        }
    }
}

fn node_to_termtree<T: fmt::Display>(node: &Node<T>) -> TermTree<String> {
    let leaves = if node.is_leaf() {
        Vec::new()
    } else {
        vec![child_to_termtree(node.left()), child_to_termtree(node.right())]
    };

    TermTree::new(node.value().to_string()).with_leaves(leaves)
}

fn child_to_termtree<T: fmt::Display>(child: Option<&Node<T>>) -> TermTree<String> {
    child.map_or_else(|| TermTree::new(ABSENT_CHILD.to_string()), node_to_termtree)
}

impl<T: fmt::Display> fmt::Display for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_termtree())
    }
}
