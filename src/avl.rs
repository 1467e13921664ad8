//! An AVL tree. Every node stores the height of its subtree and no node's children may differ
//! in height by more than one. Any insert or remove that breaks that is fixed with one or two
//! rotations per unbalanced ancestor on the way back up.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::{AvlTree, OrderedTree};
//!
//! let mut tree = AvlTree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.search(&1));
//!
//! // Ascending inserts would make a plain BST a linked list.
//! for key in 1..=7 {
//!     tree.insert(key);
//! }
//! assert_eq!(tree.height(), 3);
//!
//! tree.remove(&4);
//! assert!(!tree.search(&4));
//! assert!(tree.search(&5));
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::arena::{Arena, Handle, Path};
use crate::export::{self, Augment, BinaryNode, NodeRecord};
use crate::{OrderedTree, TreeKind};

/// A height-balanced Binary Search Tree.
#[derive(Clone)]
pub struct AvlTree<T> {
    nodes: Arena<Node<T>>,
    root: Option<Handle>,
}

#[derive(Clone)]
struct Node<T> {
    key: T,
    left: Option<Handle>,
    right: Option<Handle>,
    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    height: usize,
}

impl<T> Node<T> {
    fn new(key: T) -> Self {
        Self {
            key,
            left: None,
            right: None,
            height: 1,
        }
    }
}

impl<T> BinaryNode for Node<T> {
    type Key = T;

    fn key(&self) -> &T {
        &self.key
    }

    fn left(&self) -> Option<Handle> {
        self.left
    }

    fn right(&self) -> Option<Handle> {
        self.right
    }

    fn augment(&self) -> Augment {
        Augment::Height(self.height)
    }
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(export::keys(&self.nodes, self.root))
            .finish()
    }
}

impl<T> AvlTree<T> {
    /// Generates a new, empty `AvlTree`.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    fn height_of(&self, link: Option<Handle>) -> usize {
        link.map_or(0, |n| self.nodes[n].height)
    }

    /// Adjusts the height of `node` to be the max of its children's heights + 1.
    fn fix_height(&mut self, node: Handle) {
        let left_height = self.height_of(self.nodes[node].left);
        let right_height = self.height_of(self.nodes[node].right);
        self.nodes[node].height = left_height.max(right_height) + 1;
    }

    /// The difference in height between the left and right subtrees. Positive means left-heavy.
    fn balance_factor(&self, node: Handle) -> isize {
        let left_height = self.height_of(self.nodes[node].left);
        let right_height = self.height_of(self.nodes[node].right);
        left_height as isize - right_height as isize
    }

    /// Points whichever link of `parent` held `old` at `new`. With no `parent`, `old` was the
    /// root.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) if self.nodes[parent].left == Some(old) => self.nodes[parent].left = new,
            Some(parent) => self.nodes[parent].right = new,
        }
    }

    /// Rotate `old_root` to the right. This moves the left child up vertically and `old_root`
    /// down vertically, and returns the new subtree root. The caller must relink the returned
    /// node into `old_root`'s parent.
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///      old_root               new_root
    ///      /     \                /     \
    /// new_root    z   rotate ->  x    old_root
    ///  / \                               /  \
    /// x   y                             y    z
    /// ```
    fn rotate_right(&mut self, old_root: Handle) -> Handle {
        let new_root = self.nodes[old_root]
            .left
            .expect("Rotate right => left child");

        self.nodes[old_root].left = self.nodes[new_root].right;
        self.nodes[new_root].right = Some(old_root);

        self.fix_height(old_root);
        self.fix_height(new_root);
        new_root
    }

    /// Mirror image of [`rotate_right`](Self::rotate_right).
    fn rotate_left(&mut self, old_root: Handle) -> Handle {
        let new_root = self.nodes[old_root]
            .right
            .expect("Rotate left => right child");

        self.nodes[old_root].right = self.nodes[new_root].left;
        self.nodes[new_root].left = Some(old_root);

        self.fix_height(old_root);
        self.fix_height(new_root);
        new_root
    }

    fn rotate_left_right(&mut self, old_root: Handle) -> Handle {
        let left = self.nodes[old_root]
            .left
            .expect("Rotate left-right => left child");
        let new_left = self.rotate_left(left);
        self.nodes[old_root].left = Some(new_left);
        self.rotate_right(old_root)
    }

    fn rotate_right_left(&mut self, old_root: Handle) -> Handle {
        let right = self.nodes[old_root]
            .right
            .expect("Rotate right-left => right child");
        let new_right = self.rotate_right(right);
        self.nodes[old_root].right = Some(new_right);
        self.rotate_left(old_root)
    }

    /// Walks `path` (root first) bottom-up, fixing heights and rotating wherever `choose`
    /// picks a rotation for an unbalanced node.
    ///
    /// `choose` is handed the unbalanced node and its balance factor, which is either `2` or
    /// `-2`.
    fn rebalance_path(
        &mut self,
        path: &[Handle],
        choose: impl Fn(&Self, Handle, isize) -> fn(&mut Self, Handle) -> Handle,
    ) {
        for (depth, &node) in path.iter().enumerate().rev() {
            self.fix_height(node);
            let balance = self.balance_factor(node);
            if balance.abs() <= 1 {
                continue;
            }

            let rotate = choose(self, node, balance);
            let new_root = rotate(self, node);
            let parent = depth.checked_sub(1).map(|d| path[d]);
            self.replace_child(parent, node, Some(new_root));

            if cfg!(debug_assertions) {
                assert!(self.balance_factor(new_root).abs() <= 1);
            }
        }
    }
}

impl<T: Ord> AvlTree<T> {
    /// After inserting `inserted`, the unbalanced node's rotation is picked by which side of its
    /// taller child the new key landed on. One rotation (single or double) per unbalanced node
    /// restores the heights.
    fn rebalance_after_insert(&mut self, path: &[Handle], inserted: Handle) {
        self.rebalance_path(path, |tree, node, balance| {
            let key = &tree.nodes[inserted].key;
            if balance > 1 {
                let left = tree.nodes[node].left.expect("left-heavy => left child");
                if *key < tree.nodes[left].key {
                    Self::rotate_right
                } else {
                    Self::rotate_left_right
                }
            } else {
                let right = tree.nodes[node].right.expect("right-heavy => right child");
                if *key > tree.nodes[right].key {
                    Self::rotate_left
                } else {
                    Self::rotate_right_left
                }
            }
        });
    }

    /// After a removal there is no inserted key to steer by, so the taller child's own balance
    /// picks the rotation. A perfectly balanced child gets a single rotation.
    fn rebalance_after_remove(&mut self, path: &[Handle]) {
        self.rebalance_path(path, |tree, node, balance| {
            if balance > 1 {
                let left = tree.nodes[node].left.expect("left-heavy => left child");
                if tree.balance_factor(left) >= 0 {
                    Self::rotate_right
                } else {
                    Self::rotate_left_right
                }
            } else {
                let right = tree.nodes[node].right.expect("right-heavy => right child");
                if tree.balance_factor(right) <= 0 {
                    Self::rotate_left
                } else {
                    Self::rotate_right_left
                }
            }
        });
    }
}

impl<T: Ord> OrderedTree<T> for AvlTree<T> {
    fn kind(&self) -> TreeKind {
        TreeKind::Avl
    }

    /// Inserts the given key into the tree. Inserting an existing key does nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{AvlTree, OrderedTree};
    ///
    /// let mut tree = AvlTree::new();
    ///
    /// tree.insert(1);
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 1);
    /// ```
    fn insert(&mut self, value: T) {
        let mut path = Path::new();
        let mut current = self.root;
        let mut went_left = false;

        while let Some(node) = current {
            path.push(node);
            match value.cmp(&self.nodes[node].key) {
                Ordering::Less => {
                    current = self.nodes[node].left;
                    went_left = true;
                }
                Ordering::Equal => return,
                Ordering::Greater => {
                    current = self.nodes[node].right;
                    went_left = false;
                }
            }
        }

        let inserted = self.nodes.alloc(Node::new(value));
        match path.last() {
            None => self.root = Some(inserted),
            Some(&parent) if went_left => self.nodes[parent].left = Some(inserted),
            Some(&parent) => self.nodes[parent].right = Some(inserted),
        }

        self.rebalance_after_insert(&path, inserted);
    }

    /// Deletes the node containing the given key from the tree. If the tree does not contain a
    /// node with the key, nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{AvlTree, OrderedTree};
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1);
    /// tree.remove(&1);
    /// tree.remove(&1);
    ///
    /// assert!(tree.is_empty());
    /// ```
    fn remove(&mut self, value: &T) {
        let mut path = Path::new();
        let mut current = self.root;
        let target = loop {
            let Some(node) = current else {
                return;
            };
            match value.cmp(&self.nodes[node].key) {
                Ordering::Less => current = self.nodes[node].left,
                Ordering::Equal => break node,
                Ordering::Greater => current = self.nodes[node].right,
            }
            path.push(node);
        };

        match (self.nodes[target].left, self.nodes[target].right) {
            (Some(_), Some(right)) => {
                // Two children: the in-order successor (the smallest key on the right) gives
                // `target` its key and is unlinked in its place.
                path.push(target);
                let mut successor = right;
                while let Some(next) = self.nodes[successor].left {
                    path.push(successor);
                    successor = next;
                }

                let successor_right = self.nodes[successor].right;
                self.replace_child(path.last().copied(), successor, successor_right);
                let successor = self.nodes.take(successor);
                self.nodes[target].key = successor.key;
            }
            (child, None) | (None, child) => {
                self.replace_child(path.last().copied(), target, child);
                drop(self.nodes.take(target));
            }
        }

        self.rebalance_after_remove(&path);
    }

    /// Returns whether the key is in the tree. Never restructures the tree.
    fn search(&mut self, value: &T) -> bool {
        let mut current = self.root;
        while let Some(node) = current {
            match value.cmp(&self.nodes[node].key) {
                Ordering::Less => current = self.nodes[node].left,
                Ordering::Equal => return true,
                Ordering::Greater => current = self.nodes[node].right,
            }
        }
        false
    }

    fn traverse(&self) -> Vec<NodeRecord<T>>
    where
        T: Clone,
    {
        export::records(&self.nodes, self.root)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn height(&self) -> usize {
        self.height_of(self.root)
    }

    fn keys(&self) -> Vec<&T> {
        export::keys(&self.nodes, self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Assert the heights of the root, left child, and right child of a tree.
    macro_rules! assert_heights {
        ($tree:ident, $height:expr, $left_height:expr, $right_height:expr) => {{
            match $tree.root {
                Some(n) => {
                    assert_eq!($tree.nodes[n].height, $height);
                    assert_eq!($tree.height_of($tree.nodes[n].left), $left_height);
                    assert_eq!($tree.height_of($tree.nodes[n].right), $right_height);
                }
                None => assert_eq!(0, $height),
            }
        }};
    }

    /// Recomputes every height from scratch and checks it against the stored one, the AVL
    /// balance rule, and key order. Returns the subtree height.
    fn checked_height<T: Ord>(tree: &AvlTree<T>, link: Option<Handle>) -> usize {
        let Some(node) = link else {
            return 0;
        };
        let node = &tree.nodes[node];
        if let Some(left) = node.left {
            assert!(tree.nodes[left].key < node.key);
        }
        if let Some(right) = node.right {
            assert!(tree.nodes[right].key > node.key);
        }

        let left_height = checked_height(tree, node.left);
        let right_height = checked_height(tree, node.right);
        assert!(left_height.abs_diff(right_height) <= 1);
        assert_eq!(node.height, left_height.max(right_height) + 1);
        node.height
    }

    pub(crate) fn assert_avl<T: Ord>(tree: &AvlTree<T>) {
        checked_height(tree, tree.root);
        assert!(tree.keys().windows(2).all(|w| w[0] < w[1]));
    }

    fn root_key<T: Copy>(tree: &AvlTree<T>) -> Option<T> {
        tree.root.map(|n| tree.nodes[n].key)
    }

    #[test]
    fn always_adding_left() {
        let keys = [10, 9, 8, 7, 6, 5, 4, 3, 2, 1];
        let mut inserted = Vec::new();

        let mut tree = AvlTree::new();
        assert!(!tree.search(&10));

        for key in keys {
            tree.insert(key);
            inserted.push(key);
            assert_avl(&tree);
            for inserted in &inserted {
                assert!(tree.search(inserted));
            }
        }
        assert_eq!(tree.height(), 4);
    }

    #[test]
    fn always_adding_right() {
        let keys = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let mut inserted = Vec::new();

        let mut tree = AvlTree::new();
        assert!(!tree.search(&1));

        for key in keys {
            tree.insert(key);
            inserted.push(key);
            assert_avl(&tree);
            for inserted in &inserted {
                assert!(tree.search(inserted));
            }
        }
        assert_eq!(tree.height(), 4);
    }

    #[test]
    fn mixed_inserts_stay_balanced() {
        let mut tree = AvlTree::new();
        for key in [5, 3, 8, 1, 4, 7, 9] {
            tree.insert(key);
            assert_avl(&tree);
        }

        assert_eq!(root_key(&tree), Some(5));
        assert_heights!(tree, 3, 2, 2);
        assert_eq!(tree.keys(), vec![&1, &3, &4, &5, &7, &8, &9]);
    }

    #[test]
    fn test_left_right_rebalance() {
        let mut tree = AvlTree::new();

        tree.insert(0);
        tree.insert(-2);
        tree.insert(-1);

        assert_eq!(root_key(&tree), Some(-1));
        assert_heights!(tree, 2, 1, 1);
    }

    #[test]
    fn test_right_left_rebalance() {
        let mut tree = AvlTree::new();

        tree.insert(0);
        tree.insert(2);
        tree.insert(1);

        assert_eq!(root_key(&tree), Some(1));
        assert_heights!(tree, 2, 1, 1);
    }

    #[test]
    fn duplicate_insert_is_a_no_op() {
        let mut tree = AvlTree::new();
        tree.insert(2);
        tree.insert(1);
        tree.insert(2);

        assert_eq!(tree.len(), 2);
        assert_heights!(tree, 2, 1, 0);
    }

    #[test]
    fn delete_with_no_children() {
        let mut tree = AvlTree::new();

        tree.insert(5);
        tree.insert(3);
        tree.insert(7);

        tree.remove(&7);
        assert!(!tree.search(&7));

        assert!(tree.search(&3));
        assert!(tree.search(&5));
        assert_heights!(tree, 2, 1, 0);
    }

    #[test]
    fn delete_with_null_left() {
        let mut tree = AvlTree::new();

        tree.insert(5);
        tree.insert(3);
        tree.insert(7);
        tree.insert(9);

        tree.remove(&7);
        assert!(!tree.search(&7));

        assert!(tree.search(&3));
        assert!(tree.search(&5));
        assert!(tree.search(&9));
        assert_avl(&tree);
    }

    #[test]
    fn delete_with_null_right() {
        let mut tree = AvlTree::new();

        tree.insert(5);
        tree.insert(3);
        tree.insert(7);
        tree.insert(6);

        tree.remove(&7);
        assert!(!tree.search(&7));

        assert!(tree.search(&3));
        assert!(tree.search(&5));
        assert!(tree.search(&6));
        assert_avl(&tree);
    }

    #[test]
    fn delete_with_two_children_takes_successor_key() {
        let mut tree = AvlTree::new();

        tree.insert(5);
        tree.insert(3);
        tree.insert(8);
        tree.insert(2);
        tree.insert(6);
        tree.insert(9);
        tree.insert(7);

        tree.remove(&5);
        assert!(!tree.search(&5));
        assert_eq!(root_key(&tree), Some(6));
        assert_eq!(tree.keys(), vec![&2, &3, &6, &7, &8, &9]);
        assert_avl(&tree);
    }

    #[test]
    fn delete_cascades_rotations() {
        // A minimal AVL tree of height 5; removing the shallowest leaf on the short side makes
        // the root and one of its descendants rotate.
        let mut tree = AvlTree::new();
        for key in [8, 5, 11, 3, 7, 10, 12, 2, 4, 6, 9, 1] {
            tree.insert(key);
        }
        assert_eq!(tree.height(), 5);

        tree.remove(&12);
        assert_avl(&tree);
        assert_eq!(tree.height(), 4);
        assert_eq!(root_key(&tree), Some(5));
    }

    #[test]
    fn delete_root() {
        let mut tree = AvlTree::new();

        tree.insert(5);
        tree.remove(&5);

        assert!(!tree.search(&5));
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn delete_missing_is_a_no_op() {
        let mut tree = AvlTree::new();
        tree.remove(&1);

        tree.insert(1);
        tree.insert(2);
        tree.remove(&3);

        assert_eq!(tree.len(), 2);
        assert_avl(&tree);
    }

    #[test]
    fn freed_nodes_are_reused() {
        let mut tree = AvlTree::new();
        for key in 0..100 {
            tree.insert(key);
        }
        for key in 0..100 {
            tree.remove(&key);
        }
        for key in 100..200 {
            tree.insert(key);
        }

        assert_eq!(tree.len(), 100);
        assert_avl(&tree);
    }

    #[test]
    fn quickcheck_found_invalid_height_after_deletion() {
        let mut tree = AvlTree::new();

        for key in [77, -22, 0, -127, 5, 109, -58, -105, -65, -86, 45, -11, -39] {
            tree.insert(key);
        }
        tree.remove(&0);
        assert_avl(&tree);
        tree.remove(&-122);
        assert_avl(&tree);
    }

    #[test]
    fn quickcheck_found_invalid_height_after_deletion2() {
        let mut tree = AvlTree::new();
        for key in [-49, -107, 127, -22, -77, -128, -119, -69, -122, 109, 115, -118] {
            tree.insert(key);
        }
        tree.remove(&-49);
        assert_avl(&tree);
        tree.remove(&-77);
        assert_avl(&tree);
    }
}
