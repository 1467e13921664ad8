//! A splay tree. It keeps no balancing metadata at all: every successful search and every
//! insert rotates the touched node all the way up to the root. Recently used keys stay near the
//! top, and any sequence of `m` operations costs `O(m lg N)` overall even though a single one
//! may walk a long path.
//!
//! Because the shape depends on access history, two splay trees holding the same keys can look
//! completely different.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::{OrderedTree, SplayTree};
//!
//! let mut tree = SplayTree::new();
//! for key in 1..=3 {
//!     tree.insert(key);
//!     // The newest key is always the root.
//!     assert_eq!(tree.traverse()[0].key, key);
//! }
//!
//! assert!(tree.search(&1));
//! assert_eq!(tree.traverse()[0].key, 1);
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::arena::{Arena, Handle};
use crate::export::{self, Augment, BinaryNode, NodeRecord};
use crate::{OrderedTree, TreeKind};

/// A self-adjusting Binary Search Tree.
#[derive(Clone)]
pub struct SplayTree<T> {
    nodes: Arena<Node<T>>,
    root: Option<Handle>,
}

#[derive(Clone)]
struct Node<T> {
    key: T,
    left: Option<Handle>,
    right: Option<Handle>,
    parent: Option<Handle>,
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
        Augment::None
    }
}

impl<T> Default for SplayTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SplayTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(export::keys(&self.nodes, self.root))
            .finish()
    }
}

impl<T> SplayTree<T> {
    /// Generates a new, empty `SplayTree`.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    fn is_left_child(&self, node: Handle, parent: Handle) -> bool {
        self.nodes[parent].left == Some(node)
    }

    /// Rotates `node` above its parent, whichever side it's on.
    ///
    /// ```text
    ///        parent            node
    ///        /    \           /    \
    ///      node    z   ->    x    parent
    ///     /    \                  /    \
    ///    x      y                y      z
    /// ```
    ///
    /// ## Panics
    ///
    /// When `node` is the root.
    fn rotate_up(&mut self, node: Handle) {
        let parent = self.nodes[node].parent.expect("the root can't rotate up");
        let grandparent = self.nodes[parent].parent;

        if self.is_left_child(node, parent) {
            let crossing = self.nodes[node].right;
            self.nodes[parent].left = crossing;
            if let Some(crossing) = crossing {
                self.nodes[crossing].parent = Some(parent);
            }
            self.nodes[node].right = Some(parent);
        } else {
            let crossing = self.nodes[node].left;
            self.nodes[parent].right = crossing;
            if let Some(crossing) = crossing {
                self.nodes[crossing].parent = Some(parent);
            }
            self.nodes[node].left = Some(parent);
        }

        self.nodes[parent].parent = Some(node);
        self.nodes[node].parent = grandparent;
        match grandparent {
            None => self.root = Some(node),
            Some(grandparent) if self.nodes[grandparent].left == Some(parent) => {
                self.nodes[grandparent].left = Some(node)
            }
            Some(grandparent) => self.nodes[grandparent].right = Some(node),
        }
    }

    /// Moves `node` to the root.
    fn splay(&mut self, node: Handle) {
        while let Some(parent) = self.nodes[node].parent {
            match self.nodes[parent].parent {
                // Zig.
                None => self.rotate_up(node),
                Some(grandparent) => {
                    if self.is_left_child(node, parent) == self.is_left_child(parent, grandparent)
                    {
                        // Zig-zig: the grandparent's rotation goes first.
                        self.rotate_up(parent);
                        self.rotate_up(node);
                    } else {
                        // Zig-zag.
                        self.rotate_up(node);
                        self.rotate_up(node);
                    }
                }
            }
        }

        debug_assert_eq!(self.root, Some(node));
    }

    fn maximum(&self, mut node: Handle) -> Handle {
        while let Some(right) = self.nodes[node].right {
            node = right;
        }
        node
    }
}

impl<T: Ord> SplayTree<T> {
    /// Finds the node holding `value` without restructuring anything.
    fn find(&self, value: &T) -> Option<Handle> {
        let mut current = self.root;
        while let Some(node) = current {
            match value.cmp(&self.nodes[node].key) {
                Ordering::Less => current = self.nodes[node].left,
                Ordering::Equal => return Some(node),
                Ordering::Greater => current = self.nodes[node].right,
            }
        }
        None
    }
}

impl<T: Ord> OrderedTree<T> for SplayTree<T> {
    fn kind(&self) -> TreeKind {
        TreeKind::Splay
    }

    /// Inserts the key and splays it to the root. Inserting an existing key splays the existing
    /// node instead.
    fn insert(&mut self, value: T) {
        let mut parent = None;
        let mut current = self.root;
        let mut went_left = false;

        while let Some(node) = current {
            match value.cmp(&self.nodes[node].key) {
                Ordering::Less => {
                    current = self.nodes[node].left;
                    went_left = true;
                }
                Ordering::Equal => {
                    self.splay(node);
                    return;
                }
                Ordering::Greater => {
                    current = self.nodes[node].right;
                    went_left = false;
                }
            }
            parent = Some(node);
        }

        let node = self.nodes.alloc(Node {
            key: value,
            left: None,
            right: None,
            parent,
        });
        match parent {
            None => self.root = Some(node),
            Some(parent) if went_left => self.nodes[parent].left = Some(node),
            Some(parent) => self.nodes[parent].right = Some(node),
        }

        self.splay(node);
    }

    /// Splays the key to the root and removes it. The left subtree's maximum is then splayed to
    /// the top of the left subtree, where it has no right child, and the old right subtree is
    /// hung there. If the tree does not contain the key, nothing happens.
    fn remove(&mut self, value: &T) {
        let Some(node) = self.find(value) else {
            return;
        };
        self.splay(node);

        let removed = self.nodes.take(node);
        let right = removed.right;
        if let Some(right) = right {
            self.nodes[right].parent = None;
        }

        match removed.left {
            None => self.root = right,
            Some(left) => {
                self.nodes[left].parent = None;
                self.root = Some(left);

                let max = self.maximum(left);
                self.splay(max);
                self.nodes[max].right = right;
                if let Some(right) = right {
                    self.nodes[right].parent = Some(max);
                }
            }
        }
    }

    /// Returns whether the key is in the tree, splaying it to the root if it is. A miss leaves
    /// the tree untouched.
    fn search(&mut self, value: &T) -> bool {
        match self.find(value) {
            Some(node) => {
                self.splay(node);
                true
            }
            None => false,
        }
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
        export::height(&self.nodes, self.root)
    }

    fn keys(&self) -> Vec<&T> {
        export::keys(&self.nodes, self.root)
    }
}
