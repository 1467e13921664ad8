//! A weight-balanced (BB\[alpha\]) tree. Every node knows the size of its subtree, and a node
//! is in balance when each of its children holds between `alpha` and `1 - alpha` of the nodes
//! in its subtree. After each insert or remove the sizes along the path are updated and any
//! ancestor that has fallen out of balance is rebuilt into a perfectly balanced shape.
//!
//! Rebuilding never changes a subtree's size, so rebuilding a low unbalanced ancestor and then a
//! higher one gives the same tree as rebuilding the highest one alone. That's what happens here.
//!
//! Leaves and other tiny subtrees can never be in balance, since an empty child holds less than
//! `alpha` of anything. Rebuilding those can't make them any shorter, so every node is either in
//! balance or roots a subtree that is already as short as its size allows.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::{BBAlphaTree, OrderedTree};
//!
//! let mut tree = BBAlphaTree::new();
//! for key in 1..=1000 {
//!     tree.insert(key);
//! }
//!
//! // log base 4/3 of 1001 is about 24.
//! assert!(tree.height() <= 24);
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::arena::{Arena, Handle, Path};
use crate::export::{self, Augment, BinaryNode, NodeRecord};
use crate::rebuild::{self, Lean, SizedNode};
use crate::{Error, OrderedTree, TreeKind};

/// A weight-balanced Binary Search Tree.
#[derive(Clone)]
pub struct BBAlphaTree<T> {
    nodes: Arena<Node<T>>,
    root: Option<Handle>,
    alpha: f64,
}

#[derive(Clone)]
struct Node<T> {
    key: T,
    left: Option<Handle>,
    right: Option<Handle>,
    size: usize,
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
        Augment::Size(self.size)
    }
}

impl<T> SizedNode for Node<T> {
    fn size(&self) -> usize {
        self.size
    }

    fn size_mut(&mut self) -> &mut usize {
        &mut self.size
    }

    fn left_mut(&mut self) -> &mut Option<Handle> {
        &mut self.left
    }

    fn right_mut(&mut self) -> &mut Option<Handle> {
        &mut self.right
    }
}

impl<T> Default for BBAlphaTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for BBAlphaTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(export::keys(&self.nodes, self.root))
            .finish()
    }
}

impl<T> BBAlphaTree<T> {
    /// The balance parameter used by [`new`](Self::new).
    pub const DEFAULT_ALPHA: f64 = 0.25;

    /// Generates a new, empty `BBAlphaTree` with [`DEFAULT_ALPHA`](Self::DEFAULT_ALPHA).
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            alpha: Self::DEFAULT_ALPHA,
        }
    }

    /// Generates a new, empty `BBAlphaTree` with the given balance parameter, which must lie
    /// strictly between `0` and `0.5`. Smaller values tolerate more skew before rebuilding.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::BBAlphaTree;
    ///
    /// assert!(BBAlphaTree::<i32>::with_alpha(0.3).is_ok());
    /// assert!(BBAlphaTree::<i32>::with_alpha(0.5).is_err());
    /// ```
    pub fn with_alpha(alpha: f64) -> Result<Self, Error> {
        TreeKind::BbAlpha.check_alpha(alpha)?;
        Ok(Self {
            alpha,
            ..Self::new()
        })
    }

    /// The balance parameter.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    fn size_of(&self, link: Option<Handle>) -> usize {
        rebuild::size_of(&self.nodes, link)
    }

    /// Whether each child of `node` holds between `alpha` and `1 - alpha` of its subtree.
    fn is_balanced(&self, node: Handle) -> bool {
        let left = self.size_of(self.nodes[node].left) as f64;
        let right = self.size_of(self.nodes[node].right) as f64;
        let total = left + right + 1.0;
        let band = self.alpha * total..=(1.0 - self.alpha) * total;
        band.contains(&left) && band.contains(&right)
    }

    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        rebuild::replace_child(&mut self.nodes, &mut self.root, parent, old, new);
    }

    /// Rebuilds the highest node of `path` that's out of balance. Sizes along `path` must
    /// already be current.
    fn rebalance_path(&mut self, path: &[Handle]) {
        let Some(depth) = path.iter().position(|&node| !self.is_balanced(node)) else {
            return;
        };

        let old_root = path[depth];
        let parent = depth.checked_sub(1).map(|d| path[d]);
        let new_root = rebuild::rebuild(&mut self.nodes, old_root, Lean::Right);
        self.replace_child(parent, old_root, new_root);
    }
}

impl<T: Ord> OrderedTree<T> for BBAlphaTree<T> {
    fn kind(&self) -> TreeKind {
        TreeKind::BbAlpha
    }

    /// Inserts the key as a leaf and bumps the size of every ancestor, then rebuilds the highest
    /// ancestor that's out of balance. Inserting an existing key does nothing.
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

        let inserted = self.nodes.alloc(Node {
            key: value,
            left: None,
            right: None,
            size: 1,
        });
        match path.last() {
            None => self.root = Some(inserted),
            Some(&parent) if went_left => self.nodes[parent].left = Some(inserted),
            Some(&parent) => self.nodes[parent].right = Some(inserted),
        }
        for &ancestor in &path {
            self.nodes[ancestor].size += 1;
        }

        self.rebalance_path(&path);
    }

    /// Deletes the key like an unbalanced BST would, shrinking the size of every ancestor of the
    /// node that's physically unlinked, then rebuilds the highest ancestor that's out of
    /// balance. If the tree does not contain the key, nothing happens.
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
        for &ancestor in &path {
            self.nodes[ancestor].size -= 1;
        }

        self.rebalance_path(&path);
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
        self.size_of(self.root)
    }

    fn height(&self) -> usize {
        export::height(&self.nodes, self.root)
    }

    fn keys(&self) -> Vec<&T> {
        export::keys(&self.nodes, self.root)
    }
}
