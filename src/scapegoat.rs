//! A scapegoat tree. Nodes carry no balance information beyond their subtree size, and most
//! operations are plain BST operations. Only when an insert lands deeper than
//! `⌈log(size) / log(1 / alpha)⌉` levels, counting the root as level 1, does the tree look back
//! up the insertion path for an ancestor
//! that is lopsided (one child holding more than `alpha` of its nodes), the *scapegoat*, and
//! rebuild that one subtree into a perfectly balanced shape. Removals rebuild the whole tree once
//! it has shrunk below `alpha` of its size at the last full rebuild.
//!
//! Rebuilds are `O(size of subtree)` but rare enough that every operation is `O(lg N)` amortized.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::{OrderedTree, ScapegoatTree};
//!
//! let mut tree = ScapegoatTree::new();
//! for key in 1..=100 {
//!     tree.insert(key);
//! }
//!
//! // log base 1.5 of 100 is about 11.4, rounded up that's 12.
//! assert!(tree.height() <= 12);
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::arena::{Arena, Handle, Path};
use crate::export::{self, Augment, BinaryNode, NodeRecord};
use crate::rebuild::{self, Lean, SizedNode};
use crate::{Error, OrderedTree, TreeKind};

/// An amortized-balanced Binary Search Tree.
#[derive(Clone)]
pub struct ScapegoatTree<T> {
    nodes: Arena<Node<T>>,
    root: Option<Handle>,
    alpha: f64,
    /// The most nodes the tree has held since the last whole-tree rebuild.
    max_size: usize,
}

#[derive(Clone)]
struct Node<T> {
    key: T,
    left: Option<Handle>,
    right: Option<Handle>,
    /// Nodes in the subtree rooted here, including this one.
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

impl<T> Default for ScapegoatTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ScapegoatTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(export::keys(&self.nodes, self.root))
            .finish()
    }
}

impl<T> ScapegoatTree<T> {
    /// The balance parameter used by [`new`](Self::new).
    pub const DEFAULT_ALPHA: f64 = 2.0 / 3.0;

    /// Generates a new, empty `ScapegoatTree` with [`DEFAULT_ALPHA`](Self::DEFAULT_ALPHA).
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            alpha: Self::DEFAULT_ALPHA,
            max_size: 0,
        }
    }

    /// Generates a new, empty `ScapegoatTree` with the given balance parameter, which must lie
    /// strictly between `0.5` and `1`. Closer to `0.5` keeps the tree shallower at the cost of
    /// more frequent rebuilds.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{Error, ScapegoatTree, TreeKind};
    ///
    /// assert!(ScapegoatTree::<i32>::with_alpha(0.75).is_ok());
    /// assert_eq!(
    ///     ScapegoatTree::<i32>::with_alpha(0.5).unwrap_err(),
    ///     Error::AlphaOutOfRange { kind: TreeKind::Scapegoat, alpha: 0.5 },
    /// );
    /// ```
    pub fn with_alpha(alpha: f64) -> Result<Self, Error> {
        TreeKind::Scapegoat.check_alpha(alpha)?;
        Ok(Self {
            alpha,
            ..Self::new()
        })
    }

    /// The balance parameter.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// `⌈log(size) / log(1 / alpha)⌉`: how many levels deep, counting the root as 1, an inserted
    /// node may sit without a rebuild.
    fn max_depth(&self, size: usize) -> usize {
        ((size as f64).ln() / (1.0 / self.alpha).ln()).ceil() as usize
    }

    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        rebuild::replace_child(&mut self.nodes, &mut self.root, parent, old, new);
    }

    /// Walks up from the node at the bottom of `path` to the first ancestor whose child on the
    /// path holds more than `alpha` of its nodes, and rebuilds it. Falls back to the root.
    fn rebuild_scapegoat(&mut self, path: &[Handle], inserted: Handle) {
        let mut child_size = self.nodes[inserted].size;
        let mut scapegoat = 0;
        for (depth, &ancestor) in path.iter().enumerate().rev() {
            let size = self.nodes[ancestor].size;
            if child_size as f64 > self.alpha * size as f64 {
                scapegoat = depth;
                break;
            }
            child_size = size;
        }

        let old_root = path[scapegoat];
        let parent = scapegoat.checked_sub(1).map(|d| path[d]);
        let new_root = rebuild::rebuild(&mut self.nodes, old_root, Lean::Left);
        self.replace_child(parent, old_root, new_root);
    }
}

impl<T: Ord> OrderedTree<T> for ScapegoatTree<T> {
    fn kind(&self) -> TreeKind {
        TreeKind::Scapegoat
    }

    /// Inserts the key as a leaf, bumping the size of every ancestor. If the leaf ends up too
    /// deep, the lowest lopsided ancestor is rebuilt. Inserting an existing key does nothing.
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

        let size = self.nodes.len();
        self.max_size = self.max_size.max(size);

        // `path` holds the ancestors, so the new node sits at level `path.len() + 1`. A lone root
        // is never too deep.
        if !path.is_empty() && path.len() + 1 > self.max_depth(size) {
            self.rebuild_scapegoat(&path, inserted);
        }
    }

    /// Deletes the key like an unbalanced BST would, shrinking the size of every ancestor of the
    /// node that's physically unlinked. Once the tree holds fewer than `alpha` times the nodes it
    /// held at its last full rebuild, the whole tree is rebuilt. If the tree does not contain the
    /// key, nothing happens.
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

        let size = self.nodes.len();
        if (size as f64) < self.alpha * self.max_size as f64 {
            if let Some(root) = self.root {
                self.root = rebuild::rebuild(&mut self.nodes, root, Lean::Left);
            }
            self.max_size = size;
        }
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
        rebuild::size_of(&self.nodes, self.root)
    }

    fn height(&self) -> usize {
        export::height(&self.nodes, self.root)
    }

    fn keys(&self) -> Vec<&T> {
        export::keys(&self.nodes, self.root)
    }
}
