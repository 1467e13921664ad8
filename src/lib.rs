//! This crate exposes five self-balancing Binary Search Trees (BSTs) behind one small interface,
//! mostly so that their rebalancing strategies can be compared side by side.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to insert, find, and delete
//! stored keys. BSTs are typically defined recursively using the notion of a `Node`. A `Node`
//! stores a key and will sometimes have child `Node`s. The most important invariants of a BST
//! are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a key less than its
//!    own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a key greater than
//!    its own key.
//!
//! Searching takes `O(height)`, so every tree here bounds its height in some way:
//!
//! | Tree | Balancing rule | Cost |
//! |------|----------------|------|
//! | [`AvlTree`] | subtree heights differ by at most one | `O(lg N)` worst case |
//! | [`RedBlackTree`] | equal black-height, no red-red edges | `O(lg N)` worst case |
//! | [`SplayTree`] | none; every access moves the key to the root | `O(lg N)` amortized |
//! | [`ScapegoatTree`] | rebuild a subtree when the tree gets too deep | `O(lg N)` amortized |
//! | [`BBAlphaTree`] | rebuild a subtree when its child sizes get lopsided | `O(lg N)` amortized |
//!
//! Every tree stores each key at most once: inserting a key that is already present does
//! nothing, and removing a key that is absent does nothing.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::{AnyTree, OrderedTree, TreeKind};
//!
//! let mut tree = AnyTree::new("scapegoat".parse::<TreeKind>().unwrap());
//! for key in 1..=100 {
//!     tree.insert(key);
//! }
//!
//! assert!(tree.search(&42));
//! tree.remove(&42);
//! assert!(!tree.search(&42));
//! assert_eq!(tree.len(), 99);
//! ```

#![deny(missing_docs, unsafe_code)]

mod any;
mod arena;
pub mod avl;
pub mod bb_alpha;
mod error;
mod export;
mod rebuild;
pub mod red_black;
pub mod scapegoat;
pub mod splay;

pub use any::{AnyTree, TreeKind};
pub use avl::AvlTree;
pub use bb_alpha::BBAlphaTree;
pub use error::Error;
pub use export::{Augment, Color, NodeRecord, Snapshot, NO_CHILD};
pub use red_black::RedBlackTree;
pub use scapegoat::ScapegoatTree;
pub use splay::SplayTree;

/// The operations every tree in this crate supports.
pub trait OrderedTree<T: Ord> {
    /// Which kind of tree this is.
    fn kind(&self) -> TreeKind;

    /// Adds `value` to the tree. Does nothing if it's already present.
    fn insert(&mut self, value: T);

    /// Removes `value` from the tree. Does nothing if it isn't present.
    fn remove(&mut self, value: &T);

    /// Returns whether `value` is in the tree. This takes `&mut self` because some trees (see
    /// [`SplayTree`]) restructure themselves on every access, without changing which keys they
    /// hold.
    fn search(&mut self, value: &T) -> bool;

    /// Exports the tree's structure. See [`NodeRecord`].
    fn traverse(&self) -> Vec<NodeRecord<T>>
    where
        T: Clone;

    /// Number of keys in the tree.
    fn len(&self) -> usize;

    /// Whether the tree holds no keys.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of nodes on the longest path from the root to a leaf. An empty tree has height 0.
    fn height(&self) -> usize;

    /// The keys in ascending order.
    fn keys(&self) -> Vec<&T>;

    /// [`traverse`](OrderedTree::traverse) tagged with the tree's [`kind`](OrderedTree::kind).
    fn snapshot(&self) -> Snapshot<T>
    where
        T: Clone,
    {
        Snapshot {
            kind: self.kind(),
            nodes: self.traverse(),
        }
    }
}
