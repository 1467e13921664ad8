//! Read-only structural export shared by every tree.
//!
//! A tree is exported as a flat list of [`NodeRecord`]s in pre-order: the root (if any) is
//! record `0` and each record names its children by their position in the same list. This is
//! all a renderer needs to redraw the tree, and it's the only way the trees expose their shape.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::{Augment, AvlTree, OrderedTree, NO_CHILD};
//!
//! let mut tree = AvlTree::new();
//! for key in [2, 1, 3] {
//!     tree.insert(key);
//! }
//!
//! let records = tree.traverse();
//! assert_eq!(records[0].key, 2);
//! assert_eq!(records[0].augment, Augment::Height(2));
//! assert_eq!(records[0].left_index(), 1);
//! assert_eq!(records[0].right_index(), 2);
//! assert_eq!(records[1].left_index(), NO_CHILD);
//! ```

use crate::arena::{Arena, Handle};
use crate::TreeKind;

/// Child index used for an absent child by [`NodeRecord::left_index`] and
/// [`NodeRecord::right_index`].
pub const NO_CHILD: isize = -1;

/// Colour of a red-black node.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum Color {
    /// A red node. Never the root and never the parent of another red node.
    Red,
    /// A black node.
    Black,
}

/// The balancing metadata a tree keeps on each node.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Augment {
    /// AVL height of the subtree rooted at this node. A leaf has height 1.
    Height(usize),
    /// Red-black colour.
    Color(Color),
    /// Number of nodes in the subtree rooted at this node, including itself.
    Size(usize),
    /// The tree keeps no balancing metadata (splay trees).
    None,
}

/// One node of an exported tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NodeRecord<T> {
    /// The node's key.
    pub key: T,
    /// The node's balancing metadata.
    pub augment: Augment,
    /// Position of the left child's record, if there is a left child.
    pub left: Option<usize>,
    /// Position of the right child's record, if there is a right child.
    pub right: Option<usize>,
}

impl<T> NodeRecord<T> {
    /// The left child's record position, or [`NO_CHILD`].
    pub fn left_index(&self) -> isize {
        self.left.map_or(NO_CHILD, |i| i as isize)
    }

    /// The right child's record position, or [`NO_CHILD`].
    pub fn right_index(&self) -> isize {
        self.right.map_or(NO_CHILD, |i| i as isize)
    }
}

/// An exported tree together with the kind of tree it came from, so consumers can `match` on
/// `kind` to interpret each record's [`Augment`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snapshot<T> {
    /// Which variant produced the records.
    pub kind: TreeKind,
    /// Pre-order node records; the root is record `0`.
    pub nodes: Vec<NodeRecord<T>>,
}

/// The view of a node that the shared walks need.
pub(crate) trait BinaryNode {
    type Key;

    fn key(&self) -> &Self::Key;
    fn left(&self) -> Option<Handle>;
    fn right(&self) -> Option<Handle>;
    fn augment(&self) -> Augment;
}

/// Pre-order export of the subtree at `root`.
pub(crate) fn records<N>(nodes: &Arena<N>, root: Option<Handle>) -> Vec<NodeRecord<N::Key>>
where
    N: BinaryNode,
    N::Key: Clone,
{
    #[derive(Clone, Copy)]
    enum Slot {
        Root,
        Left(usize),
        Right(usize),
    }

    let mut records: Vec<NodeRecord<N::Key>> = Vec::new();
    let mut stack = Vec::new();
    if let Some(root) = root {
        stack.push((root, Slot::Root));
    }

    while let Some((handle, slot)) = stack.pop() {
        let index = records.len();
        match slot {
            Slot::Root => {}
            Slot::Left(parent) => records[parent].left = Some(index),
            Slot::Right(parent) => records[parent].right = Some(index),
        }

        let node = &nodes[handle];
        records.push(NodeRecord {
            key: node.key().clone(),
            augment: node.augment(),
            left: None,
            right: None,
        });

        // Right first so the left subtree is popped (and numbered) first.
        if let Some(right) = node.right() {
            stack.push((right, Slot::Right(index)));
        }
        if let Some(left) = node.left() {
            stack.push((left, Slot::Left(index)));
        }
    }

    records
}

/// In-order keys of the subtree at `root`.
pub(crate) fn keys<N: BinaryNode>(nodes: &Arena<N>, root: Option<Handle>) -> Vec<&N::Key> {
    let mut keys = Vec::with_capacity(nodes.len());
    let mut stack = Vec::new();
    let mut current = root;

    loop {
        while let Some(handle) = current {
            stack.push(handle);
            current = nodes[handle].left();
        }
        let Some(handle) = stack.pop() else {
            break;
        };
        keys.push(nodes[handle].key());
        current = nodes[handle].right();
    }

    keys
}

/// Number of nodes on the longest root-to-leaf path. An empty tree has height 0.
pub(crate) fn height<N: BinaryNode>(nodes: &Arena<N>, root: Option<Handle>) -> usize {
    let mut tallest = 0;
    let mut stack = Vec::new();
    if let Some(root) = root {
        stack.push((root, 1));
    }

    while let Some((handle, depth)) = stack.pop() {
        tallest = tallest.max(depth);
        let node = &nodes[handle];
        stack.extend(node.left().map(|child| (child, depth + 1)));
        stack.extend(node.right().map(|child| (child, depth + 1)));
    }

    tallest
}

#[cfg(feature = "serde")]
mod serde_impls {
    use serde::ser::{Serialize, SerializeStruct, Serializer};

    use super::{Augment, NodeRecord, Snapshot};
    use crate::TreeKind;

    impl Serialize for TreeKind {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.tag())
        }
    }

    impl<T: Serialize> Serialize for NodeRecord<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let fields = if self.augment == Augment::None { 3 } else { 4 };
            let mut state = serializer.serialize_struct("NodeRecord", fields)?;
            state.serialize_field("key", &self.key)?;
            match self.augment {
                Augment::Height(height) => state.serialize_field("height", &height)?,
                Augment::Color(color) => state.serialize_field("color", &color)?,
                Augment::Size(size) => state.serialize_field("size", &size)?,
                Augment::None => {}
            }
            state.serialize_field("left", &self.left_index())?;
            state.serialize_field("right", &self.right_index())?;
            state.end()
        }
    }

    impl<T: Serialize> Serialize for Snapshot<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut state = serializer.serialize_struct("Snapshot", 2)?;
            state.serialize_field("type", &self.kind)?;
            state.serialize_field("nodes", &self.nodes)?;
            state.end()
        }
    }
}
