//! A Red-Black tree. Every node is red or black, the root is black, no red node has a red
//! child, and every path from the root down to an empty link crosses the same number of black
//! nodes. Together those keep the longest path at most twice the shortest.
//!
//! Nodes keep a parent link (a plain [`Handle`], never an owner) so that the insert and remove
//! fixups can walk back up without re-descending from the root.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::{Augment, Color, OrderedTree, RedBlackTree};
//!
//! let mut tree = RedBlackTree::new();
//! for key in [10, 20, 30] {
//!     tree.insert(key);
//! }
//!
//! // The middle key was rotated up and the root is always black.
//! let records = tree.traverse();
//! assert_eq!(records[0].key, 20);
//! assert_eq!(records[0].augment, Augment::Color(Color::Black));
//!
//! tree.remove(&10);
//! assert_eq!(tree.keys(), vec![&20, &30]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::arena::{Arena, Handle};
use crate::export::{self, Augment, BinaryNode, Color, NodeRecord};
use crate::{OrderedTree, TreeKind};

/// A colour-balanced Binary Search Tree.
#[derive(Clone)]
pub struct RedBlackTree<T> {
    nodes: Arena<Node<T>>,
    root: Option<Handle>,
}

/// A direction for a node to be in, in a binary tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

impl Direction {
    fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Clone)]
struct Node<T> {
    key: T,
    color: Color,
    /// `None` iff this node is the root.
    parent: Option<Handle>,
    child: [Option<Handle>; 2],
}

impl<T> Index<Direction> for Node<T> {
    type Output = Option<Handle>;

    fn index(&self, index: Direction) -> &Self::Output {
        match index {
            Direction::Left => &self.child[0],
            Direction::Right => &self.child[1],
        }
    }
}

impl<T> IndexMut<Direction> for Node<T> {
    fn index_mut(&mut self, index: Direction) -> &mut Self::Output {
        match index {
            Direction::Left => &mut self.child[0],
            Direction::Right => &mut self.child[1],
        }
    }
}

impl<T> BinaryNode for Node<T> {
    type Key = T;

    fn key(&self) -> &T {
        &self.key
    }

    fn left(&self) -> Option<Handle> {
        self[Direction::Left]
    }

    fn right(&self) -> Option<Handle> {
        self[Direction::Right]
    }

    fn augment(&self) -> Augment {
        Augment::Color(self.color)
    }
}

impl<T> Default for RedBlackTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for RedBlackTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(export::keys(&self.nodes, self.root))
            .finish()
    }
}

impl<T> RedBlackTree<T> {
    /// Generates a new, empty `RedBlackTree`.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Empty links count as black.
    fn is_red(&self, link: Option<Handle>) -> bool {
        link.is_some_and(|n| self.nodes[n].color == Color::Red)
    }

    /// Which side of its parent `node` hangs off. Only meaningful for non-root nodes.
    fn direction_of(&self, node: Handle, parent: Handle) -> Direction {
        if self.nodes[parent][Direction::Left] == Some(node) {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    /// Rotate the subtree at `root` towards `dir`: the child on the opposite side moves up into
    /// `root`'s place and `root` becomes its `dir` child.
    ///
    /// ## Panics
    ///
    /// When `root` has no child opposite `dir`.
    fn rotate(&mut self, root: Handle, dir: Direction) {
        let parent = self.nodes[root].parent;
        let pivot = self.nodes[root][dir.opposite()].expect("rotation needs a pivot child");
        let middle = self.nodes[pivot][dir];

        self.nodes[root][dir.opposite()] = middle;
        if let Some(middle) = middle {
            self.nodes[middle].parent = Some(root);
        }

        self.nodes[pivot][dir] = Some(root);
        self.nodes[root].parent = Some(pivot);
        self.nodes[pivot].parent = parent;

        match parent {
            None => self.root = Some(pivot),
            Some(parent) => {
                let side = self.direction_of(root, parent);
                self.nodes[parent][side] = Some(pivot);
            }
        }
    }

    /// Replace `point` with `new` in `point`'s parent. `point`'s own links are left alone.
    fn transplant(&mut self, point: Handle, new: Option<Handle>) {
        let parent = self.nodes[point].parent;
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.direction_of(point, parent);
                self.nodes[parent][side] = new;
            }
        }
        if let Some(new) = new {
            self.nodes[new].parent = parent;
        }
    }

    fn min_node(&self, mut node: Handle) -> Handle {
        while let Some(left) = self.nodes[node][Direction::Left] {
            node = left;
        }
        node
    }

    /// Restores the no-red-red rule after `node` was added as a red leaf.
    fn fix_after_insert(&mut self, mut node: Handle) {
        while let Some(parent) = self.nodes[node].parent {
            if self.nodes[parent].color == Color::Black {
                break;
            }
            // A red parent with no parent of its own is the root, which is recoloured below.
            let Some(grandparent) = self.nodes[parent].parent else {
                break;
            };

            let parent_dir = self.direction_of(parent, grandparent);
            let uncle = self.nodes[grandparent][parent_dir.opposite()];
            if self.is_red(uncle) {
                // Push the grandparent's blackness down a level and retry two levels up.
                if let Some(uncle) = uncle {
                    self.nodes[uncle].color = Color::Black;
                }
                self.nodes[parent].color = Color::Black;
                self.nodes[grandparent].color = Color::Red;
                node = grandparent;
                continue;
            }

            let mut parent = parent;
            if self.nodes[parent][parent_dir.opposite()] == Some(node) {
                // Zig-zag: rotate it into a zig-zig first.
                self.rotate(parent, parent_dir);
                std::mem::swap(&mut node, &mut parent);
            }

            self.nodes[parent].color = Color::Black;
            self.nodes[grandparent].color = Color::Red;
            self.rotate(grandparent, parent_dir.opposite());
            break;
        }

        if let Some(root) = self.root {
            self.nodes[root].color = Color::Black;
        }
    }

    /// Restores equal black-heights after a black node was spliced out from under
    /// `replacement_parent`. `replacement` is whatever took its place and may be empty, which is
    /// why its parent has to be tracked separately.
    fn fix_after_remove(
        &mut self,
        mut replacement: Option<Handle>,
        mut replacement_parent: Option<Handle>,
    ) {
        while replacement != self.root && !self.is_red(replacement) {
            let Some(parent) = replacement_parent else {
                break;
            };

            let dir = if self.nodes[parent][Direction::Left] == replacement {
                Direction::Left
            } else {
                Direction::Right
            };
            let sibling_dir = dir.opposite();
            // The replacement's side is one black short, so the other side has black-height of
            // at least one and can't be empty.
            let mut sibling =
                self.nodes[parent][sibling_dir].expect("double-black node has a sibling");

            if self.nodes[sibling].color == Color::Red {
                self.nodes[sibling].color = Color::Black;
                self.nodes[parent].color = Color::Red;
                self.rotate(parent, dir);
                sibling = self.nodes[parent][sibling_dir].expect("red sibling had black children");
            }

            // From this point, the sibling is black.
            let near = self.nodes[sibling][dir];
            let far = self.nodes[sibling][sibling_dir];
            if !self.is_red(near) && !self.is_red(far) {
                self.nodes[sibling].color = Color::Red;
                replacement = Some(parent);
                replacement_parent = self.nodes[parent].parent;
                continue;
            }

            if !self.is_red(far) {
                // Only the near child is red: rotate it to the far side.
                let near = near.expect("a red child exists");
                self.nodes[near].color = Color::Black;
                self.nodes[sibling].color = Color::Red;
                self.rotate(sibling, sibling_dir);
                sibling = near;
            }

            self.nodes[sibling].color = self.nodes[parent].color;
            self.nodes[parent].color = Color::Black;
            if let Some(far) = self.nodes[sibling][sibling_dir] {
                self.nodes[far].color = Color::Black;
            }
            self.rotate(parent, dir);
            replacement = self.root;
            break;
        }

        if let Some(node) = replacement {
            self.nodes[node].color = Color::Black;
        }
    }
}

impl<T: Ord> RedBlackTree<T> {
    fn find(&self, value: &T) -> Option<Handle> {
        let mut current = self.root;
        while let Some(node) = current {
            match value.cmp(&self.nodes[node].key) {
                Ordering::Less => current = self.nodes[node][Direction::Left],
                Ordering::Equal => return Some(node),
                Ordering::Greater => current = self.nodes[node][Direction::Right],
            }
        }
        None
    }
}

impl<T: Ord> OrderedTree<T> for RedBlackTree<T> {
    fn kind(&self) -> TreeKind {
        TreeKind::RedBlack
    }

    /// Inserts the key as a red leaf, then recolours and rotates upward until no red node has a
    /// red child. Inserting an existing key does nothing.
    fn insert(&mut self, value: T) {
        let mut parent = None;
        let mut current = self.root;
        let mut dir = Direction::Left;

        while let Some(node) = current {
            dir = match value.cmp(&self.nodes[node].key) {
                Ordering::Less => Direction::Left,
                Ordering::Equal => return,
                Ordering::Greater => Direction::Right,
            };
            parent = current;
            current = self.nodes[node][dir];
        }

        let node = self.nodes.alloc(Node {
            key: value,
            color: Color::Red,
            parent,
            child: [None, None],
        });
        match parent {
            None => self.root = Some(node),
            Some(parent) => self.nodes[parent][dir] = Some(node),
        }

        self.fix_after_insert(node);

        if cfg!(debug_assertions) {
            assert!(!self.is_red(self.root));
        }
    }

    /// Deletes the node containing the given key. A node with two children takes its in-order
    /// successor's key and the successor is spliced out instead. If the tree does not contain the
    /// key, nothing happens.
    fn remove(&mut self, value: &T) {
        let Some(target) = self.find(value) else {
            return;
        };

        let spliced = match (
            self.nodes[target][Direction::Left],
            self.nodes[target][Direction::Right],
        ) {
            (Some(_), Some(right)) => self.min_node(right),
            _ => target,
        };

        let removed_color = self.nodes[spliced].color;
        let replacement = self.nodes[spliced][Direction::Left]
            .or(self.nodes[spliced][Direction::Right]);
        let replacement_parent = self.nodes[spliced].parent;
        self.transplant(spliced, replacement);

        let spliced_node = self.nodes.take(spliced);
        if spliced != target {
            self.nodes[target].key = spliced_node.key;
        }

        if removed_color == Color::Black {
            self.fix_after_remove(replacement, replacement_parent);
        }

        if cfg!(debug_assertions) {
            assert!(!self.is_red(self.root));
        }
    }

    /// Returns whether the key is in the tree. Never restructures the tree.
    fn search(&mut self, value: &T) -> bool {
        self.find(value).is_some()
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
