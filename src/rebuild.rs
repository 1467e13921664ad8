//! Partial rebuilding: flatten a subtree into key order and relink the same nodes into a
//! perfectly balanced shape. Used by the trees that balance by counting nodes instead of
//! rotating.

use crate::arena::{Arena, Handle, Path};
use crate::export::{self, BinaryNode};

/// A node that knows how many nodes its subtree holds.
pub(crate) trait SizedNode: BinaryNode {
    fn size(&self) -> usize;
    fn size_mut(&mut self) -> &mut usize;
    fn left_mut(&mut self) -> &mut Option<Handle>;
    fn right_mut(&mut self) -> &mut Option<Handle>;
}

pub(crate) fn size_of<N: SizedNode>(nodes: &Arena<N>, link: Option<Handle>) -> usize {
    link.map_or(0, |n| nodes[n].size())
}

/// Points whichever link of `parent` held `old` at `new`. `None` means `old` was the root.
pub(crate) fn replace_child<N: SizedNode>(
    nodes: &mut Arena<N>,
    root: &mut Option<Handle>,
    parent: Option<Handle>,
    old: Handle,
    new: Option<Handle>,
) {
    match parent {
        None => *root = new,
        Some(parent) if nodes[parent].left() == Some(old) => *nodes[parent].left_mut() = new,
        Some(parent) => *nodes[parent].right_mut() = new,
    }
}

/// Which side of a range with an even number of nodes gets the extra one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Lean {
    Left,
    Right,
}

/// Rebuilds the subtree at `root` and returns its new root. No node is allocated or freed and
/// the subtree's size doesn't change, so sizes above it stay correct.
pub(crate) fn rebuild<N: SizedNode>(
    nodes: &mut Arena<N>,
    root: Handle,
    lean: Lean,
) -> Option<Handle> {
    let sorted = flatten(nodes, root);
    let new_root = build_balanced(nodes, &sorted, lean);

    if cfg!(debug_assertions) {
        let height = export::height(nodes, new_root);
        let limit = (sorted.len() as f64).log2().floor() as usize + 1;
        assert!(height <= limit, "rebuilt subtree isn't perfectly balanced");
    }
    new_root
}

fn flatten<N: SizedNode>(nodes: &Arena<N>, root: Handle) -> Vec<Handle> {
    let mut sorted = Vec::with_capacity(nodes[root].size());
    let mut stack = Path::new();
    let mut current = Some(root);

    loop {
        while let Some(node) = current {
            stack.push(node);
            current = nodes[node].left();
        }
        let Some(node) = stack.pop() else {
            break;
        };
        sorted.push(node);
        current = nodes[node].right();
    }

    sorted
}

/// Links `sorted` into a tree by repeatedly taking the midpoint of a range as its root.
fn build_balanced<N: SizedNode>(
    nodes: &mut Arena<N>,
    sorted: &[Handle],
    lean: Lean,
) -> Option<Handle> {
    #[derive(Clone, Copy)]
    enum Slot {
        Root,
        Left(Handle),
        Right(Handle),
    }

    let mut root = None;
    let mut stack = vec![(0, sorted.len(), Slot::Root)];
    while let Some((lo, hi, slot)) = stack.pop() {
        let link = (lo < hi).then(|| {
            let mid = match lean {
                Lean::Left => lo + (hi - lo) / 2,
                Lean::Right => lo + (hi - lo - 1) / 2,
            };
            let node = sorted[mid];
            *nodes[node].size_mut() = hi - lo;
            stack.push((lo, mid, Slot::Left(node)));
            stack.push((mid + 1, hi, Slot::Right(node)));
            node
        });

        match slot {
            Slot::Root => root = link,
            Slot::Left(parent) => *nodes[parent].left_mut() = link,
            Slot::Right(parent) => *nodes[parent].right_mut() = link,
        }
    }

    root
}
