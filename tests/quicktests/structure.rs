//! Checks on the exported structure only, so they hold for every tree without reaching into
//! its internals.

use balanced_bst::{AnyTree, Augment, Color, NodeRecord, OrderedTree, TreeKind, NO_CHILD};
use quickcheck_macros::quickcheck;

use crate::Op;

/// Per-node facts computed bottom-up from the records.
#[derive(Clone, Copy, Default)]
struct Summary {
    height: usize,
    size: usize,
    black_height: usize,
}

/// Asserts the records form one tree rooted at record 0 with child indices pointing forward,
/// that keys read in order are strictly increasing, and that every node's augmentation holds
/// what it claims to.
pub(crate) fn assert_well_formed(kind: TreeKind, records: &[NodeRecord<i8>]) {
    let mut parents = vec![0; records.len()];
    for (index, record) in records.iter().enumerate() {
        for child in [record.left, record.right].into_iter().flatten() {
            assert!(child > index, "child {child} doesn't come after {index}");
            assert!(child < records.len());
            parents[child] += 1;
        }
        for link in [record.left_index(), record.right_index()] {
            assert!(link == NO_CHILD || link > 0);
        }
    }
    assert!(parents.iter().skip(1).all(|&count| count == 1));
    assert!(parents.first().map_or(true, |&count| count == 0));

    // Children come after their parent, so walking backwards sees them first.
    let mut summaries = vec![Summary::default(); records.len()];
    for (index, record) in records.iter().enumerate().rev() {
        let left = record.left.map(|i| summaries[i]).unwrap_or_default();
        let right = record.right.map(|i| summaries[i]).unwrap_or_default();
        let mut summary = Summary {
            height: left.height.max(right.height) + 1,
            size: left.size + right.size + 1,
            black_height: left.black_height,
        };

        match (kind, record.augment) {
            (TreeKind::Avl, Augment::Height(height)) => {
                assert_eq!(height, summary.height);
                assert!(left.height.abs_diff(right.height) <= 1);
            }
            (TreeKind::RedBlack, Augment::Color(color)) => {
                assert_eq!(left.black_height, right.black_height);
                if color == Color::Red {
                    for child in [record.left, record.right].into_iter().flatten() {
                        assert_eq!(records[child].augment, Augment::Color(Color::Black));
                    }
                } else {
                    summary.black_height += 1;
                }
            }
            (TreeKind::Scapegoat | TreeKind::BbAlpha, Augment::Size(size)) => {
                assert_eq!(size, summary.size);
            }
            (TreeKind::Splay, Augment::None) => {}
            (kind, augment) => panic!("{kind:?} exported {augment:?}"),
        }
        summaries[index] = summary;
    }

    if kind == TreeKind::RedBlack {
        if let Some(root) = records.first() {
            assert_eq!(root.augment, Augment::Color(Color::Black));
        }
    }
    assert!(in_order(records).windows(2).all(|w| w[0] < w[1]));
}

fn in_order(records: &[NodeRecord<i8>]) -> Vec<i8> {
    let mut keys = Vec::with_capacity(records.len());
    let mut stack = Vec::new();
    let mut current = (!records.is_empty()).then_some(0);
    loop {
        while let Some(index) = current {
            stack.push(index);
            current = records[index].left;
        }
        let Some(index) = stack.pop() else {
            return keys;
        };
        keys.push(records[index].key);
        current = records[index].right;
    }
}

#[quickcheck]
fn traverse_is_well_formed(ops: Vec<Op<i8>>) -> bool {
    for kind in TreeKind::ALL {
        let mut tree = AnyTree::new(kind);
        for op in &ops {
            match op {
                Op::Insert(k) => tree.insert(*k),
                Op::Remove(k) => tree.remove(k),
                Op::Search(k) => {
                    tree.search(k);
                }
            }
            assert_well_formed(kind, &tree.traverse());
        }

        let records = tree.traverse();
        let keys: Vec<_> = tree.keys().into_iter().copied().collect();
        if in_order(&records) != keys || records.len() != tree.len() {
            return false;
        }
    }
    true
}

#[quickcheck]
fn height_matches_records(xs: Vec<i8>) -> bool {
    TreeKind::ALL.into_iter().all(|kind| {
        let mut tree = AnyTree::new(kind);
        for x in &xs {
            tree.insert(*x);
        }

        let records = tree.traverse();
        let mut depths = vec![0; records.len()];
        if let Some(root) = depths.first_mut() {
            *root = 1;
        }
        for (index, record) in records.iter().enumerate() {
            for child in [record.left, record.right].into_iter().flatten() {
                depths[child] = depths[index] + 1;
            }
        }

        depths.into_iter().max().unwrap_or(0) == tree.height()
    })
}
