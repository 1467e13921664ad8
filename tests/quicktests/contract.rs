use balanced_bst::{AnyTree, OrderedTree, TreeKind};
use quickcheck_macros::quickcheck;

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a set.
/// Returns whether every search agreed with the set.
fn do_ops<K>(ops: &[Op<K>], tree: &mut AnyTree<K>, set: &mut BTreeSet<K>) -> bool
where
    K: Ord + Clone,
{
    let mut agreed = true;
    for op in ops {
        match op {
            Op::Insert(k) => {
                tree.insert(k.clone());
                set.insert(k.clone());
            }
            Op::Remove(k) => {
                tree.remove(k);
                set.remove(k);
            }
            Op::Search(k) => agreed &= tree.search(k) == set.contains(k),
        }
    }

    agreed
}

fn filled(kind: TreeKind, xs: &[i8]) -> AnyTree<i8> {
    let mut tree = AnyTree::new(kind);
    for x in xs {
        tree.insert(*x);
    }
    tree
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    TreeKind::ALL.into_iter().all(|kind| {
        let mut tree = AnyTree::new(kind);
        let mut set = BTreeSet::new();

        do_ops(&ops, &mut tree, &mut set)
            && tree.len() == set.len()
            && tree.keys().into_iter().eq(set.iter())
    })
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    TreeKind::ALL.into_iter().all(|kind| {
        let mut tree = filled(kind, &xs);
        xs.iter().all(|x| tree.search(x))
    })
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let added: HashSet<_> = xs.iter().copied().collect();
    let nots: HashSet<_> = nots.into_iter().collect();

    TreeKind::ALL.into_iter().all(|kind| {
        let mut tree = filled(kind, &xs);
        nots.difference(&added).all(|x| !tree.search(x))
    })
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let deleted: HashSet<_> = deletes.iter().copied().collect();
    let still_present: Vec<_> = xs.iter().copied().filter(|x| !deleted.contains(x)).collect();

    TreeKind::ALL.into_iter().all(|kind| {
        let mut tree = filled(kind, &xs);
        for delete in &deletes {
            tree.remove(delete);
        }

        deletes.iter().all(|x| !tree.search(x)) && still_present.iter().all(|x| tree.search(x))
    })
}

#[quickcheck]
fn insert_twice_is_insert_once(xs: Vec<i8>, x: i8) -> bool {
    TreeKind::ALL.into_iter().all(|kind| {
        let mut tree = filled(kind, &xs);
        tree.insert(x);
        let once = tree.traverse();

        tree.insert(x);
        tree.traverse() == once
    })
}

#[quickcheck]
fn remove_twice_is_remove_once(xs: Vec<i8>, x: i8) -> bool {
    TreeKind::ALL.into_iter().all(|kind| {
        let mut tree = filled(kind, &xs);
        tree.remove(&x);
        let once = tree.traverse();

        tree.remove(&x);
        tree.traverse() == once
    })
}

#[quickcheck]
fn search_keeps_the_same_keys(xs: Vec<i8>, searches: Vec<i8>) -> bool {
    TreeKind::ALL.into_iter().all(|kind| {
        let mut tree = filled(kind, &xs);
        let before: Vec<_> = tree.keys().into_iter().copied().collect();
        for key in &searches {
            tree.search(key);
        }

        tree.keys().into_iter().copied().eq(before)
    })
}
