use balanced_bst::{
    AnyTree, Augment, AvlTree, Color, OrderedTree, RedBlackTree, ScapegoatTree, SplayTree,
    TreeKind,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::structure::assert_well_formed;

#[test]
fn avl_mixed_inserts_stay_balanced() {
    let mut tree = AvlTree::new();
    for key in [5, 3, 8, 1, 4, 7, 9] {
        tree.insert(key);
        assert_well_formed(TreeKind::Avl, &tree.traverse());
    }

    assert_eq!(tree.height(), 3);
    assert_eq!(tree.traverse()[0].key, 5);
}

#[test]
fn red_black_remove_red_leaf() {
    let mut tree = RedBlackTree::new();
    for key in [10, 20, 30] {
        tree.insert(key);
    }
    tree.remove(&10);

    let records = tree.traverse();
    assert_well_formed(TreeKind::RedBlack, &records);
    let shape: Vec<_> = records.iter().map(|r| (r.key, r.augment)).collect();
    assert_eq!(
        shape,
        [
            (20, Augment::Color(Color::Black)),
            (30, Augment::Color(Color::Red)),
        ]
    );
}

#[test]
fn splay_insert_becomes_root() {
    let mut tree = SplayTree::new();
    for key in 1..=3 {
        tree.insert(key);
        assert_eq!(tree.traverse()[0].key, key);
    }
}

#[test]
fn scapegoat_ascending_inserts() {
    let mut tree = ScapegoatTree::new();
    for key in 1..=100 {
        tree.insert(key);
    }

    assert!(tree.height() <= 12, "height {}", tree.height());
    assert_well_formed(TreeKind::Scapegoat, &tree.traverse());
}

/// `count` distinct even keys in random order.
fn shuffled_keys(rng: &mut StdRng, count: i32) -> Vec<i32> {
    let mut keys: Vec<_> = (0..count).map(|k| k * 2).collect();
    keys.shuffle(rng);
    keys
}

#[test]
fn insert_then_remove_everything() {
    let mut rng = StdRng::seed_from_u64(42);
    for kind in TreeKind::ALL {
        let keys = shuffled_keys(&mut rng, 1000);
        let mut tree = AnyTree::new(kind);
        for key in &keys {
            tree.insert(*key);
        }
        assert_eq!(tree.len(), 1000, "{kind}");

        let mut order = keys.clone();
        order.shuffle(&mut rng);
        for key in &order {
            tree.remove(key);
        }

        assert!(tree.is_empty(), "{kind}");
        assert_eq!(tree.height(), 0, "{kind}");
        assert!(keys.iter().all(|key| !tree.search(key)), "{kind}");
    }
}

#[test]
fn round_trip_membership() {
    let mut rng = StdRng::seed_from_u64(7);
    for kind in TreeKind::ALL {
        let keys = shuffled_keys(&mut rng, 5000);
        let mut tree = AnyTree::new(kind);
        for key in &keys {
            tree.insert(*key);
        }

        assert!(keys.iter().all(|key| tree.search(key)), "{kind}");
        assert!((0..5000).all(|k| !tree.search(&(k * 2 + 1))), "{kind}");
        assert!(!tree.search(&-2), "{kind}");
        assert_eq!(tree.len(), 5000, "{kind}");
    }
}

#[test]
fn sorted_inserts_do_not_degenerate() {
    for kind in TreeKind::ALL {
        let mut tree = AnyTree::new(kind);
        for key in 0..100_000 {
            tree.insert(key);
        }
        assert_eq!(tree.len(), 100_000);

        // Splay trees get no height guarantee, but searching every key must not overflow the
        // stack or lose anything.
        if kind != TreeKind::Splay {
            assert!(tree.height() <= 40, "{kind} height {}", tree.height());
        }
        assert!((0..100_000).step_by(997).all(|key| tree.search(&key)), "{kind}");
    }
}
