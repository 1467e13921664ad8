//! Properties every tree must share, run against all of them through `AnyTree`.

mod contract;
mod scenarios;
mod structure;

use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<K> {
    /// Insert the K into the data structure
    Insert(K),
    /// Remove the K from the data structure
    Remove(K),
    /// Look the K up
    Search(K),
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2]).unwrap() {
            0 => Op::Insert(K::arbitrary(g)),
            1 => Op::Remove(K::arbitrary(g)),
            2 => Op::Search(K::arbitrary(g)),
            _ => unreachable!(),
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Op::Insert(k) => Box::new(k.shrink().map(Op::Insert)),
            Op::Remove(k) => Box::new(k.shrink().map(Op::Remove)),
            Op::Search(k) => Box::new(k.shrink().map(Op::Search)),
        }
    }
}
