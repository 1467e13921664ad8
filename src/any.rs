use std::fmt;
use std::str::FromStr;

use crate::export::NodeRecord;
use crate::{AvlTree, BBAlphaTree, Error, OrderedTree, RedBlackTree, ScapegoatTree, SplayTree};

/// Names one of the trees in this crate.
///
/// Parses from the short names used to request a tree (`"avl"`, `"red_black"`, `"splay"`,
/// `"scapegoat"`, `"bb_alpha"`) as well as from its [`tag`](TreeKind::tag).
///
/// ```
/// use balanced_bst::TreeKind;
///
/// assert_eq!("red_black".parse(), Ok(TreeKind::RedBlack));
/// assert_eq!("red_black_tree".parse(), Ok(TreeKind::RedBlack));
/// assert!("b_tree".parse::<TreeKind>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TreeKind {
    /// [`AvlTree`]
    Avl,
    /// [`RedBlackTree`]
    RedBlack,
    /// [`SplayTree`]
    Splay,
    /// [`ScapegoatTree`]
    Scapegoat,
    /// [`BBAlphaTree`]
    BbAlpha,
}

impl TreeKind {
    /// Every kind, in a fixed order.
    pub const ALL: [TreeKind; 5] = [
        TreeKind::Avl,
        TreeKind::RedBlack,
        TreeKind::Splay,
        TreeKind::Scapegoat,
        TreeKind::BbAlpha,
    ];

    /// The machine-readable tag that labels exported structures.
    pub fn tag(self) -> &'static str {
        match self {
            TreeKind::Avl => "avl_tree",
            TreeKind::RedBlack => "red_black_tree",
            TreeKind::Splay => "splay_tree",
            TreeKind::Scapegoat => "scapegoat",
            TreeKind::BbAlpha => "bb_alpha",
        }
    }

    /// The human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            TreeKind::Avl => "AVL Tree",
            TreeKind::RedBlack => "Red Black Tree",
            TreeKind::Splay => "Splay Tree",
            TreeKind::Scapegoat => "Scapegoat Tree",
            TreeKind::BbAlpha => "BB-alpha Tree",
        }
    }

    /// The open interval the balance parameter must lie in, for the trees that take one.
    pub fn alpha_range(self) -> Option<(f64, f64)> {
        match self {
            TreeKind::Scapegoat => Some((0.5, 1.0)),
            TreeKind::BbAlpha => Some((0.0, 0.5)),
            TreeKind::Avl | TreeKind::RedBlack | TreeKind::Splay => None,
        }
    }

    pub(crate) fn check_alpha(self, alpha: f64) -> Result<(), Error> {
        match self.alpha_range() {
            Some((low, high)) if low < alpha && alpha < high => Ok(()),
            _ => Err(Error::AlphaOutOfRange { kind: self, alpha }),
        }
    }
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TreeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "avl" | "avl_tree" => Ok(TreeKind::Avl),
            "red_black" | "red_black_tree" => Ok(TreeKind::RedBlack),
            "splay" | "splay_tree" => Ok(TreeKind::Splay),
            "scapegoat" => Ok(TreeKind::Scapegoat),
            "bb_alpha" => Ok(TreeKind::BbAlpha),
            _ => Err(Error::UnknownKind(s.to_owned())),
        }
    }
}

/// Any one of the trees in this crate, picked at runtime.
///
/// ```
/// use balanced_bst::{AnyTree, OrderedTree, TreeKind};
///
/// for kind in TreeKind::ALL {
///     let mut tree = AnyTree::new(kind);
///     tree.insert("b");
///     tree.insert("a");
///
///     assert_eq!(tree.kind(), kind);
///     assert_eq!(tree.keys(), vec![&"a", &"b"]);
/// }
/// ```
#[derive(Clone, Debug)]
pub enum AnyTree<T> {
    /// See [`AvlTree`].
    Avl(AvlTree<T>),
    /// See [`RedBlackTree`].
    RedBlack(RedBlackTree<T>),
    /// See [`SplayTree`].
    Splay(SplayTree<T>),
    /// See [`ScapegoatTree`].
    Scapegoat(ScapegoatTree<T>),
    /// See [`BBAlphaTree`].
    BbAlpha(BBAlphaTree<T>),
}

impl<T> AnyTree<T> {
    /// An empty tree of the given kind, with the default balance parameter if it takes one.
    pub fn new(kind: TreeKind) -> Self {
        match kind {
            TreeKind::Avl => AnyTree::Avl(AvlTree::new()),
            TreeKind::RedBlack => AnyTree::RedBlack(RedBlackTree::new()),
            TreeKind::Splay => AnyTree::Splay(SplayTree::new()),
            TreeKind::Scapegoat => AnyTree::Scapegoat(ScapegoatTree::new()),
            TreeKind::BbAlpha => AnyTree::BbAlpha(BBAlphaTree::new()),
        }
    }

    /// An empty tree of the given kind with balance parameter `alpha`. Fails for kinds that take
    /// no parameter and for `alpha` outside [`TreeKind::alpha_range`].
    ///
    /// ```
    /// use balanced_bst::{AnyTree, Error, TreeKind};
    ///
    /// assert!(AnyTree::<u32>::with_alpha(TreeKind::Scapegoat, 0.7).is_ok());
    /// assert_eq!(
    ///     AnyTree::<u32>::with_alpha(TreeKind::Avl, 0.7).unwrap_err(),
    ///     Error::AlphaOutOfRange { kind: TreeKind::Avl, alpha: 0.7 },
    /// );
    /// ```
    pub fn with_alpha(kind: TreeKind, alpha: f64) -> Result<Self, Error> {
        match kind {
            TreeKind::Scapegoat => ScapegoatTree::with_alpha(alpha).map(AnyTree::Scapegoat),
            TreeKind::BbAlpha => BBAlphaTree::with_alpha(alpha).map(AnyTree::BbAlpha),
            TreeKind::Avl | TreeKind::RedBlack | TreeKind::Splay => {
                Err(Error::AlphaOutOfRange { kind, alpha })
            }
        }
    }
}

/// Forwards a method call to whichever tree is inside.
macro_rules! dispatch {
    ($tree:expr, $inner:ident => $call:expr) => {
        match $tree {
            AnyTree::Avl($inner) => $call,
            AnyTree::RedBlack($inner) => $call,
            AnyTree::Splay($inner) => $call,
            AnyTree::Scapegoat($inner) => $call,
            AnyTree::BbAlpha($inner) => $call,
        }
    };
}

impl<T: Ord> OrderedTree<T> for AnyTree<T> {
    fn kind(&self) -> TreeKind {
        dispatch!(self, tree => tree.kind())
    }

    fn insert(&mut self, value: T) {
        dispatch!(self, tree => tree.insert(value))
    }

    fn remove(&mut self, value: &T) {
        dispatch!(self, tree => tree.remove(value))
    }

    fn search(&mut self, value: &T) -> bool {
        dispatch!(self, tree => tree.search(value))
    }

    fn traverse(&self) -> Vec<NodeRecord<T>>
    where
        T: Clone,
    {
        dispatch!(self, tree => tree.traverse())
    }

    fn len(&self) -> usize {
        dispatch!(self, tree => tree.len())
    }

    fn height(&self) -> usize {
        dispatch!(self, tree => tree.height())
    }

    fn keys(&self) -> Vec<&T> {
        dispatch!(self, tree => tree.keys())
    }
}
