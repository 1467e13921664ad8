use std::fmt;

use crate::TreeKind;

/// Why a tree couldn't be constructed. Tree operations themselves never fail.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// The string didn't name any [`TreeKind`].
    UnknownKind(String),
    /// The balance parameter is outside the range `kind` accepts. Trees that take no parameter
    /// reject every `alpha`.
    AlphaOutOfRange {
        /// The tree that was being built.
        kind: TreeKind,
        /// The rejected parameter.
        alpha: f64,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind(kind) => write!(f, "Unsupported tree type: {kind}"),
            Self::AlphaOutOfRange { kind, alpha } => match kind.alpha_range() {
                Some((low, high)) => write!(
                    f,
                    "{} needs alpha in ({low}, {high}), got {alpha}",
                    kind.name()
                ),
                None => write!(f, "{} takes no alpha, got {alpha}", kind.name()),
            },
        }
    }
}

impl std::error::Error for Error {}
