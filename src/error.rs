use std::fmt;

use thiserror::Error;

use crate::diff::Path;

/// Which tree of a comparison a value was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Internal failures while describing a difference.
///
/// A mismatch between two documents is not an error; these indicate that a
/// difference record and the trees it was computed from disagree.
#[derive(Debug, Error)]
pub enum HtmlCompareError {
    #[error("no {side} node at {path} to describe")]
    UnresolvedNode { side: Side, path: Path },
    #[error("cannot describe {side} {kind} at {path}")]
    UndescribableValue {
        side: Side,
        kind: &'static str,
        path: Path,
    },
}
