use thiserror::Error;

/// Errors raised while building a quadtree or sizing one.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum QuadtreeError {
    #[error("depth must be at least 1, got {0}")]
    InvalidDepth(usize),

    #[error("size must be at least 1, got {0}")]
    InvalidSize(u64),

    #[error("no power of four >= {0} fits in a u64")]
    SizeOverflow(u64),

    #[error("area tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),

    #[error("cell {index} at depth {depth} split into {count} quads, expected 4")]
    MalformedSplitCount {
        depth: usize,
        index: usize,
        count: usize,
    },

    #[error("cell {index} at depth {depth} has area {expected}, its quads cover {actual}")]
    MalformedSplitArea {
        depth: usize,
        index: usize,
        expected: f64,
        actual: f64,
    },
}
