use std::ops::Index;

use tracing::{debug, trace, warn};

use crate::list::List;
use crate::{sizing, QuadtreeError, QuadtreeVisitor, Subdivide};

/// Cells whose quads disagree with them in area by more than this fraction
/// are rejected.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

const MAX_RESERVE: usize = 1 << 20;

#[derive(Copy, Clone, Debug, Default)]
struct NodeData {
    depth: usize,
    idx: usize,
}

/// Depth-indexed cells of a [`Quadtree`].
///
/// Level `d` holds `4^d` cells. The four children of cell `i` at level `d`
/// sit at `4 * i .. 4 * i + 4` on level `d + 1`, in split order.
#[derive(Clone, Debug, PartialEq)]
pub struct Quadrants<B> {
    levels: Vec<Vec<B>>,
}

impl<B> Quadrants<B> {
    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn at_depth(&self, depth: usize) -> Option<&[B]> {
        self.levels.get(depth).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[B])> + '_ {
        self.levels
            .iter()
            .enumerate()
            .map(|(depth, level)| (depth, level.as_slice()))
    }

    /// Number of cells over all levels.
    pub fn total(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }
}

impl<B> Index<usize> for Quadrants<B> {
    type Output = [B];

    fn index(&self, depth: usize) -> &[B] {
        &self.levels[depth]
    }
}

/// Eagerly subdivided quadtree.
///
/// Construction splits the root down to `depth - 1` and freezes the result.
/// Generation is the expensive part; reading the levels back is cheap.
///
/// ```
/// use quadtree_partition::{BoundingBox, Quadtree};
///
/// let qt = Quadtree::new(BoundingBox::new(2.0, 9.0, 1.0, 7.0), 2).unwrap();
/// assert_eq!(qt.quadrants()[0].len(), 1);
/// assert_eq!(qt.quadrants()[1].len(), 4);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Quadtree<B> {
    quads: Quadrants<B>,
    depth: usize,
}

impl<B: Subdivide> Quadtree<B> {
    pub fn new(bbox: B, depth: usize) -> Result<Self, QuadtreeError> {
        Self::with_tolerance(bbox, depth, DEFAULT_TOLERANCE)
    }

    /// Builds a tree deep enough that its leaf level has at least `cells`
    /// cells (exactly [`at_least(cells)`](crate::at_least) of them).
    pub fn with_leaf_count(bbox: B, cells: u64) -> Result<Self, QuadtreeError> {
        let level = sizing::level(cells)?;
        Self::new(bbox, level as usize + 1)
    }

    /// Like [`Quadtree::new`], with `tolerance` as the relative area mismatch
    /// allowed between a cell and the sum of its quads.
    pub fn with_tolerance(bbox: B, depth: usize, tolerance: f64) -> Result<Self, QuadtreeError> {
        if depth < 1 {
            return Err(QuadtreeError::InvalidDepth(depth));
        }
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(QuadtreeError::InvalidTolerance(tolerance));
        }

        debug!(depth, "building quadtree");
        let mut levels: Vec<Vec<B>> = (0..depth)
            .map(|d| {
                // 4^d up front for small levels, larger ones grow on demand.
                let cap = 4usize.checked_pow(d as u32).unwrap_or(usize::MAX);
                Vec::with_capacity(cap.min(MAX_RESERVE))
            })
            .collect();
        levels[0].push(bbox);

        let mut to_process = List::<NodeData>::with_capacity(3 * depth + 1);
        to_process.push(NodeData { depth: 0, idx: 0 });

        while to_process.size() > 0 {
            let nd_data = to_process.pop();
            let child_depth = nd_data.depth + 1;

            // Base case: the parent is on the deepest level.
            if child_depth == depth {
                continue;
            }

            let parent = &levels[nd_data.depth][nd_data.idx];
            let quads = parent.quads();
            Self::check_split(parent, &quads, nd_data, tolerance)?;
            trace!(depth = nd_data.depth, idx = nd_data.idx, "split cell");

            let fc = levels[child_depth].len();
            levels[child_depth].extend(quads);

            // Reversed, so the first quad is expanded next.
            for i in (0..4).rev() {
                to_process.push(NodeData {
                    depth: child_depth,
                    idx: fc + i,
                });
            }
        }

        let quads = Quadrants { levels };
        debug!(depth, cells = quads.total(), "quadtree built");
        Ok(Self { quads, depth })
    }

    fn check_split(
        parent: &B,
        quads: &[B],
        at: NodeData,
        tolerance: f64,
    ) -> Result<(), QuadtreeError> {
        if quads.len() != 4 {
            let count = quads.len();
            warn!(depth = at.depth, idx = at.idx, count, "split did not yield four quads");
            return Err(QuadtreeError::MalformedSplitCount {
                depth: at.depth,
                index: at.idx,
                count: quads.len(),
            });
        }

        let expected = parent.area();
        let actual: f64 = quads.iter().map(Subdivide::area).sum();
        // Equal infinities match; their difference would be NaN.
        if expected == actual {
            return Ok(());
        }
        let allowed = tolerance * expected.abs().max(actual.abs());
        // Also catches NaN on either side.
        if !((expected - actual).abs() <= allowed) {
            warn!(depth = at.depth, idx = at.idx, expected, actual, "split lost area");
            return Err(QuadtreeError::MalformedSplitArea {
                depth: at.depth,
                index: at.idx,
                expected,
                actual,
            });
        }
        Ok(())
    }
}

impl<B> Quadtree<B> {
    pub fn quadrants(&self) -> &Quadrants<B> {
        &self.quads
    }

    /// Number of populated levels, as requested at construction.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn root(&self) -> &B {
        &self.quads[0][0]
    }

    /// Cells on the deepest level.
    pub fn leaves(&self) -> &[B] {
        &self.quads[self.depth - 1]
    }

    /// The four quads cell `index` at `depth` was split into, or `None` for
    /// leaves and out-of-range cells.
    pub fn children(&self, depth: usize, index: usize) -> Option<&[B]> {
        let level = self.quads.at_depth(depth.checked_add(1)?)?;
        let start = index.checked_mul(4)?;
        level.get(start..start.checked_add(4)?)
    }

    /// The cell that cell `index` at `depth` was split from. `None` for the
    /// root and out-of-range cells.
    pub fn parent(&self, depth: usize, index: usize) -> Option<&B> {
        if depth == 0 || index >= self.quads.at_depth(depth)?.len() {
            return None;
        }
        self.quads.at_depth(depth - 1)?.get(index / 4)
    }

    /// Walks every cell depth first, visiting a cell before its children and
    /// children in split order.
    pub fn traverse<V>(&self, visitor: &mut V)
        where
            V: QuadtreeVisitor<B>,
    {
        let mut to_process = List::<NodeData>::with_capacity(3 * self.depth + 1);
        to_process.push(NodeData { depth: 0, idx: 0 });

        while to_process.size() > 0 {
            let nd_data = to_process.pop();
            let cell = &self.quads[nd_data.depth][nd_data.idx];

            if nd_data.depth + 1 < self.depth {
                visitor.branch(nd_data.depth, nd_data.idx, cell);
                let fc = nd_data.idx * 4;
                for i in (0..4).rev() {
                    to_process.push(NodeData {
                        depth: nd_data.depth + 1,
                        idx: fc + i,
                    });
                }
            } else {
                visitor.leaf(nd_data.depth, nd_data.idx, cell);
            }
        }
    }
}
