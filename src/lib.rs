//! Eager quadtree partitioning of a rectangle.
//!
//! A [`Quadtree`] takes a root region and a depth and splits every cell into
//! four, level by level, until `depth` levels exist. The result is a
//! depth-indexed registry ([`Quadrants`]) that is built once and only read
//! afterwards. [`at_least`], [`at_most`] and [`level`] size a tree from a
//! target cell count.

mod bbox;
mod error;
mod list;
mod quadtree;
mod sizing;

/// Callbacks for [`Quadtree::traverse`].
///
/// `index` is the cell's position within its level.
pub trait QuadtreeVisitor<B> {
    fn leaf(&mut self, depth: usize, index: usize, bbox: &B);
    fn branch(&mut self, depth: usize, index: usize, bbox: &B);
}

pub use bbox::*;
pub use error::*;
pub use quadtree::*;
pub use sizing::*;
