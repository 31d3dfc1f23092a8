/// A region that can split itself into four quadrants.
///
/// `quads` must return exactly four values that tile `self` with no gaps or
/// overlaps. The order they come back in is the order they are stored in a
/// [`Quadtree`](crate::Quadtree) level. Payload data attached to a region
/// lives on the implementor, which decides how it is handed to the quads.
pub trait Subdivide: Sized {
    fn quads(&self) -> Vec<Self>;

    fn area(&self) -> f64;
}

/// Axis-aligned rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn center_x(&self) -> f64 {
        self.min_x / 2.0 + self.max_x / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f64 {
        self.min_y / 2.0 + self.max_y / 2.0
    }
}

impl Subdivide for BoundingBox {
    /// Splits at the centre. Order: top-left, top-right, bottom-left,
    /// bottom-right, where "top" is the `min_y` half.
    fn quads(&self) -> Vec<Self> {
        let cx = self.center_x();
        let cy = self.center_y();
        vec![
            Self::new(self.min_x, cx, self.min_y, cy),
            Self::new(cx, self.max_x, self.min_y, cy),
            Self::new(self.min_x, cx, cy, self.max_y),
            Self::new(cx, self.max_x, cy, self.max_y),
        ]
    }

    fn area(&self) -> f64 {
        self.width() * self.height()
    }
}
