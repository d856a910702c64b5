use glam::IVec2;

/// A grid coordinate. `x` grows to the right and `y` grows "down" the rows of
/// the cost field.
pub type Point = IVec2;

/// An ordered sequence of points from start to end, inclusive.
pub type Path = Vec<Point>;

/// Offsets for the four orthogonal neighbors, in enumeration order.
pub const ADJACENT_4_WAY: [IVec2; 4] = [
    IVec2::new(0, -1),
    IVec2::new(1, 0),
    IVec2::new(0, 1),
    IVec2::new(-1, 0),
];

/// Anything that can be used as a grid position.
///
/// Lets callers write `grid.cost([3, 4])` or `grid.cost((3, 4))` as well as
/// passing an [IVec2] directly.
pub trait GridPoint: Copy {
    fn to_ivec2(self) -> IVec2;

    /// Manhattan ("taxicab") distance between two points.
    #[inline]
    fn taxi_dist(self, other: impl GridPoint) -> i32 {
        let d = (self.to_ivec2() - other.to_ivec2()).abs();
        d.x + d.y
    }

    /// The four orthogonal neighbors of this point, in [ADJACENT_4_WAY] order.
    /// No bounds checking is done.
    #[inline]
    fn adj_4(self) -> [IVec2; 4] {
        let p = self.to_ivec2();
        ADJACENT_4_WAY.map(|d| p + d)
    }
}

impl GridPoint for IVec2 {
    #[inline]
    fn to_ivec2(self) -> IVec2 {
        self
    }
}

impl GridPoint for [i32; 2] {
    #[inline]
    fn to_ivec2(self) -> IVec2 {
        IVec2::from(self)
    }
}

impl GridPoint for (i32, i32) {
    #[inline]
    fn to_ivec2(self) -> IVec2 {
        IVec2::new(self.0, self.1)
    }
}

/// A heuristic function for pathfinding on a 4-way grid - aka Manhattan Distance.
#[inline]
pub fn manhattan(a: impl GridPoint, b: impl GridPoint) -> f64 {
    a.taxi_dist(b) as f64
}
