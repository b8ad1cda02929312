//! Integer lattice cell coordinates.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A discrete cell on the regular lattice grid.
///
/// Uses `i32` coordinates so the flood fill can grow in every direction from
/// its origin cell `(0, 0, 0)`.
///
/// # Example
///
/// ```
/// use scaffold_types::VoxelCoord;
///
/// let cell = VoxelCoord::new(-2, 0, 5);
/// assert_eq!(cell.x, -2);
/// assert_eq!(cell.chebyshev_distance(VoxelCoord::origin()), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VoxelCoord {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Z coordinate.
    pub z: i32,
}

impl VoxelCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The origin cell `(0, 0, 0)`.
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0, 0, 0)
    }

    /// Returns the 6 face-adjacent cells (`±x`, `±y`, `±z`).
    ///
    /// The order is fixed: `+x, -x, +y, -y, +z, -z`. Flood fills rely on it
    /// for deterministic node numbering.
    ///
    /// # Example
    ///
    /// ```
    /// use scaffold_types::VoxelCoord;
    ///
    /// let neighbors = VoxelCoord::origin().face_neighbors();
    /// assert_eq!(neighbors[0], VoxelCoord::new(1, 0, 0));
    /// assert_eq!(neighbors[5], VoxelCoord::new(0, 0, -1));
    /// ```
    #[must_use]
    pub const fn face_neighbors(self) -> [Self; 6] {
        [
            Self::new(self.x.wrapping_add(1), self.y, self.z),
            Self::new(self.x.wrapping_sub(1), self.y, self.z),
            Self::new(self.x, self.y.wrapping_add(1), self.z),
            Self::new(self.x, self.y.wrapping_sub(1), self.z),
            Self::new(self.x, self.y, self.z.wrapping_add(1)),
            Self::new(self.x, self.y, self.z.wrapping_sub(1)),
        ]
    }

    /// Chebyshev distance: the largest per-axis difference.
    ///
    /// # Example
    ///
    /// ```
    /// use scaffold_types::VoxelCoord;
    ///
    /// let a = VoxelCoord::new(0, 0, 0);
    /// let b = VoxelCoord::new(3, -4, 2);
    /// assert_eq!(a.chebyshev_distance(b), 4);
    /// ```
    #[must_use]
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        let dz = self.z.abs_diff(other.z);
        dx.max(dy).max(dz)
    }

    /// World-space position of this cell for a grid anchored at `origin`
    /// with the given `spacing`.
    ///
    /// # Example
    ///
    /// ```
    /// use scaffold_types::VoxelCoord;
    /// use nalgebra::Point3;
    ///
    /// let p = VoxelCoord::new(1, 2, -1).to_world(Point3::new(10.0, 0.0, 0.0), 0.5);
    /// assert_eq!(p, Point3::new(10.5, 1.0, -0.5));
    /// ```
    #[must_use]
    pub fn to_world(self, origin: Point3<f64>, spacing: f64) -> Point3<f64> {
        Point3::new(
            f64::from(self.x).mul_add(spacing, origin.x),
            f64::from(self.y).mul_add(spacing, origin.y),
            f64::from(self.z).mul_add(spacing, origin.z),
        )
    }

    /// The cell containing `point` for a grid anchored at `origin` with
    /// cells of edge length `size` (cell `c` covers `[c·size, (c+1)·size)`).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn containing(point: Point3<f64>, origin: Point3<f64>, size: f64) -> Self {
        let relative = point - origin;
        Self::new(
            (relative.x / size).floor() as i32,
            (relative.y / size).floor() as i32,
            (relative.z / size).floor() as i32,
        )
    }
}

impl From<[i32; 3]> for VoxelCoord {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl std::ops::Add for VoxelCoord {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.x.wrapping_add(other.x),
            self.y.wrapping_add(other.y),
            self.z.wrapping_add(other.z),
        )
    }
}

impl std::ops::Sub for VoxelCoord {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(
            self.x.wrapping_sub(other.x),
            self.y.wrapping_sub(other.y),
            self.z.wrapping_sub(other.z),
        )
    }
}
