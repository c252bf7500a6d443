//! Axial and cube hex coordinates.

use hv_core::Vec2;

const SQRT_3: f32 = 1.732_050_8;

/// The six axial neighbour offsets `(dq, dr)`, clockwise.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

/// Integer axial coordinates: the grid key.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Axial {
    pub q: i32,
    pub r: i32,
}

impl Axial {
    #[inline]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Cube form: `x = r`, `z = q`, `y = -x - z`.
    #[inline]
    pub fn to_cube(self) -> Cube {
        Cube { x: self.r, y: -self.r - self.q, z: self.q }
    }

    /// Hex-step distance between two cells.
    #[inline]
    pub fn distance(self, other: Axial) -> u32 {
        let a = self.to_cube();
        let b = other.to_cube();
        ((a.x - b.x).unsigned_abs() + (a.y - b.y).unsigned_abs() + (a.z - b.z).unsigned_abs()) / 2
    }

    /// The six adjacent coordinates (whether or not they exist in a grid).
    #[inline]
    pub fn neighbors(self) -> [Axial; 6] {
        NEIGHBOR_OFFSETS.map(|(dq, dr)| Axial::new(self.q + dq, self.r + dr))
    }

    /// Canvas position of this cell's centre for radius `s`.
    #[inline]
    pub fn to_canvas(self, s: f32) -> Vec2 {
        Vec2::new(
            s * 2.0 * 0.75 * self.r as f32,
            s * SQRT_3 * (self.q as f32 + self.r as f32 / 2.0),
        )
    }
}

impl std::fmt::Display for Axial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// Integer cube coordinates.  Valid cells satisfy `x + y + z == 0`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Cube {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Cube {
    #[inline]
    pub fn is_valid(self) -> bool {
        self.x + self.y + self.z == 0
    }

    #[inline]
    pub fn to_axial(self) -> Axial {
        Axial::new(self.z, self.x)
    }
}

/// Continuous axial coordinates `(q, r)` of a canvas point.
#[inline]
pub fn canvas_to_fractional(p: Vec2, s: f32) -> (f32, f32) {
    let r = p.x / (1.5 * s);
    let q = p.y / (SQRT_3 * s) - r / 2.0;
    (q, r)
}

/// Snap continuous axial coordinates to the nearest cell.
///
/// Each cube component is rounded on its own, then the one with the largest
/// rounding error is recomputed from the other two so the result lies on the
/// `x + y + z = 0` plane.
pub fn cube_round(q: f32, r: f32) -> Axial {
    let x = r;
    let z = q;
    let y = -x - z;

    let mut rx = x.round();
    let mut ry = y.round();
    let mut rz = z.round();

    let dx = (rx - x).abs();
    let dy = (ry - y).abs();
    let dz = (rz - z).abs();

    if dx > dy && dx > dz {
        rx = -ry - rz;
    } else if dy > dz {
        ry = -rx - rz;
    } else {
        rz = -rx - ry;
    }

    let cube = Cube { x: rx as i32, y: ry as i32, z: rz as i32 };
    debug_assert!(cube.is_valid());
    cube.to_axial()
}
