use hv_core::Vec2;
use hv_grid::Axial;

/// A point a bee steers toward.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Target {
    pub pos:     Vec2,
    /// Cell the target was picked from, if any.
    pub key:     Option<Axial>,
    /// Frames since the target was set.
    pub age:     u32,
    /// Age past which the target is replaced.
    pub max_age: u32,
}

impl Target {
    pub fn new(pos: Vec2, key: Option<Axial>, max_age: u32) -> Self {
        Self { pos, key, age: 0, max_age }
    }

    #[inline]
    pub fn is_stale(&self) -> bool {
        self.age > self.max_age
    }
}
