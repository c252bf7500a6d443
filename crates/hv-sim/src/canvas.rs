//! The drawing surface the host provides.

use hv_bee::{Bee, Footprint};
use hv_grid::Cell;

/// A 2-D surface in device-independent pixels, origin top-left.
///
/// The hive calls these in a fixed order each render: [`clear`], every grid
/// cell, every live footprint, then bees from lowest to highest.  How a
/// cell, print or bee looks is entirely up to the implementor.
///
/// [`clear`]: Canvas::clear
pub trait Canvas {
    fn clear(&mut self);

    /// `radius` is the grid's hex radius.
    fn fill_cell(&mut self, cell: &Cell, radius: f32);

    fn draw_footprint(&mut self, print: &Footprint);

    fn draw_bee(&mut self, bee: &Bee);
}
