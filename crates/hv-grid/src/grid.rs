//! `HexGrid`: sparse hex cell storage.
//!
//! # Data layout
//!
//! Cells live in an `FxHashMap<Axial, Cell>`: O(1) lookup, insert and
//! delete, and no assumption that the populated region is rectangular in
//! axial space (a canvas-covering grid is a parallelogram clipped to a
//! rectangle).  A dense `Vec<Axial>` of keys, with each key's slot in it,
//! lets [`HexGrid::random_cell`] pick in O(1); deletes swap-remove.
//!
//! # Nearest-cell query
//!
//! [`HexGrid::nearest_cell_to`] converts the point to continuous axial
//! coordinates, cube-rounds it, and compares only that cell and its six
//! neighbours.  [`HexGrid::nearest_cell_linear`] is the O(N) scan kept for
//! cross-checking.

use rustc_hash::FxHashMap;

use hv_core::{SimRng, Vec2};

use crate::{Axial, Cell, canvas_to_fractional, cube_round};

pub struct HexGrid {
    radius: f32,
    cells:  FxHashMap<Axial, Cell>,
    keys:   Vec<Axial>,
    slots:  FxHashMap<Axial, usize>,
}

impl HexGrid {
    /// An empty grid with cell radius `radius`.
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            cells: FxHashMap::default(),
            keys:  Vec::new(),
            slots: FxHashMap::default(),
        }
    }

    fn insert(&mut self, cell: Cell) {
        let a = cell.axial;
        if self.cells.insert(a, cell).is_none() {
            self.slots.insert(a, self.keys.len());
            self.keys.push(a);
        }
    }

    /// One inactive cell per coordinate in `axials`.
    pub fn from_axials(radius: f32, axials: impl IntoIterator<Item = Axial>) -> Self {
        let mut grid = Self::new(radius);
        for a in axials {
            grid.insert(Cell::new(a, radius));
        }
        grid
    }

    /// Every cell whose centre lies on a `width` × `height` canvas, plus one
    /// cell of margin on each side so the edges are never bare.
    pub fn covering(width: f32, height: f32, radius: f32) -> Self {
        let mut grid = Self::new(radius);
        if !(width > 0.0 && height > 0.0 && radius > 0.0) {
            return grid;
        }
        let col_w = 1.5 * radius;
        let row_h = 3f32.sqrt() * radius;

        let r_max = (width / col_w).ceil() as i32 + 1;
        for r in -1..=r_max {
            let q_min = (-1.0 - r as f32 / 2.0).floor() as i32;
            let q_max = (height / row_h - r as f32 / 2.0 + 1.0).ceil() as i32;
            for q in q_min..=q_max {
                let a = Axial::new(q, r);
                let p = a.to_canvas(radius);
                if p.x >= -col_w && p.x <= width + col_w && p.y >= -row_h && p.y <= height + row_h {
                    grid.insert(Cell::new(a, radius));
                }
            }
        }
        grid
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    // ── Map access ────────────────────────────────────────────────────────

    #[inline]
    pub fn get(&self, a: Axial) -> Option<&Cell> {
        self.cells.get(&a)
    }

    #[inline]
    pub fn get_mut(&mut self, a: Axial) -> Option<&mut Cell> {
        self.cells.get_mut(&a)
    }

    #[inline]
    pub fn has(&self, a: Axial) -> bool {
        self.cells.contains_key(&a)
    }

    /// `true` if the cell exists and is active.
    #[inline]
    pub fn is_active(&self, a: Axial) -> bool {
        self.cells.get(&a).is_some_and(|c| c.active)
    }

    /// Insert or replace a cell.  Its canvas position is re-derived from its
    /// axial key and this grid's radius.
    pub fn set(&mut self, mut cell: Cell) {
        cell.rebase(self.radius);
        self.insert(cell);
    }

    /// Remove a cell; `false` if it was not present.
    pub fn delete(&mut self, a: Axial) -> bool {
        if self.cells.remove(&a).is_none() {
            return false;
        }
        if let Some(slot) = self.slots.remove(&a) {
            self.keys.swap_remove(slot);
            if let Some(&moved) = self.keys.get(slot) {
                self.slots.insert(moved, slot);
            }
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cell> + '_ {
        self.cells.values_mut()
    }

    pub fn active_count(&self) -> usize {
        self.cells.values().filter(|c| c.active).count()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Axial key of the cell whose hexagon contains `p` (it may not exist).
    #[inline]
    pub fn axial_at(&self, p: Vec2) -> Axial {
        let (q, r) = canvas_to_fractional(p, self.radius);
        cube_round(q, r)
    }

    /// Closest existing cell to `p` and its Euclidean distance.
    ///
    /// Only the rounded cell and its six neighbours are examined.  Returns
    /// `(None, f32::INFINITY)` when none of them exists, i.e. `p` is well
    /// outside the grid.
    pub fn nearest_cell_to(&self, p: Vec2) -> (Option<&Cell>, f32) {
        let centre = self.axial_at(p);
        let candidates = std::iter::once(centre).chain(centre.neighbors());

        let mut best: Option<&Cell> = None;
        let mut best_d2 = f32::INFINITY;
        for a in candidates {
            if let Some(cell) = self.cells.get(&a) {
                let d2 = cell.pos().distance_sq(p);
                if d2 < best_d2 {
                    best_d2 = d2;
                    best = Some(cell);
                }
            }
        }
        (best, best_d2.sqrt())
    }

    /// O(N) nearest-cell scan.
    pub fn nearest_cell_linear(&self, p: Vec2) -> (Option<&Cell>, f32) {
        let mut best: Option<&Cell> = None;
        let mut best_d2 = f32::INFINITY;
        for cell in self.cells.values() {
            let d2 = cell.pos().distance_sq(p);
            if d2 < best_d2 {
                best_d2 = d2;
                best = Some(cell);
            }
        }
        (best, best_d2.sqrt())
    }

    /// A uniformly random cell, or `None` for an empty grid.
    pub fn random_cell(&self, rng: &mut SimRng) -> Option<&Cell> {
        if self.keys.is_empty() {
            return None;
        }
        let a = self.keys[rng.gen_range(0..self.keys.len())];
        self.cells.get(&a)
    }

    /// Axial bounding box `(q_min, q_max, r_min, r_max)` of `cells`, grown by
    /// `pad` on every side.  `None` for an empty input.
    pub fn bounds_of(cells: &[Axial], pad: i32) -> Option<(i32, i32, i32, i32)> {
        let first = cells.first()?;
        let mut b = (first.q, first.q, first.r, first.r);
        for a in &cells[1..] {
            b.0 = b.0.min(a.q);
            b.1 = b.1.max(a.q);
            b.2 = b.2.min(a.r);
            b.3 = b.3.max(a.r);
        }
        Some((b.0 - pad, b.1 + pad, b.2 - pad, b.3 + pad))
    }
}
