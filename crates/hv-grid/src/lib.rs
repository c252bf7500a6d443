//! `hv-grid`: the hexagonal cell grid.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`coords`]  | `Axial`, `Cube`, canvas ↔ axial conversion, cube rounding   |
//! | [`cell`]    | `Cell`, `ContentType`                                       |
//! | [`grid`]    | `HexGrid`: sparse `Axial → Cell` map, nearest-cell query    |
//!
//! # Layout
//!
//! Cells use axial coordinates `(q, r)` with a fixed radius `s`:
//!
//! ```text
//! x = s · 1.5 · r
//! y = s · √3 · (q + r / 2)
//! ```
//!
//! Each `r` is a column; `q` walks down it.

pub mod cell;
pub mod coords;
pub mod grid;


pub use cell::{Cell, ContentType};
pub use coords::{Axial, Cube, NEIGHBOR_OFFSETS, canvas_to_fractional, cube_round};
pub use grid::HexGrid;
