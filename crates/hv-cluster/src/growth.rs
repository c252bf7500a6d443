//! Turning a seed cell into a finished cluster shape.
//!
//! Activation runs these steps in order:
//!
//! 1. [`grow`]: probabilistic breadth-first expansion from the seed.
//! 2. [`fill_holes`]: claim inactive cells fully enclosed by the region.
//! 3. [`add_outline_ring`]: once per outline ring, claim the inactive cells
//!    touching the cluster and tag them with the ring index.
//! 4. [`tag_edge_depths`]: distance-from-boundary bands 1..=4.
//! 5. [`assign_ring_distances`]: hex distance to the seed.
//! 6. [`assign_content`]: content category by edge depth.
//!
//! Every function takes the cluster's cell list and mutates the grid in place.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use hv_core::{ContentWeights, SimRng};
use hv_grid::{Axial, ContentType, HexGrid};

/// Deepest edge band computed; anything deeper stays at 0 and counts as core.
pub const MAX_EDGE_DEPTH: u8 = 4;

/// Breadth-first growth from `seed`.
///
/// A neighbour is skipped if it is missing from the grid, already visited,
/// or already active.  Otherwise it joins with probability
/// `max(min_p, 1 - falloff · distance(seed, neighbour))`.  Growth stops at
/// `target` cells or when the queue empties.  Every returned cell is active
/// with opacity 0.  The seed must exist and be inactive.
pub fn grow(
    grid:    &mut HexGrid,
    seed:    Axial,
    target:  usize,
    min_p:   f32,
    falloff: f32,
    rng:     &mut SimRng,
) -> Vec<Axial> {
    let mut visited: FxHashSet<Axial> = FxHashSet::default();
    let mut order = vec![seed];
    let mut queue = VecDeque::from([seed]);
    visited.insert(seed);

    'outer: while let Some(current) = queue.pop_front() {
        for n in current.neighbors() {
            if visited.len() >= target {
                break 'outer;
            }
            if visited.contains(&n) {
                continue;
            }
            match grid.get(n) {
                Some(cell) if !cell.active => {}
                _ => continue,
            }
            let p = (1.0 - falloff * seed.distance(n) as f32).max(min_p);
            if rng.chance(p) {
                visited.insert(n);
                order.push(n);
                queue.push_back(n);
            }
        }
    }

    for &a in &order {
        if let Some(cell) = grid.get_mut(a) {
            cell.activate(0);
        }
    }
    order
}

/// Claim inactive cells that the cluster fully encloses.
///
/// Flood-fills "outside" from every inactive position on the perimeter of
/// the cluster's bounding box (padded by one), moving only through inactive
/// positions inside the box.  Existing inactive cells the flood never reached
/// are holes; they are activated and appended to `cells`.  Returns the number
/// of holes filled.
pub fn fill_holes(grid: &mut HexGrid, cells: &mut Vec<Axial>) -> usize {
    let Some((q0, q1, r0, r1)) = HexGrid::bounds_of(cells, 1) else {
        return 0;
    };
    let in_box = |a: Axial| a.q >= q0 && a.q <= q1 && a.r >= r0 && a.r <= r1;

    let mut outside: FxHashSet<Axial> = FxHashSet::default();
    let mut queue = VecDeque::new();
    for q in q0..=q1 {
        for r in r0..=r1 {
            let a = Axial::new(q, r);
            let on_edge = q == q0 || q == q1 || r == r0 || r == r1;
            if on_edge && !grid.is_active(a) && outside.insert(a) {
                queue.push_back(a);
            }
        }
    }
    while let Some(a) = queue.pop_front() {
        for n in a.neighbors() {
            if in_box(n) && !grid.is_active(n) && outside.insert(n) {
                queue.push_back(n);
            }
        }
    }

    let mut filled = 0;
    for q in q0..=q1 {
        for r in r0..=r1 {
            let a = Axial::new(q, r);
            if outside.contains(&a) {
                continue;
            }
            if let Some(cell) = grid.get_mut(a) {
                if !cell.active {
                    cell.activate(0);
                    cells.push(a);
                    filled += 1;
                }
            }
        }
    }
    filled
}

/// Claim every inactive cell adjacent to the cluster as outline ring `ring`.
///
/// Candidates are collected before any is activated, so one pass adds
/// exactly one ring.  Returns the number of cells added.
pub fn add_outline_ring(grid: &mut HexGrid, cells: &mut Vec<Axial>, ring: u8) -> usize {
    let Some((q0, q1, r0, r1)) = HexGrid::bounds_of(cells, 2) else {
        return 0;
    };
    let members: FxHashSet<Axial> = cells.iter().copied().collect();

    let mut ring_cells = Vec::new();
    for q in q0..=q1 {
        for r in r0..=r1 {
            let a = Axial::new(q, r);
            let free = grid.get(a).is_some_and(|c| !c.active);
            if free && a.neighbors().iter().any(|n| members.contains(n)) {
                ring_cells.push(a);
            }
        }
    }

    for &a in &ring_cells {
        if let Some(cell) = grid.get_mut(a) {
            cell.activate(ring);
        }
    }
    let added = ring_cells.len();
    cells.extend(ring_cells);
    added
}

/// Tag body cells with their distance-from-boundary band.
///
/// Depth 1: any neighbour is inactive (or missing) or is a border cell.
/// Depth `d` in 2..=4: still untagged and next to a depth `d - 1` cell.
/// Border cells are never tagged.
pub fn tag_edge_depths(grid: &mut HexGrid, cells: &[Axial]) {
    let members: FxHashSet<Axial> = cells.iter().copied().collect();
    let body: Vec<Axial> = cells
        .iter()
        .copied()
        .filter(|&a| grid.get(a).is_some_and(|c| !c.is_border()))
        .collect();

    let rim: Vec<Axial> = body
        .iter()
        .copied()
        .filter(|a| {
            a.neighbors().iter().any(|&n| match grid.get(n) {
                Some(c) => !c.active || (members.contains(&n) && c.is_border()),
                None => true,
            })
        })
        .collect();
    for a in rim {
        if let Some(cell) = grid.get_mut(a) {
            cell.edge_depth = 1;
        }
    }

    for depth in 2..=MAX_EDGE_DEPTH {
        let band: Vec<Axial> = body
            .iter()
            .copied()
            .filter(|&a| grid.get(a).is_some_and(|c| c.edge_depth == 0))
            .filter(|a| {
                a.neighbors().iter().any(|n| {
                    members.contains(n) && grid.get(*n).is_some_and(|c| c.edge_depth == depth - 1)
                })
            })
            .collect();
        for a in band {
            if let Some(cell) = grid.get_mut(a) {
                cell.edge_depth = depth;
            }
        }
    }
}

/// Write each cell's hex distance to `seed`; return the largest
/// `ring_distance + border_ring` in the cluster.
pub fn assign_ring_distances(grid: &mut HexGrid, cells: &[Axial], seed: Axial) -> u32 {
    let mut max_ring = 0;
    for &a in cells {
        if let Some(cell) = grid.get_mut(a) {
            cell.ring_distance = seed.distance(a);
            max_ring = max_ring.max(cell.ring_distance + cell.border_ring as u32);
        }
    }
    max_ring
}

/// Fill body cells with content by edge depth; the seed is always
/// brood-capped and border cells stay empty.
pub fn assign_content(
    grid:    &mut HexGrid,
    cells:   &[Axial],
    seed:    Axial,
    weights: &ContentWeights,
    rng:     &mut SimRng,
) {
    for &a in cells {
        let Some(cell) = grid.get_mut(a) else { continue };
        if cell.is_border() {
            continue;
        }
        cell.content = if a == seed {
            ContentType::BroodCapped
        } else {
            pick_content(cell.edge_depth, weights, rng.random::<f32>())
        };
    }
}

/// Content for a body cell at `edge_depth`, given a uniform roll in `[0, 1)`.
pub fn pick_content(edge_depth: u8, w: &ContentWeights, roll: f32) -> ContentType {
    match edge_depth {
        1 | 2 => {
            if roll < w.rim_empty {
                ContentType::Empty
            } else if roll < w.rim_empty + w.rim_honey_filled {
                ContentType::HoneyFilled
            } else {
                ContentType::HoneyCapped
            }
        }
        3 => {
            if roll < w.middle_pollen {
                ContentType::Pollen
            } else {
                ContentType::Empty
            }
        }
        _ => {
            if roll < w.core_hatching {
                ContentType::BroodHatching
            } else if roll < w.core_hatching + w.core_empty {
                ContentType::Empty
            } else if roll < w.core_hatching + w.core_empty + w.core_brood_cell {
                ContentType::BroodCell
            } else {
                ContentType::BroodCapped
            }
        }
    }
}
