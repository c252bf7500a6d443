//! A single hex cell and its content category.

use hv_core::Vec2;

use crate::Axial;

/// What a cell holds.  Drives its fill colour and whether bees leave dusty
/// footprints after walking over it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentType {
    #[default]
    Empty,
    Pollen,
    HoneyFilled,
    HoneyCapped,
    BroodCell,
    BroodCapped,
    BroodHatching,
}

impl ContentType {
    /// Pollen and honey stick to feet.
    #[inline]
    pub fn is_dusty(self) -> bool {
        matches!(self, ContentType::Pollen | ContentType::HoneyFilled | ContentType::HoneyCapped)
    }

    #[inline]
    pub fn is_honey(self) -> bool {
        matches!(self, ContentType::HoneyFilled | ContentType::HoneyCapped)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Empty         => "empty",
            ContentType::Pollen        => "pollen",
            ContentType::HoneyFilled   => "honey-filled",
            ContentType::HoneyCapped   => "honey-capped",
            ContentType::BroodCell     => "brood-cell",
            ContentType::BroodCapped   => "brood-capped",
            ContentType::BroodHatching => "brood-hatching",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One grid cell.
///
/// `pos` is fixed at construction from `axial` and the grid radius; nothing
/// else writes it.  The remaining fields belong to whichever cluster
/// currently owns the cell and go back to their defaults on [`Cell::reset`].
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub axial: Axial,
    pos: Vec2,
    pub active: bool,
    pub content: ContentType,
    /// In `[0, 1]`.  Always 0 while inactive.
    pub opacity: f32,
    /// 0 = cluster body, 1 or 2 = generated outline ring.
    pub border_ring: u8,
    /// Distance-from-boundary band, 0 (unset) to 4.
    pub edge_depth: u8,
    /// Hex distance from the owning cluster's seed.
    pub ring_distance: u32,
    /// Frames since activation.
    pub age: u32,
}

impl Cell {
    pub fn new(axial: Axial, radius: f32) -> Self {
        Self {
            axial,
            pos: axial.to_canvas(radius),
            active: false,
            content: ContentType::Empty,
            opacity: 0.0,
            border_ring: 0,
            edge_depth: 0,
            ring_distance: 0,
            age: 0,
        }
    }

    /// Canvas centre.
    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Recompute `pos` for a grid of radius `radius`.
    pub(crate) fn rebase(&mut self, radius: f32) {
        self.pos = self.axial.to_canvas(radius);
    }

    #[inline]
    pub fn is_border(&self) -> bool {
        self.border_ring > 0
    }

    /// Claim the cell for a cluster: active, invisible, blank.
    pub fn activate(&mut self, border_ring: u8) {
        self.active = true;
        self.opacity = 0.0;
        self.content = ContentType::Empty;
        self.border_ring = border_ring;
        self.edge_depth = 0;
        self.ring_distance = 0;
        self.age = 0;
    }

    /// Back to the inactive default state.
    pub fn reset(&mut self) {
        self.active = false;
        self.opacity = 0.0;
        self.content = ContentType::Empty;
        self.border_ring = 0;
        self.edge_depth = 0;
        self.ring_distance = 0;
        self.age = 0;
    }
}
