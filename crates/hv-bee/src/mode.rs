use std::fmt;

/// Motion state of a bee.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mode {
    #[default]
    Idle,
    /// Stopped by another bee in front.
    Blocked,
    Walk,
    /// Rotating in place.
    Turn,
    /// Wings buzzing on the spot.
    Flutter,
    Takeoff,
    Fly,
    Land,
    /// Orbiting a fixed anchor in the air.
    Hover,
}

impl Mode {
    pub const ALL: [Mode; 9] = [
        Mode::Idle,
        Mode::Blocked,
        Mode::Walk,
        Mode::Turn,
        Mode::Flutter,
        Mode::Takeoff,
        Mode::Fly,
        Mode::Land,
        Mode::Hover,
    ];

    /// States that pin height to zero every frame.
    #[inline]
    pub fn is_grounded(self) -> bool {
        matches!(self, Mode::Idle | Mode::Blocked | Mode::Walk | Mode::Turn | Mode::Flutter)
    }

    /// Entering one of these arms the proximity cooldown.
    #[inline]
    pub fn arms_cooldown(self) -> bool {
        matches!(self, Mode::Flutter | Mode::Takeoff | Mode::Hover | Mode::Land)
    }

    /// Transitional states the hive leaves alone when nudging bees.
    #[inline]
    pub fn is_protected(self) -> bool {
        matches!(self, Mode::Takeoff | Mode::Land | Mode::Hover)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Idle    => "idle",
            Mode::Blocked => "blocked",
            Mode::Walk    => "walk",
            Mode::Turn    => "turn",
            Mode::Flutter => "flutter",
            Mode::Takeoff => "takeoff",
            Mode::Fly     => "fly",
            Mode::Land    => "land",
            Mode::Hover   => "hover",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
