//! Locomotion State
//!
//! Explicit tagged states replacing scattered booleans.
//!
//! Two independent pieces are tracked:
//!
//! - [`Footing`]: what the body stood on after the most recent move. It is
//!   the only part of a [`ContactReport`] retained past the frame it was
//!   produced in.
//! - [`Locomotion`]: the wall-slide machine, decided once per update
//!   before the move.
//!
//! They are separate because a character can be wall sliding (decided
//! before the move) and grounded (reported by the move) at the same time,
//! for example when landing in a corner. A jump pressed in that window
//! applies both the wall jump and the ground jump.

use serde::{Serialize, Deserialize};

use crate::core::vec2::Vec2;
use crate::motion::contact::{ContactReport, WallSide};

// =============================================================================
// FOOTING
// =============================================================================

/// Ground support after the most recent move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Footing {
    /// Nothing below
    #[default]
    Airborne,
    /// Walkable ground below
    Grounded,
    /// Over-steep slope below; the body slides along it
    SlidingSlope {
        /// Slope surface normal (unit length)
        normal: Vec2,
    },
}

impl Footing {
    /// Derive footing from a fresh report.
    pub fn from_report(report: &ContactReport) -> Self {
        if !report.below {
            Footing::Airborne
        } else if report.sliding_down_max_slope {
            Footing::SlidingSlope {
                normal: report.slope_normal,
            }
        } else {
            Footing::Grounded
        }
    }

    /// True for any ground contact, walkable or not.
    #[inline]
    pub fn is_below(self) -> bool {
        !matches!(self, Footing::Airborne)
    }

    pub(crate) fn tag(self) -> u8 {
        match self {
            Footing::Airborne => 0,
            Footing::Grounded => 1,
            Footing::SlidingSlope { .. } => 2,
        }
    }
}

// =============================================================================
// WALL SLIDING
// =============================================================================

/// Wall-slide state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locomotion {
    /// Not sliding on a wall
    #[default]
    Free,
    /// Sliding down a wall on `wall`
    WallSliding {
        /// Wall being slid on
        wall: WallSide,
    },
}

impl Locomotion {
    /// Wall being slid on, if any.
    #[inline]
    pub fn wall(self) -> Option<WallSide> {
        match self {
            Locomotion::WallSliding { wall } => Some(wall),
            Locomotion::Free => None,
        }
    }

    pub(crate) fn tag(self) -> u8 {
        match self {
            Locomotion::Free => 0,
            Locomotion::WallSliding { wall } => wall.tag(),
        }
    }
}

/// Countdown pinning a wall-sliding body to its wall.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WallStick {
    /// Seconds of input away from the wall left before detaching.
    /// Zero or less means unarmed.
    pub time_to_unstick: f32,
}

impl WallStick {
    /// True while the horizontal clamp applies.
    #[inline]
    pub fn is_armed(self) -> bool {
        self.time_to_unstick > 0.0
    }
}

// =============================================================================
// SUMMARY
// =============================================================================

/// Coarse state for animation and UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionState {
    /// On the ground (walkable or steep)
    Grounded,
    /// In the air, not on a wall
    Airborne,
    /// Sliding down a wall
    WallSliding,
}

impl MotionState {
    /// Combine both trackers. Wall sliding takes precedence.
    pub fn summarize(locomotion: Locomotion, footing: Footing) -> Self {
        match (locomotion, footing) {
            (Locomotion::WallSliding { .. }, _) => MotionState::WallSliding,
            (Locomotion::Free, Footing::Airborne) => MotionState::Airborne,
            (Locomotion::Free, _) => MotionState::Grounded,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
