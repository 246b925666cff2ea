//! Collider Contract
//!
//! The movement core never touches world geometry itself. Each frame it
//! hands a displacement to a [`Collider`], which resolves it against the
//! world and answers with a [`ContactReport`] describing what the body
//! ended up touching.

use serde::{Serialize, Deserialize};
use crate::core::vec2::Vec2;

/// Side of the body a wall is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallSide {
    /// Wall on the left (-X)
    Left,
    /// Wall on the right (+X)
    Right,
}

impl WallSide {
    /// Direction toward the wall: -1 for left, +1 for right.
    #[inline]
    pub fn dir_x(self) -> f32 {
        match self {
            WallSide::Left => -1.0,
            WallSide::Right => 1.0,
        }
    }

    /// Stable numeric tag for hashing.
    #[inline]
    pub(crate) fn tag(self) -> u8 {
        match self {
            WallSide::Left => 1,
            WallSide::Right => 2,
        }
    }
}

/// What the body touched after a move. Produced fresh by every move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactReport {
    /// Touching a ceiling
    pub above: bool,
    /// Touching ground
    pub below: bool,
    /// Touching a wall on the left
    pub left: bool,
    /// Touching a wall on the right
    pub right: bool,
    /// Standing on a slope steeper than the walkable maximum
    pub sliding_down_max_slope: bool,
    /// Unit normal of that slope; meaningful only while `sliding_down_max_slope`
    pub slope_normal: Vec2,
}

impl ContactReport {
    /// Report for a body touching nothing.
    pub const AIRBORNE: Self = Self {
        above: false,
        below: false,
        left: false,
        right: false,
        sliding_down_max_slope: false,
        slope_normal: Vec2::ZERO,
    };

    /// Report for a body resting on flat ground.
    pub const fn grounded() -> Self {
        Self {
            below: true,
            ..Self::AIRBORNE
        }
    }

    /// Report for a body standing on an over-steep slope with the given normal.
    pub const fn on_steep_slope(normal: Vec2) -> Self {
        Self {
            below: true,
            sliding_down_max_slope: true,
            slope_normal: normal,
            ..Self::AIRBORNE
        }
    }

    /// Report for a body touching only a wall on `side`.
    pub const fn against_wall(side: WallSide) -> Self {
        Self {
            left: matches!(side, WallSide::Left),
            right: matches!(side, WallSide::Right),
            ..Self::AIRBORNE
        }
    }

    /// Wall currently touched. Left wins when both sides touch.
    #[inline]
    pub fn wall_side(&self) -> Option<WallSide> {
        if self.left {
            Some(WallSide::Left)
        } else if self.right {
            Some(WallSide::Right)
        } else {
            None
        }
    }

    /// True when touching a ceiling or the ground.
    #[inline]
    pub fn vertical_contact(&self) -> bool {
        self.above || self.below
    }
}

/// Resolves requested displacements against world geometry.
pub trait Collider {
    /// Move the body by up to `displacement`, stopping at obstacles.
    ///
    /// `input` is the character's current directional input; colliders use
    /// it for things like dropping through one-way platforms.
    fn move_body(&mut self, displacement: Vec2, input: Vec2) -> ContactReport;
}

impl<C: Collider + ?Sized> Collider for &mut C {
    fn move_body(&mut self, displacement: Vec2, input: Vec2) -> ContactReport {
        (**self).move_body(displacement, input)
    }
}

// =============================================================================
// TESTS
// =============================================================================
