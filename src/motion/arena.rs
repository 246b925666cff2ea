//! Box Arena
//!
//! A minimal [`Collider`]: one box-shaped body inside an axis-aligned
//! rectangular room. The floor, ceiling and both walls are the room's
//! sides. There are no slopes and no interior geometry.
//!
//! Each axis of a move is clamped against the room on its own, from the
//! same start position; blocking on one axis never shortens the other. A
//! side counts as touched when the body ends within `skin_width` of it and
//! the move was not heading away from it, so a body held still against a
//! wall keeps reporting the wall.

use crate::core::vec2::Vec2;
use crate::motion::contact::{Collider, ContactReport};

/// Default contact tolerance.
pub const DEFAULT_SKIN_WIDTH: f32 = 0.015;

/// Rectangular room with a single box body.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxArena {
    /// Room lower-left corner
    room_min: Vec2,
    /// Room upper-right corner
    room_max: Vec2,
    /// Body half width and half height
    half_extents: Vec2,
    /// Body center
    position: Vec2,
    skin_width: f32,
}

impl BoxArena {
    /// Room spanning `[0, width] x [0, height]` with the body resting on
    /// the floor at the horizontal center.
    pub fn new(width: f32, height: f32, half_extents: Vec2) -> Self {
        let mut arena = Self {
            room_min: Vec2::ZERO,
            room_max: Vec2::new(width, height),
            half_extents: half_extents.abs(),
            position: Vec2::ZERO,
            skin_width: DEFAULT_SKIN_WIDTH,
        };
        arena.set_position(Vec2::new(width * 0.5, 0.0));
        arena
    }

    /// Override the contact tolerance.
    pub fn with_skin_width(mut self, skin_width: f32) -> Self {
        self.skin_width = skin_width.max(0.0);
        self
    }

    /// Body center.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Teleport the body. The position is clamped inside the room.
    pub fn set_position(&mut self, position: Vec2) {
        let (lo, hi) = self.center_bounds();
        self.position = Vec2::new(
            position.x.max(lo.x).min(hi.x),
            position.y.max(lo.y).min(hi.y),
        );
    }

    /// Room corners (lower-left, upper-right).
    pub fn room(&self) -> (Vec2, Vec2) {
        (self.room_min, self.room_max)
    }

    /// Range the body center can occupy.
    fn center_bounds(&self) -> (Vec2, Vec2) {
        (self.room_min + self.half_extents, self.room_max - self.half_extents)
    }

    fn touching(gap: f32, delta: f32, toward_positive: bool, skin: f32) -> bool {
        let heading_away = if toward_positive { delta < 0.0 } else { delta > 0.0 };
        gap <= skin && !heading_away
    }
}

impl Collider for BoxArena {
    fn move_body(&mut self, displacement: Vec2, _input: Vec2) -> ContactReport {
        let (lo, hi) = self.center_bounds();

        // Axes clamp independently
        let x = (self.position.x + displacement.x).max(lo.x).min(hi.x);
        let y = (self.position.y + displacement.y).max(lo.y).min(hi.y);
        self.position = Vec2::new(x, y);

        let skin = self.skin_width;
        ContactReport {
            above: Self::touching(hi.y - y, displacement.y, true, skin),
            below: Self::touching(y - lo.y, displacement.y, false, skin),
            left: Self::touching(x - lo.x, displacement.x, false, skin),
            right: Self::touching(hi.x - x, displacement.x, true, skin),
            ..ContactReport::AIRBORNE
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
