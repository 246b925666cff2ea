//! Motion Events
//!
//! Discrete things that happened to the character, for animation, audio
//! and replay comparison. The controller queues them; callers drain the
//! queue with `take_events`.

use serde::{Serialize, Deserialize};
use crate::core::vec2::Vec2;
use crate::motion::contact::WallSide;

/// Which jump fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JumpKind {
    /// Straight up from walkable ground
    Ground,
    /// Along the normal of an over-steep slope
    Slope,
    /// Off a wall while pressing into it
    WallClimb,
    /// Off a wall with no horizontal input
    WallOff,
    /// Off a wall while pressing away from it
    WallLeap,
}

impl JumpKind {
    /// True for the three wall-jump variants.
    pub fn is_wall_jump(self) -> bool {
        matches!(self, JumpKind::WallClimb | JumpKind::WallOff | JumpKind::WallLeap)
    }
}

/// Event payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MotionEventKind {
    /// A jump set the velocity
    Jumped {
        /// Variant that fired
        kind: JumpKind,
        /// Velocity right after the jump
        velocity: Vec2,
    },

    /// Jump released early; upward speed was cut
    JumpCut {
        /// Upward speed before the cut
        from: f32,
        /// Upward speed after the cut
        to: f32,
    },

    /// Started sliding down a wall
    WallSlideStarted {
        /// Wall being slid on
        wall: WallSide,
    },

    /// Stopped sliding down a wall
    WallSlideEnded,

    /// Stick timer ran out; the body may drift off the wall
    WallUnstuck {
        /// Wall released
        wall: WallSide,
    },

    /// Touched ground after being airborne
    Landed {
        /// Downward speed just before the contact correction
        impact_speed: f32,
    },
}

/// A motion event stamped with the frame it happened in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionEvent {
    /// Number of updates completed when the event fired
    pub frame: u64,
    /// Event data
    pub kind: MotionEventKind,
}

impl MotionEvent {
    /// Create a new event.
    pub fn new(frame: u64, kind: MotionEventKind) -> Self {
        Self { frame, kind }
    }

    /// Create jumped event.
    pub fn jumped(frame: u64, kind: JumpKind, velocity: Vec2) -> Self {
        Self::new(frame, MotionEventKind::Jumped { kind, velocity })
    }

    /// Create jump cut event.
    pub fn jump_cut(frame: u64, from: f32, to: f32) -> Self {
        Self::new(frame, MotionEventKind::JumpCut { from, to })
    }

    /// Create wall slide started event.
    pub fn wall_slide_started(frame: u64, wall: WallSide) -> Self {
        Self::new(frame, MotionEventKind::WallSlideStarted { wall })
    }

    /// Create wall slide ended event.
    pub fn wall_slide_ended(frame: u64) -> Self {
        Self::new(frame, MotionEventKind::WallSlideEnded)
    }

    /// Create wall unstuck event.
    pub fn wall_unstuck(frame: u64, wall: WallSide) -> Self {
        Self::new(frame, MotionEventKind::WallUnstuck { wall })
    }

    /// Create landed event.
    pub fn landed(frame: u64, impact_speed: f32) -> Self {
        Self::new(frame, MotionEventKind::Landed { impact_speed })
    }

    /// Jump variant if this is a jump event.
    pub fn jump_kind(&self) -> Option<JumpKind> {
        match self.kind {
            MotionEventKind::Jumped { kind, .. } => Some(kind),
            _ => None,
        }
    }
}
