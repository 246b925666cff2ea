//! Input Capture and Replay
//!
//! Per-frame input for one character and a delta-compressed recording
//! of it. Replaying a recording through the same collider reproduces the
//! same controller state bit for bit.

use serde::{Serialize, Deserialize};
use crate::core::hash::{StateHash, StateHasher};
use crate::core::vec2::Vec2;

// =============================================================================
// INPUT TYPES
// =============================================================================

/// Input state for a single frame.
///
/// Jump edges are flags because press and release are events, not levels:
/// a frame may carry a press, a release, or both (tap within one frame).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Horizontal direction: -1 (left) to +1 (right)
    pub move_x: f32,

    /// Vertical direction: -1 (down) to +1 (up)
    pub move_y: f32,

    /// Edge flags (packed bits):
    /// - Bit 0: Jump pressed this frame
    /// - Bit 1: Jump released this frame
    /// - Bit 2-7: Reserved
    pub flags: u8,
}

impl InputFrame {
    /// Jump pressed flag bit
    pub const FLAG_JUMP_DOWN: u8 = 0x01;

    /// Jump released flag bit
    pub const FLAG_JUMP_UP: u8 = 0x02;

    /// Create an idle frame.
    pub const fn new() -> Self {
        Self {
            move_x: 0.0,
            move_y: 0.0,
            flags: 0,
        }
    }

    /// Create input with movement direction.
    pub const fn with_movement(move_x: f32, move_y: f32) -> Self {
        Self {
            move_x,
            move_y,
            flags: 0,
        }
    }

    /// Movement as a vector.
    #[inline]
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.move_x, self.move_y)
    }

    /// Check if jump was pressed this frame.
    #[inline]
    pub fn jump_down(&self) -> bool {
        self.flags & Self::FLAG_JUMP_DOWN != 0
    }

    /// Check if jump was released this frame.
    #[inline]
    pub fn jump_up(&self) -> bool {
        self.flags & Self::FLAG_JUMP_UP != 0
    }

    /// Check if this is an idle frame (no input).
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.move_x == 0.0 && self.move_y == 0.0 && self.flags == 0
    }

    /// Set jump pressed flag.
    #[inline]
    pub fn set_jump_down(&mut self, pressed: bool) {
        if pressed {
            self.flags |= Self::FLAG_JUMP_DOWN;
        } else {
            self.flags &= !Self::FLAG_JUMP_DOWN;
        }
    }

    /// Set jump released flag.
    #[inline]
    pub fn set_jump_up(&mut self, released: bool) {
        if released {
            self.flags |= Self::FLAG_JUMP_UP;
        } else {
            self.flags &= !Self::FLAG_JUMP_UP;
        }
    }

    /// Builder form of [`set_jump_down`](Self::set_jump_down).
    pub fn pressing_jump(mut self) -> Self {
        self.set_jump_down(true);
        self
    }

    /// Builder form of [`set_jump_up`](Self::set_jump_up).
    pub fn releasing_jump(mut self) -> Self {
        self.set_jump_up(true);
        self
    }
}

/// Input that took effect at a given frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputDelta {
    /// Frame when this input state began
    pub frame: u64,
    /// The new input state
    pub input: InputFrame,
}

// =============================================================================
// INPUT LOG
// =============================================================================

/// Recording of one character's input.
///
/// Only frames where input CHANGES are stored. Edge flags make a frame
/// differ from its neighbours, so every press and release is kept.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputLog {
    /// Frames covered: last recorded frame + 1
    frame_count: u64,

    deltas: Vec<InputDelta>,

    /// Movement carried from the last delta (for delta comparison)
    #[serde(skip)]
    last_input: InputFrame,
}

impl InputLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            deltas: Vec::with_capacity(256),
            last_input: InputFrame::new(),
        }
    }

    /// Record input for a frame. Frames must be recorded in order.
    pub fn record(&mut self, frame: u64, input: InputFrame) {
        self.frame_count = frame + 1;

        // Only store if changed; any edge counts as a change
        if input != self.last_input {
            self.deltas.push(InputDelta { frame, input });
            self.last_input = InputFrame::with_movement(input.move_x, input.move_y);
        }
    }

    /// Get input at a specific frame.
    ///
    /// Edge flags only apply on the frame they were recorded for; later
    /// frames see the same movement without the edges.
    pub fn get_input_at(&self, frame: u64) -> InputFrame {
        let idx = self.deltas.partition_point(|d| d.frame <= frame);
        let Some(delta) = idx.checked_sub(1).and_then(|i| self.deltas.get(i)) else {
            return InputFrame::new();
        };

        if delta.frame == frame {
            delta.input
        } else {
            InputFrame::with_movement(delta.input.move_x, delta.input.move_y)
        }
    }

    /// All deltas.
    pub fn deltas(&self) -> &[InputDelta] {
        &self.deltas
    }

    /// Frames covered by the recording, idle ones included.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Number of delta entries.
    pub fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    /// Fingerprint of the recording.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_input_log();
        hasher.update_u64(self.frame_count);
        for delta in &self.deltas {
            hasher.update_u64(delta.frame);
            hasher.update_f32(delta.input.move_x);
            hasher.update_f32(delta.input.move_y);
            hasher.update_u8(delta.input.flags);
        }
        hasher.finalize()
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode from bincode.
    pub fn from_bytes(data: &[u8]) -> Result<Self, bincode::Error> {
        let mut log: Self = bincode::deserialize(data)?;
        if let Some(last) = log.deltas.last() {
            log.last_input = InputFrame::with_movement(last.input.move_x, last.input.move_y);
        }
        Ok(log)
    }

    /// Iterate every frame from 0 to the last one recorded.
    pub fn replay_iter(&self) -> ReplayIterator<'_> {
        ReplayIterator {
            log: self,
            current_frame: 0,
            delta_idx: 0,
            current: InputFrame::new(),
        }
    }
}

/// Iterator for replaying inputs frame-by-frame.
pub struct ReplayIterator<'a> {
    log: &'a InputLog,
    current_frame: u64,
    delta_idx: usize,
    current: InputFrame,
}

impl<'a> Iterator for ReplayIterator<'a> {
    type Item = (u64, InputFrame);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_frame >= self.log.frame_count {
            return None;
        }

        // Edges never carry over to the next frame
        let mut input = InputFrame::with_movement(self.current.move_x, self.current.move_y);

        while let Some(delta) = self.log.deltas.get(self.delta_idx) {
            if delta.frame > self.current_frame {
                break;
            }
            input = delta.input;
            self.current = delta.input;
            self.delta_idx += 1;
        }

        let result = (self.current_frame, input);
        self.current_frame += 1;
        Some(result)
    }
}

// =============================================================================
// TESTS
// =============================================================================
