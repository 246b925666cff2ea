//! Frame Driver
//!
//! Ties an [`InputFrame`] to a [`MovementController`] and a [`Collider`]
//! for one frame, and replays recorded input logs.
//!
//! Order within a frame: directional input, jump press, jump release,
//! then the controller update. Edges are applied before the update so a
//! press and the move it causes land in the same frame.

use tracing::{debug, info};

use crate::core::hash::StateHash;
use crate::motion::config::{ConfigError, MovementConfig};
use crate::motion::contact::{Collider, ContactReport};
use crate::motion::controller::MovementController;
use crate::motion::events::MotionEvent;
use crate::motion::input::{InputFrame, InputLog};

/// Result of a frame.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Contacts produced by this frame's move
    pub report: ContactReport,
    /// Events generated this frame
    pub events: Vec<MotionEvent>,
}

/// Run one frame.
///
/// # Determinism
///
/// Given the same controller state, collider state, input and `dt`, the
/// result is bit-identical: no clocks, no randomness, no unordered maps.
pub fn step<C: Collider + ?Sized>(
    controller: &mut MovementController,
    collider: &mut C,
    input: &InputFrame,
    dt: f32,
) -> TickResult {
    // 1. Directional input
    controller.set_directional_input(input.direction());

    // 2. Jump edges
    if input.jump_down() {
        controller.on_jump_input_down();
    }
    if input.jump_up() {
        controller.on_jump_input_up();
    }

    // 3. Integrate, slide, move, correct
    let report = controller.update(dt, collider);

    TickResult {
        report,
        events: controller.take_events(),
    }
}

/// Outcome of replaying an input log.
#[derive(Debug)]
pub struct ReplayOutcome {
    /// Controller after the last frame
    pub controller: MovementController,
    /// Hash of the final controller state
    pub final_hash: StateHash,
    /// Every event, in order
    pub events: Vec<MotionEvent>,
}

/// Replay a recorded log from a fresh controller.
///
/// Runs exactly `frames` frames. Frames past the end of the log hold the
/// last recorded movement with no jump edges.
pub fn replay<C: Collider + ?Sized>(
    config: MovementConfig,
    collider: &mut C,
    log: &InputLog,
    frames: u64,
    dt: f32,
) -> Result<ReplayOutcome, ConfigError> {
    let mut controller = MovementController::new(config)?;
    let mut events = Vec::new();

    debug!(frames, deltas = log.delta_count(), "replaying input log");

    let mut recorded = log.replay_iter();
    for frame in 0..frames {
        let input = match recorded.next() {
            Some((_, input)) => input,
            None => log.get_input_at(frame),
        };
        let result = step(&mut controller, collider, &input, dt);
        events.extend(result.events);
    }

    let final_hash = controller.compute_hash();
    info!(frames, events = events.len(), "replay complete");

    Ok(ReplayOutcome {
        controller,
        final_hash,
        events,
    })
}

// =============================================================================
// TESTS
// =============================================================================
