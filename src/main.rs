//! Platformer Motor Simulator
//!
//! Drives a character through a scripted session in a box room,
//! records its input, and replays the recording to verify determinism.

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use platformer_motor::{
    core::hash::hash_bytes,
    motion::{
        arena::BoxArena,
        events::MotionEventKind,
        tick::{replay, step},
    },
    InputFrame, InputLog, MovementConfig, MovementController, Vec2, FRAME_DT, FRAME_RATE,
    VERSION,
};

/// Path to a JSON tuning file.
const CONFIG_ENV: &str = "MOTOR_CONFIG";

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Platformer Motor Simulator v{}", VERSION);
    info!("Frame Rate: {} Hz", FRAME_RATE);

    let config = load_config()?;
    demo_session(config)
}

/// Default tuning, or `MOTOR_CONFIG`, then env overrides.
fn load_config() -> Result<MovementConfig> {
    let base = match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            info!("Loading tuning from {}", path);
            MovementConfig::from_json_file(&path)
                .with_context(|| format!("failed to load {}", path))?
        }
        Err(_) => MovementConfig::default(),
    };

    base.with_env_overrides()
        .context("invalid MOTOR_* override")
}

/// Scripted input: run right, jump into the wall, slide, leap off, land.
fn scripted_input(frame: u64) -> InputFrame {
    let right = InputFrame::with_movement(1.0, 0.0);
    let left = InputFrame::with_movement(-1.0, 0.0);

    match frame {
        0..=149 => right,
        150 => right.pressing_jump(),
        151..=199 => right,
        200 => left.pressing_jump(),
        201..=209 => left,
        210 => left.releasing_jump(),
        211..=299 => left,
        _ => InputFrame::new(),
    }
}

/// Run the scripted session and verify the replay.
fn demo_session(config: MovementConfig) -> Result<()> {
    const FRAMES: u64 = 360;

    info!("=== Starting Demo Session ===");

    let mut controller =
        MovementController::new(config.clone()).context("invalid movement tuning")?;
    let kinematics = controller.kinematics();
    info!(
        "Gravity {:.3}, jump velocity {:.3} max / {:.3} min",
        kinematics.gravity, kinematics.max_jump_velocity, kinematics.min_jump_velocity
    );

    let mut arena = new_arena();
    let (room_min, room_max) = arena.room();
    info!("Room {} to {}, spawn at {}", room_min, room_max, arena.position());
    let mut log = InputLog::new();
    let mut total_events = 0;

    info!("Running {} frames...", FRAMES);

    for frame in 0..FRAMES {
        let input = scripted_input(frame);
        log.record(frame, input);

        let result = step(&mut controller, &mut arena, &input, FRAME_DT);
        total_events += result.events.len();

        // Log important events
        for event in &result.events {
            match &event.kind {
                MotionEventKind::Jumped { kind, velocity } if kind.is_wall_jump() => {
                    info!("Frame {}: wall jump ({:?}), velocity {}", event.frame, kind, velocity);
                }
                MotionEventKind::Jumped { kind, velocity } => {
                    info!("Frame {}: {:?} jump, velocity {}", event.frame, kind, velocity);
                }
                MotionEventKind::WallSlideStarted { wall } => {
                    info!("Frame {}: sliding down {:?} wall", event.frame, wall);
                }
                MotionEventKind::Landed { impact_speed } => {
                    info!("Frame {}: landed at {:.2} u/s", event.frame, impact_speed);
                }
                _ => {}
            }
        }

        // Report every second
        if frame % u64::from(FRAME_RATE) == 0 {
            info!(
                "Frame {}: {:?} at {}, velocity {}",
                frame,
                controller.motion_state(),
                arena.position(),
                controller.velocity()
            );
        }
    }

    // Print final results
    info!("=== Session Results ===");
    let hash = controller.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));
    info!("Final Position: {}", arena.position());
    info!("Total events: {}", total_events);

    let bytes = log.to_bytes().context("failed to encode input log")?;
    info!(
        "Input log: {} deltas, {} bytes, digest {}",
        log.delta_count(),
        bytes.len(),
        hex::encode(&hash_bytes(&bytes)[..8])
    );

    // Verify determinism by replaying the decoded recording
    info!("=== Verifying Determinism ===");
    let decoded = InputLog::from_bytes(&bytes).context("failed to decode input log")?;
    let mut replay_arena = new_arena();
    let outcome = replay(config, &mut replay_arena, &decoded, FRAMES, FRAME_DT)?;

    info!("Replay State Hash: {}", hex::encode(outcome.final_hash));

    if hash == outcome.final_hash && arena.position() == replay_arena.position() {
        info!("DETERMINISM VERIFIED: Hashes match!");
        Ok(())
    } else {
        warn!("DETERMINISM FAILURE: Hashes differ!");
        bail!("replay diverged from the live session")
    }
}

fn new_arena() -> BoxArena {
    BoxArena::new(20.0, 12.0, Vec2::new(0.5, 1.0))
}
