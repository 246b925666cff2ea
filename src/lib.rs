//! # Platformer Motor
//!
//! Kinematic movement core for a 2D platformer character: run, jump,
//! variable jump height, wall slide, wall stick, wall jumps and slope
//! jumps. Collision is delegated to a caller-supplied [`Collider`].
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      PLATFORMER MOTOR                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Numeric primitives                        │
//! │  ├── vec2.rs     - f32 2D vector                             │
//! │  ├── smoothing.rs- Critically damped smoothing (SmoothDamp)  │
//! │  └── hash.rs     - State hashing for replay verification     │
//! │                                                              │
//! │  motion/         - Movement core                             │
//! │  ├── config.rs   - Tuning and derived jump kinematics        │
//! │  ├── contact.rs  - Contact reports, Collider trait           │
//! │  ├── state.rs    - Footing and wall-slide state              │
//! │  ├── controller.rs- Per-frame movement update and jumps      │
//! │  ├── events.rs   - Jump/slide/landing events                 │
//! │  ├── input.rs    - Input frames and recordings               │
//! │  ├── tick.rs     - Frame driver and replay                   │
//! │  └── arena.rs    - Box room reference collider               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! The movement core is deterministic for a fixed `dt`:
//! - No clocks, no randomness, no unordered collections
//! - Each frame runs the same steps in the same order
//! - State hashes fold floats by their bit patterns
//!
//! Replaying an [`InputLog`] against an equal collider reproduces the
//! same final hash.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod motion;

// Re-export commonly used types
pub use core::vec2::Vec2;
pub use core::hash::StateHash;
pub use motion::config::{ConfigError, MovementConfig};
pub use motion::contact::{Collider, ContactReport, WallSide};
pub use motion::controller::MovementController;
pub use motion::input::{InputFrame, InputLog};
pub use motion::state::MotionState;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default simulation rate (Hz)
pub const FRAME_RATE: u32 = 60;

/// Fixed timestep at [`FRAME_RATE`] (seconds)
pub const FRAME_DT: f32 = 1.0 / FRAME_RATE as f32;
