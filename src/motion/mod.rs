//! Movement Module
//!
//! The character movement core and everything it talks to.
//!
//! ## Module Structure
//!
//! - `config`: Tuning, validation, derived jump kinematics
//! - `contact`: Contact reports and the `Collider` contract
//! - `state`: Footing and wall-slide state
//! - `controller`: Velocity integration, wall sliding, jumps, contact correction
//! - `events`: Motion events for animation and replay comparison
//! - `input`: Per-frame input and delta-compressed recordings
//! - `tick`: Frame driver and log replay
//! - `arena`: Axis-aligned reference collider

pub mod config;
pub mod contact;
pub mod state;
pub mod controller;
pub mod events;
pub mod input;
pub mod tick;
pub mod arena;

// Re-export key types
pub use config::{ConfigError, JumpKinematics, MovementConfig};
pub use contact::{Collider, ContactReport, WallSide};
pub use state::{Footing, Locomotion, MotionState, WallStick};
pub use controller::MovementController;
pub use events::{JumpKind, MotionEvent, MotionEventKind};
pub use input::{InputDelta, InputFrame, InputLog};
pub use tick::{replay, step, ReplayOutcome, TickResult};
pub use arena::BoxArena;
