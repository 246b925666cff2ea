//! Core numeric primitives.
//!
//! Plain value types and pure functions shared by the movement core.
//! Nothing here knows about walls, jumps or colliders.

pub mod vec2;
pub mod smoothing;
pub mod hash;

// Re-export core types
pub use vec2::Vec2;
pub use smoothing::{smooth_damp, DampedAxis};
pub use hash::{StateHash, StateHasher};
