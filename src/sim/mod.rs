//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per externally driven frame
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or storage dependencies (side effects leave as `GameEvent`s)

pub mod collision;
pub mod difficulty;
pub mod obstacles;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, hits_ground, hits_obstacle};
pub use difficulty::{Difficulty, escalate};
pub use obstacles::{Sweep, sweep_obstacles};
pub use physics::{bob_offset, step_actor};
pub use spawn::create_obstacle;
pub use state::{Actor, CollisionKind, GameEvent, GameState, Obstacle};
pub use tick::{jump, tick};
