//! Gap Glider - a side-scrolling reflex game
//!
//! Core modules:
//! - `sim`: Deterministic per-frame simulation (physics, obstacles, collisions, difficulty)
//! - `game`: Run state machine (idle, countdown, running, game over)
//! - `schedule`: Cancellation tickets for frame and countdown continuations
//! - `platform`: Capability traits for the render surface, audio and storage
//! - `renderer`: Per-frame draw pass
//! - `audio`: Cue playback
//! - `best_score`: Best-score persistence
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod best_score;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod schedule;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{CountdownStep, FrameStep, Game, Phase};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Actor defaults (fixed x, square body)
    pub const ACTOR_X: f32 = 50.0;
    pub const ACTOR_SIZE: f32 = 30.0;
    /// Vertical velocity set by a jump (negative = up)
    pub const JUMP_IMPULSE: f32 = -6.0;
    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.25;

    /// Cosmetic bob added to the actor each tick
    pub const BOB_AMPLITUDE: f32 = 0.5;
    pub const BOB_PERIOD_MS: f64 = 100.0;

    /// Obstacle defaults
    pub const PIPE_WIDTH: f32 = 60.0;
    pub const BASE_PIPE_SPEED: f32 = 3.0;
    pub const BASE_GAP: f32 = 150.0;
    pub const MIN_GAP: f32 = 100.0;
    /// Distance the newest obstacle must travel before the next spawns
    pub const SPAWN_THRESHOLD: f32 = 200.0;
    /// Fade-in step per tick
    pub const FADE_STEP: f32 = 0.05;

    /// Difficulty escalates every MILESTONE points
    pub const MILESTONE: u64 = 5;
    pub const SPEED_STEP: f32 = 0.2;
    pub const GAP_STEP: f32 = 5.0;

    /// Countdown before a run
    pub const COUNTDOWN_FROM: u32 = 3;
    pub const COUNTDOWN_INTERVAL_MS: u32 = 1000;

    /// Score emphasis (~200ms at 60 Hz)
    pub const SCORE_PULSE_FRAMES: u32 = 12;
    pub const SCORE_PULSE_SCALE: f32 = 1.3;

    /// Viewport limits
    pub const MAX_VIEWPORT_WIDTH: f32 = 480.0;
    pub const MAX_VIEWPORT_HEIGHT: f32 = 640.0;
    pub const VIEWPORT_MARGIN: f32 = 20.0;
}
