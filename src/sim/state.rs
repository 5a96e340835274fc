//! Game state and core simulation types
//!
//! One `GameState` is the whole session: actor, live obstacles, score and the
//! current difficulty. It is passed explicitly to every simulation step.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::difficulty::Difficulty;
use super::spawn::create_obstacle;
use crate::platform::Viewport;
use crate::tuning::Tuning;

/// The player-controlled entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner; x stays fixed for the whole run
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (positive = down)
    pub velocity_y: f32,
    /// Velocity applied by a jump
    pub jump_impulse: f32,
}

impl Actor {
    /// Spawn at the fixed x, vertically centered
    pub fn new(world_height: f32, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.actor_x, world_height / 2.0),
            size: Vec2::splat(tuning.actor_size),
            velocity_y: 0.0,
            jump_impulse: tuning.jump_impulse,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn jump(&mut self) {
        self.velocity_y = self.jump_impulse;
    }
}

/// A top/bottom barrier pair with a vertical gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge, decreases every tick
    pub x: f32,
    /// Height of the top segment (bottom edge of the top barrier)
    pub top_height: f32,
    /// Top edge of the bottom segment; `top_height + gap` fixed at creation
    pub bottom_y: f32,
    /// Set once the actor has cleared this obstacle
    pub passed: bool,
    /// Fade-in alpha (visual only)
    pub opacity: f32,
}

impl Obstacle {
    pub fn gap(&self) -> f32 {
        self.bottom_y - self.top_height
    }

    pub fn right(&self, pipe_width: f32) -> f32 {
        self.x + pipe_width
    }

    pub fn top_rect(&self, pipe_width: f32) -> Rect {
        Rect::new(Vec2::new(self.x, 0.0), Vec2::new(pipe_width, self.top_height))
    }

    pub fn bottom_rect(&self, pipe_width: f32, world_height: f32) -> Rect {
        Rect::new(
            Vec2::new(self.x, self.bottom_y),
            Vec2::new(pipe_width, (world_height - self.bottom_y).max(0.0)),
        )
    }
}

/// What the actor ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    Obstacle,
    Ground,
}

/// Side effects produced by a step, drained by the game loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Jump accepted
    Jumped,
    /// An obstacle was passed; carries the new score
    Passed { score: u64 },
    /// Difficulty escalated at a milestone
    DifficultyRaised(Difficulty),
    /// Run ended
    Collided(CollisionKind),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub viewport: Viewport,
    pub tuning: Tuning,
    pub actor: Actor,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Score for the current run
    pub score: u64,
    /// Current pipe speed and gap
    pub difficulty: Difficulty,
    pub running: bool,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    /// Frames of score emphasis remaining
    pub score_pulse: u32,
    /// Cosmetic motion (bob, score pulse); off for reduced motion
    pub motion_fx: bool,
    /// Pending side effects
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameState {
    /// Create a session and reset it for a first run
    pub fn new(viewport: Viewport, tuning: Tuning, seed: u64) -> Self {
        let difficulty = Difficulty::base(&tuning);
        let mut state = Self {
            seed,
            viewport,
            actor: Actor::new(viewport.height, &tuning),
            tuning,
            obstacles: Vec::new(),
            score: 0,
            difficulty,
            running: false,
            time_ticks: 0,
            score_pulse: 0,
            motion_fx: true,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset();
        state
    }

    /// Back to a fresh, not-running run: new actor, one obstacle at the right
    /// edge, score 0, base difficulty
    ///
    /// The RNG is not reseeded, so consecutive runs get different layouts.
    pub fn reset(&mut self) {
        self.actor = Actor::new(self.viewport.height, &self.tuning);
        self.obstacles.clear();
        self.score = 0;
        self.difficulty = Difficulty::base(&self.tuning);
        self.running = false;
        self.time_ticks = 0;
        self.score_pulse = 0;
        self.events.clear();
        self.spawn_obstacle();
    }

    /// New bounds always mean a full reset
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.reset();
    }

    /// Append a new obstacle at the right edge using the current gap
    pub fn spawn_obstacle(&mut self) {
        let obstacle = create_obstacle(
            self.viewport.width,
            self.difficulty.gap,
            self.viewport.height,
            &mut self.rng,
        );
        log::debug!(
            "Spawned obstacle: top={:.1} gap={:.1}",
            obstacle.top_height,
            obstacle.gap()
        );
        self.obstacles.push(obstacle);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_reset() {
        let state = GameState::new(Viewport::new(480.0, 640.0), Tuning::default(), 7);
        assert!(!state.running);
        assert_eq!(state.score, 0);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].x, 480.0);
        assert_eq!(state.actor.pos, Vec2::new(50.0, 320.0));
        assert_eq!(state.difficulty, Difficulty::base(&Tuning::default()));
    }

    #[test]
    fn test_resize_resets_with_new_bounds() {
        let mut state = GameState::new(Viewport::new(480.0, 640.0), Tuning::default(), 7);
        state.running = true;
        state.score = 12;
        state.spawn_obstacle();

        state.resize(Viewport::new(300.0, 500.0));
        assert!(!state.running);
        assert_eq!(state.score, 0);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].x, 300.0);
        assert_eq!(state.actor.pos.y, 250.0);
    }

    #[test]
    fn test_obstacle_segments() {
        let obstacle = Obstacle {
            x: 100.0,
            top_height: 120.0,
            bottom_y: 270.0,
            passed: false,
            opacity: 0.0,
        };
        assert_eq!(obstacle.gap(), 150.0);
        assert_eq!(obstacle.top_rect(60.0), Rect::from_xywh(100.0, 0.0, 60.0, 120.0));
        assert_eq!(
            obstacle.bottom_rect(60.0, 640.0),
            Rect::from_xywh(100.0, 270.0, 60.0, 370.0)
        );
    }
}
