//! Obstacle management
//!
//! Per tick, in spawn order: move, fade in, collide, score. Retirement and
//! spawning run only after the whole pass, so an obstacle can be scored and
//! retired in the same tick.

use super::collision::hits_obstacle;
use super::difficulty::escalate;
use super::state::{GameEvent, GameState};

/// Outcome of one obstacle sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    /// No obstacle hit; retirement and spawning done
    Clear,
    /// The actor hit the obstacle at this index; the sweep stopped there
    Hit(usize),
}

/// Advance every live obstacle one tick
pub fn sweep_obstacles(state: &mut GameState) -> Sweep {
    let actor = state.actor.bounds();
    let pipe_width = state.tuning.pipe_width;
    let fade_step = state.tuning.fade_step;
    let pipe_speed = state.difficulty.pipe_speed;

    for (idx, obstacle) in state.obstacles.iter_mut().enumerate() {
        obstacle.x -= pipe_speed;
        obstacle.opacity = (obstacle.opacity + fade_step).min(1.0);

        if hits_obstacle(&actor, obstacle, pipe_width) {
            return Sweep::Hit(idx);
        }

        // Leading edge of the actor clears the trailing edge of the obstacle
        if !obstacle.passed && actor.right() > obstacle.right(pipe_width) {
            obstacle.passed = true;
            state.score += 1;
            state.events.push(GameEvent::Passed { score: state.score });
            if state.motion_fx {
                state.score_pulse = state.tuning.score_pulse_frames;
            }

            if let Some(next) = escalate(state.score, state.difficulty, &state.tuning) {
                log::info!(
                    "Difficulty up at score {}: speed {:.1} -> {:.1}, gap {:.0} -> {:.0}",
                    state.score,
                    state.difficulty.pipe_speed,
                    next.pipe_speed,
                    state.difficulty.gap,
                    next.gap
                );
                state.difficulty = next;
                state.events.push(GameEvent::DifficultyRaised(next));
            }
        }
    }

    // Rebuild the live list without anything fully past the left edge
    let before = state.obstacles.len();
    state.obstacles.retain(|o| o.right(pipe_width) >= 0.0);
    let retired = before - state.obstacles.len();
    if retired > 0 {
        log::debug!("Retired {retired} obstacle(s)");
    }

    let spawn_line = state.viewport.width - state.tuning.spawn_threshold;
    let needs_spawn = state.obstacles.last().is_none_or(|last| last.x < spawn_line);
    if needs_spawn {
        state.spawn_obstacle();
    }

    Sweep::Clear
}
