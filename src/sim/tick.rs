//! Simulation tick
//!
//! Core game step that advances one frame deterministically.

use super::collision::hits_ground;
use super::obstacles::{Sweep, sweep_obstacles};
use super::physics::{bob_offset, step_actor};
use super::state::{CollisionKind, GameEvent, GameState};

/// Advance a running session by one frame
///
/// `time_ms` is a monotonically increasing clock used only for the cosmetic
/// bob. Does nothing unless the session is running.
pub fn tick(state: &mut GameState, time_ms: f64) {
    if !state.running {
        return;
    }

    state.time_ticks += 1;
    state.score_pulse = state.score_pulse.saturating_sub(1);

    let bob = if state.motion_fx {
        bob_offset(time_ms, state.tuning.bob_amplitude, state.tuning.bob_period_ms)
    } else {
        0.0
    };
    step_actor(&mut state.actor, state.tuning.gravity, bob);

    if let Sweep::Hit(idx) = sweep_obstacles(state) {
        log::debug!("Hit obstacle #{idx} at tick {}", state.time_ticks);
        end_run(state, CollisionKind::Obstacle);
        return;
    }

    if hits_ground(&state.actor.bounds(), state.viewport.height) {
        end_run(state, CollisionKind::Ground);
    }
}

/// Jump, accepted only while running
///
/// Returns whether the jump was applied.
pub fn jump(state: &mut GameState) -> bool {
    if !state.running {
        return false;
    }
    state.actor.jump();
    state.events.push(GameEvent::Jumped);
    true
}

fn end_run(state: &mut GameState, kind: CollisionKind) {
    state.running = false;
    // The pulse only decays while running
    state.score_pulse = 0;
    state.events.push(GameEvent::Collided(kind));
    log::info!(
        "Run ended ({kind:?}) with score {} after {} ticks",
        state.score,
        state.time_ticks
    );
}
