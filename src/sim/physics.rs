//! Actor vertical motion

use super::state::Actor;

/// Cosmetic up-down jitter from a monotonically increasing clock (ms)
#[inline]
pub fn bob_offset(time_ms: f64, amplitude: f32, period_ms: f64) -> f32 {
    (time_ms / period_ms).sin() as f32 * amplitude
}

/// Integrate one tick: velocity picks up gravity, then y moves by velocity
/// plus the cosmetic bob. No clamping; bounds are the collision pass's job.
pub fn step_actor(actor: &mut Actor, gravity: f32, bob: f32) {
    actor.velocity_y += gravity;
    actor.pos.y += actor.velocity_y + bob;
}
