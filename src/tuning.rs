//! Data-driven game balance
//!
//! Every physics and difficulty knob lives here so a run can be re-tuned from
//! JSON without touching the simulation. Missing fields fall back to `consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance parameters for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Actor ===
    pub gravity: f32,
    pub jump_impulse: f32,
    pub actor_x: f32,
    pub actor_size: f32,
    /// Cosmetic bob amplitude (pixels)
    pub bob_amplitude: f32,
    /// Cosmetic bob period divisor (ms)
    pub bob_period_ms: f64,

    // === Obstacles ===
    pub pipe_width: f32,
    pub base_pipe_speed: f32,
    pub base_gap: f32,
    pub min_gap: f32,
    pub spawn_threshold: f32,
    pub fade_step: f32,

    // === Difficulty ===
    pub milestone: u64,
    pub speed_step: f32,
    pub gap_step: f32,

    // === Pacing ===
    pub countdown_from: u32,
    pub countdown_interval_ms: u32,
    pub score_pulse_frames: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            actor_x: ACTOR_X,
            actor_size: ACTOR_SIZE,
            bob_amplitude: BOB_AMPLITUDE,
            bob_period_ms: BOB_PERIOD_MS,

            pipe_width: PIPE_WIDTH,
            base_pipe_speed: BASE_PIPE_SPEED,
            base_gap: BASE_GAP,
            min_gap: MIN_GAP,
            spawn_threshold: SPAWN_THRESHOLD,
            fade_step: FADE_STEP,

            milestone: MILESTONE,
            speed_step: SPEED_STEP,
            gap_step: GAP_STEP,

            countdown_from: COUNTDOWN_FROM,
            countdown_interval_ms: COUNTDOWN_INTERVAL_MS,
            score_pulse_frames: SCORE_PULSE_FRAMES,
        }
    }
}

impl Tuning {
    /// Parse overrides from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.validated())
    }

    /// Parse overrides, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring malformed tuning ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// LocalStorage key for balance overrides
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "gap_glider_tuning";

    /// Balance overrides from LocalStorage, defaults when none are stored
    /// (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok().flatten());

        match json {
            Some(json) => {
                log::info!("Loaded tuning overrides from LocalStorage");
                Self::from_json_or_default(&json)
            }
            None => Self::default(),
        }
    }

    /// Balance overrides from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded tuning overrides from {}", path.display());
                Self::from_json_or_default(&json)
            }
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Clamp values the simulation cannot run with
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        self.milestone = self.milestone.max(1);
        if !(self.min_gap > 0.0) {
            self.min_gap = defaults.min_gap;
        }
        if !(self.base_gap >= self.min_gap) {
            self.base_gap = self.min_gap;
        }
        if !(self.base_pipe_speed > 0.0) {
            self.base_pipe_speed = defaults.base_pipe_speed;
        }
        if !(self.pipe_width > 0.0) {
            self.pipe_width = defaults.pipe_width;
        }
        if !(self.bob_period_ms > 0.0) {
            self.bob_period_ms = defaults.bob_period_ms;
        }
        if !(self.fade_step > 0.0) {
            self.fade_step = defaults.fade_step;
        }
        self.fade_step = self.fade_step.min(1.0);
        self.countdown_from = self.countdown_from.max(1);
        self.countdown_interval_ms = self.countdown_interval_ms.max(1);

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.5, "base_gap": 180.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.base_gap, 180.0);
        assert_eq!(tuning.pipe_width, PIPE_WIDTH);
        assert_eq!(tuning.milestone, MILESTONE);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        let tuning = Tuning::from_json_or_default("{ not json");
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_validated_clamps_nonsense() {
        let tuning = Tuning {
            milestone: 0,
            min_gap: -10.0,
            base_gap: 20.0,
            base_pipe_speed: 0.0,
            fade_step: 3.0,
            countdown_from: 0,
            ..Default::default()
        }
        .validated();

        assert_eq!(tuning.milestone, 1);
        assert_eq!(tuning.min_gap, MIN_GAP);
        assert_eq!(tuning.base_gap, MIN_GAP);
        assert_eq!(tuning.base_pipe_speed, BASE_PIPE_SPEED);
        assert_eq!(tuning.fade_step, 1.0);
        assert_eq!(tuning.countdown_from, 1);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_file_overrides_and_falls_back() {
        let path = std::env::temp_dir().join(format!(
            "gap_glider_tuning_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "milestone": 3, "gap_step": 10.0 }"#).unwrap();
        let tuning = Tuning::load_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(tuning.milestone, 3);
        assert_eq!(tuning.gap_step, 10.0);
        assert_eq!(tuning.gravity, GRAVITY);

        // Now missing
        assert_eq!(Tuning::load_file(&path), Tuning::default());
    }
}
