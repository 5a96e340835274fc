//! Audio cues
//!
//! Procedurally generated with the Web Audio API on wasm32 - no sample files.
//! Playback is fire-and-forget: nothing here blocks, and failures are
//! reported to the caller only so it can log them.

use crate::platform::{AudioSink, PlatformError};

/// Cue identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Jump accepted
    Jump,
    /// Obstacle passed
    Score,
    /// Collision, run over
    Hit,
    /// Each countdown step
    Countdown,
    /// Countdown finished
    Go,
}

/// Sink that drops every cue (native builds, headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&self, cue: Cue) -> Result<(), PlatformError> {
        log::trace!("cue {cue:?} (silent)");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::Cue;
    use crate::platform::{AudioSink, PlatformError};
    use crate::settings::Settings;

    fn host(err: wasm_bindgen::JsValue) -> PlatformError {
        PlatformError::Host(format!("{err:?}"))
    }

    /// Web Audio cue player
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
    }

    impl WebAudio {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: settings.master_volume.clamp(0.0, 1.0),
                sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
                muted: settings.muted,
            }
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn effective_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.sfx_volume
            }
        }

        /// Oscillator routed through a gain node to the destination
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Result<(OscillatorNode, GainNode), PlatformError> {
            let osc = ctx.create_oscillator().map_err(host)?;
            let gain = ctx.create_gain().map_err(host)?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).map_err(host)?;
            gain.connect_with_audio_node(&ctx.destination())
                .map_err(host)?;

            Ok((osc, gain))
        }

        /// One enveloped tone, optionally sweeping to `end_freq`
        fn tone(
            ctx: &AudioContext,
            vol: f32,
            start_freq: f32,
            end_freq: f32,
            osc_type: OscillatorType,
            delay: f64,
            duration: f64,
        ) -> Result<(), PlatformError> {
            let (osc, gain) = Self::create_osc(ctx, start_freq, osc_type)?;
            let t = ctx.current_time() + delay;

            gain.gain().set_value_at_time(vol, t).map_err(host)?;
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + duration)
                .map_err(host)?;
            if end_freq != start_freq {
                osc.frequency()
                    .set_value_at_time(start_freq, t)
                    .map_err(host)?;
                osc.frequency()
                    .exponential_ramp_to_value_at_time(end_freq, t + duration)
                    .map_err(host)?;
            }

            osc.start_with_when(t).map_err(host)?;
            osc.stop_with_when(t + duration + 0.05).map_err(host)?;
            Ok(())
        }
    }

    impl AudioSink for WebAudio {
        fn play(&self, cue: Cue) -> Result<(), PlatformError> {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return Ok(());
            }

            let ctx = self
                .ctx
                .as_ref()
                .ok_or(PlatformError::Unavailable("AudioContext"))?;

            // Browsers suspend the context until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match cue {
                // Quick upward chirp
                Cue::Jump => Self::tone(ctx, vol * 0.3, 400.0, 800.0, OscillatorType::Sine, 0.0, 0.1),
                // Two-note ding
                Cue::Score => {
                    Self::tone(ctx, vol * 0.25, 520.0, 520.0, OscillatorType::Triangle, 0.0, 0.12)?;
                    Self::tone(ctx, vol * 0.25, 680.0, 680.0, OscillatorType::Triangle, 0.1, 0.15)
                }
                // Falling saw thud
                Cue::Hit => {
                    Self::tone(ctx, vol * 0.4, 400.0, 80.0, OscillatorType::Sawtooth, 0.0, 0.4)?;
                    Self::tone(ctx, vol * 0.3, 60.0, 40.0, OscillatorType::Sine, 0.0, 0.2)
                }
                // Short square beep
                Cue::Countdown => {
                    Self::tone(ctx, vol * 0.2, 660.0, 660.0, OscillatorType::Square, 0.0, 0.08)
                }
                // Higher, longer beep
                Cue::Go => Self::tone(ctx, vol * 0.25, 880.0, 1320.0, OscillatorType::Square, 0.0, 0.25),
            }
        }
    }
}
