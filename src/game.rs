//! Run state machine
//!
//! Idle -> CountingDown -> Running -> GameOver, and back to Idle (reset,
//! resize) or straight into CountingDown (restart).
//!
//! The host owns the clocks: it calls `countdown_step` on a fixed interval and
//! `frame` once per animation frame, passing back the `Ticket` it was handed.
//! Every transition advances the epoch, so callbacks left over from an earlier
//! phase are rejected as stale instead of mutating a reset session.

use crate::audio::Cue;
use crate::consts::SCORE_PULSE_SCALE;
use crate::platform::{AudioSink, BestScoreStore, RenderSurface, Viewport};
use crate::renderer::draw_frame;
use crate::schedule::{Epochs, Liveness, TaskKind, Ticket};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GameState};
use crate::tuning::Tuning;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Reset, waiting for start
    Idle,
    /// Counting down to a run
    CountingDown { remaining: u32 },
    /// Simulation advancing each frame
    Running,
    /// Collision ended the run
    GameOver,
}

/// Result of a countdown interval firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    /// Ticket no longer valid; the host should cancel its interval
    Stale,
    /// Still counting
    Tick { remaining: u32 },
    /// Countdown done: cancel the interval and start frames with this ticket
    Go(Ticket),
}

/// Result of one animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStep {
    /// Ticket no longer valid; do not reschedule
    Stale,
    /// Schedule the next frame with this ticket
    Continue(Ticket),
    /// Run over
    Ended { score: u64, new_best: bool },
}

/// Text and visibility for the overlay/HUD
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub score_text: String,
    pub best_text: String,
    /// Emphasis scale for the score (1.0 = normal)
    pub score_scale: f32,
    /// Remaining count while counting down; the final step goes straight
    /// to Running, so there is no text for zero
    pub countdown_text: Option<String>,
    pub start_screen_visible: bool,
    pub game_over_visible: bool,
    pub final_score_text: String,
}

/// A game session plus the capabilities it drives
pub struct Game<A: AudioSink, S: BestScoreStore> {
    state: GameState,
    phase: Phase,
    best: u64,
    epochs: Epochs,
    audio: A,
    store: S,
}

impl<A: AudioSink, S: BestScoreStore> Game<A, S> {
    pub fn new(
        viewport: Viewport,
        tuning: Tuning,
        settings: &Settings,
        audio: A,
        store: S,
        seed: u64,
    ) -> Self {
        let best = store.load().unwrap_or(0);
        let mut state = GameState::new(viewport, tuning.validated(), seed);
        state.motion_fx = settings.motion_fx();

        log::info!(
            "Session ready: {}x{} playfield, best score {}, seed {}",
            viewport.width,
            viewport.height,
            best,
            seed
        );

        Self {
            state,
            phase: Phase::Idle,
            best,
            epochs: Epochs::new(),
            audio,
            store,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn best_score(&self) -> u64 {
        self.best
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// Toggle cosmetic motion (bob and score pulse) mid-session
    pub fn set_motion_fx(&mut self, enabled: bool) {
        self.state.motion_fx = enabled;
        if !enabled {
            self.state.score_pulse = 0;
        }
        log::info!("Motion effects {}", if enabled { "on" } else { "off" });
    }

    /// Whether a continuation holding `ticket` may still act
    pub fn is_live(&self, ticket: Ticket) -> bool {
        self.epochs.is_live(ticket)
    }

    /// Begin (or re-begin) the countdown
    ///
    /// Accepted from Idle and CountingDown; returns the ticket for the
    /// countdown interval.
    pub fn start(&mut self) -> Option<Ticket> {
        match self.phase {
            Phase::Idle | Phase::CountingDown { .. } => {}
            Phase::Running | Phase::GameOver => {
                log::debug!("Start ignored while {:?}", self.phase);
                return None;
            }
        }

        self.epochs.advance();
        let remaining = self.state.tuning.countdown_from;
        self.phase = Phase::CountingDown { remaining };
        log::info!("Countdown from {remaining}");
        Some(self.epochs.issue(TaskKind::Countdown))
    }

    /// One countdown interval elapsed
    pub fn countdown_step(&mut self, ticket: Ticket) -> CountdownStep {
        if ticket.kind() != TaskKind::Countdown || !self.epochs.is_live(ticket) {
            return CountdownStep::Stale;
        }
        let Phase::CountingDown { remaining } = self.phase else {
            return CountdownStep::Stale;
        };

        self.play(Cue::Countdown);
        let remaining = remaining.saturating_sub(1);
        if remaining > 0 {
            self.phase = Phase::CountingDown { remaining };
            return CountdownStep::Tick { remaining };
        }

        self.play(Cue::Go);
        self.epochs.advance();
        self.phase = Phase::Running;
        self.state.running = true;
        log::info!("Run started");
        CountdownStep::Go(self.epochs.issue(TaskKind::Frame))
    }

    /// Advance one frame and draw it
    pub fn frame<R: RenderSurface + ?Sized>(
        &mut self,
        ticket: Ticket,
        surface: &mut R,
        time_ms: f64,
    ) -> FrameStep {
        if ticket.kind() != TaskKind::Frame
            || !self.epochs.is_live(ticket)
            || self.phase != Phase::Running
        {
            return FrameStep::Stale;
        }

        sim::tick(&mut self.state, time_ms);
        self.dispatch_events();
        draw_frame(surface, &self.state);

        if self.state.running {
            FrameStep::Continue(ticket)
        } else {
            self.finish_run()
        }
    }

    /// Jump input; only acts while running
    pub fn jump(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let jumped = sim::jump(&mut self.state);
        self.dispatch_events();
        jumped
    }

    /// Back to Idle with a fresh run
    pub fn reset(&mut self) {
        self.epochs.advance();
        self.state.reset();
        self.phase = Phase::Idle;
        log::info!("Session reset");
    }

    /// Reset, then count down again immediately
    pub fn restart(&mut self) -> Option<Ticket> {
        self.reset();
        self.start()
    }

    /// New playfield bounds; always a full reset to Idle
    pub fn resize(&mut self, viewport: Viewport) {
        self.epochs.advance();
        self.state.resize(viewport);
        self.phase = Phase::Idle;
        log::info!("Resized to {}x{}", viewport.width, viewport.height);
    }

    /// Current overlay/HUD content
    pub fn hud(&self) -> Hud {
        let score_scale = if self.state.score_pulse > 0 {
            SCORE_PULSE_SCALE
        } else {
            1.0
        };
        let countdown_text = match self.phase {
            Phase::CountingDown { remaining } => Some(remaining.to_string()),
            _ => None,
        };

        Hud {
            score_text: format!("Score: {}", self.state.score),
            best_text: format!("Best Score: {}", self.best),
            score_scale,
            countdown_text,
            start_screen_visible: matches!(
                self.phase,
                Phase::Idle | Phase::CountingDown { .. }
            ),
            game_over_visible: self.phase == Phase::GameOver,
            final_score_text: format!("Score: {}", self.state.score),
        }
    }

    fn finish_run(&mut self) -> FrameStep {
        self.epochs.advance();
        self.phase = Phase::GameOver;

        let score = self.state.score;
        let new_best = score > self.best;
        if new_best {
            self.best = score;
            log::info!("New best score: {score}");
            if let Err(e) = self.store.save(score) {
                log::warn!("Failed to persist best score: {e}");
            }
        }

        FrameStep::Ended { score, new_best }
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Jumped => self.play(Cue::Jump),
                GameEvent::Passed { score } => {
                    log::debug!("Passed obstacle, score {score}");
                    self.play(Cue::Score);
                }
                GameEvent::DifficultyRaised(next) => {
                    log::debug!(
                        "Next obstacles: speed {:.1}, gap {:.0}",
                        next.pipe_speed,
                        next.gap
                    );
                }
                GameEvent::Collided(_) => self.play(Cue::Hit),
            }
        }
    }

    /// Fire-and-forget; failures are logged and dropped
    fn play(&self, cue: Cue) {
        if let Err(e) = self.audio.play(cue) {
            log::warn!("Audio play error ({cue:?}): {e}");
        }
    }
}

impl<A: AudioSink, S: BestScoreStore> Liveness for Game<A, S> {
    fn is_live(&self, ticket: Ticket) -> bool {
        self.epochs.is_live(ticket)
    }
}
