//! Platform abstraction layer
//!
//! The simulation never talks to a browser directly. Everything it needs from
//! the outside world comes through these narrow capabilities:
//! - Render surface (clear + filled rectangles)
//! - Audio cue playback (fire-and-forget)
//! - Best-score storage
//! - Viewport bounds

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::audio::Cue;
use crate::consts::{MAX_VIEWPORT_HEIGHT, MAX_VIEWPORT_WIDTH, VIEWPORT_MARGIN};
use crate::sim::Rect;

/// Failure reported by a platform capability
///
/// Never fatal: the core logs and discards these at the call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The backing device or API is missing (no AudioContext, no LocalStorage)
    Unavailable(&'static str),
    /// The host API rejected the call
    Host(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Unavailable(what) => write!(f, "{what} unavailable"),
            PlatformError::Host(msg) => write!(f, "host error: {msg}"),
        }
    }
}

impl std::error::Error for PlatformError {}

/// RGBA color, alpha in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS `rgba(...)` form for canvas fill styles
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Something the frame can be drawn onto
pub trait RenderSurface {
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

/// Fire-and-forget cue playback
pub trait AudioSink {
    fn play(&self, cue: Cue) -> Result<(), PlatformError>;
}

/// Persistent best-score storage
pub trait BestScoreStore {
    /// Stored best, `None` when nothing (readable) was stored
    fn load(&self) -> Option<u64>;
    fn save(&mut self, best: u64) -> Result<(), PlatformError>;
}

/// Playfield bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: MAX_VIEWPORT_WIDTH,
            height: MAX_VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Size the playfield for a window: capped at 480x640, otherwise the
    /// window minus a small margin
    pub fn fit_window(window_width: f32, window_height: f32) -> Self {
        let width = if window_width > MAX_VIEWPORT_WIDTH {
            MAX_VIEWPORT_WIDTH
        } else {
            (window_width - VIEWPORT_MARGIN).max(0.0)
        };
        let height = if window_height > MAX_VIEWPORT_HEIGHT {
            MAX_VIEWPORT_HEIGHT
        } else {
            (window_height - VIEWPORT_MARGIN).max(0.0)
        };
        Self { width, height }
    }
}
