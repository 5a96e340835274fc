//! Per-frame draw pass
//!
//! Draws the session onto any `RenderSurface`: clear, actor, then each
//! obstacle's two segments faded in by its opacity.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use crate::platform::{Color, RenderSurface};
use crate::sim::{GameState, Rect};

pub const ACTOR_COLOR: Color = Color::YELLOW;
pub const OBSTACLE_COLOR: Color = Color::GREEN;

/// Render the current state
pub fn draw_frame<S: RenderSurface + ?Sized>(surface: &mut S, state: &GameState) {
    surface.clear();
    surface.fill_rect(state.actor.bounds(), ACTOR_COLOR);

    let pipe_width = state.tuning.pipe_width;
    let world_height = state.viewport.height;
    for obstacle in &state.obstacles {
        let color = OBSTACLE_COLOR.with_alpha(obstacle.opacity);
        surface.fill_rect(obstacle.top_rect(pipe_width), color);
        surface.fill_rect(obstacle.bottom_rect(pipe_width, world_height), color);
    }
}

/// Surface that only counts what it is asked to draw (headless runs)
#[derive(Debug, Default)]
pub struct NullSurface {
    pub frames: u64,
    pub rects: u64,
}

impl RenderSurface for NullSurface {
    fn clear(&mut self) {
        self.frames += 1;
    }

    fn fill_rect(&mut self, _rect: Rect, _color: Color) {
        self.rects += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Viewport;
    use crate::tuning::Tuning;

    #[derive(Default)]
    struct RecordingSurface {
        ops: Vec<Option<(Rect, Color)>>,
    }

    impl RenderSurface for RecordingSurface {
        fn clear(&mut self) {
            self.ops.push(None);
        }

        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.ops.push(Some((rect, color)));
        }
    }

    #[test]
    fn test_draw_order_and_colors() {
        let mut state = GameState::new(Viewport::new(480.0, 640.0), Tuning::default(), 3);
        state.obstacles[0].x = 200.0;
        state.obstacles[0].top_height = 120.0;
        state.obstacles[0].bottom_y = 270.0;
        state.obstacles[0].opacity = 0.5;

        let mut surface = RecordingSurface::default();
        draw_frame(&mut surface, &state);

        assert_eq!(surface.ops.len(), 4);
        assert_eq!(surface.ops[0], None);
        assert_eq!(
            surface.ops[1],
            Some((Rect::from_xywh(50.0, 320.0, 30.0, 30.0), Color::YELLOW))
        );
        let faded = Color::GREEN.with_alpha(0.5);
        assert_eq!(
            surface.ops[2],
            Some((Rect::from_xywh(200.0, 0.0, 60.0, 120.0), faded))
        );
        assert_eq!(
            surface.ops[3],
            Some((Rect::from_xywh(200.0, 270.0, 60.0, 370.0), faded))
        );
    }

    #[test]
    fn test_null_surface_counts() {
        let state = GameState::new(Viewport::default(), Tuning::default(), 3);
        let mut surface = NullSurface::default();
        draw_frame(&mut surface, &state);
        draw_frame(&mut surface, &state);
        assert_eq!(surface.frames, 2);
        assert_eq!(surface.rects, 6);
    }
}
