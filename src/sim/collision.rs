//! Collision detection
//!
//! Axis-aligned boxes only: the actor against each obstacle's two segments,
//! and the actor against the floor. There is no ceiling check, so the actor
//! may fly above y = 0 without penalty.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Obstacle;

/// Axis-aligned rectangle, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Strict horizontal overlap (touching edges do not count)
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.left() < right && self.right() > left
    }
}

/// Actor vs obstacle
///
/// A hit needs horizontal overlap with the obstacle's columns AND the actor
/// poking out of the gap: top edge above the top segment's bottom, or bottom
/// edge below the bottom segment's top.
pub fn hits_obstacle(actor: &Rect, obstacle: &Obstacle, pipe_width: f32) -> bool {
    actor.overlaps_x(obstacle.x, obstacle.right(pipe_width))
        && (actor.top() < obstacle.top_height || actor.bottom() > obstacle.bottom_y)
}

/// Actor vs floor
pub fn hits_ground(actor: &Rect, world_height: f32) -> bool {
    actor.bottom() > world_height
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle_at(x: f32, top_height: f32, bottom_y: f32) -> Obstacle {
        Obstacle {
            x,
            top_height,
            bottom_y,
            passed: false,
            opacity: 1.0,
        }
    }

    #[test]
    fn test_below_gap_with_overlap_hits() {
        let actor = Rect::from_xywh(50.0, 300.0, 30.0, 30.0);
        let obstacle = obstacle_at(60.0, 100.0, 250.0);
        assert!(hits_obstacle(&actor, &obstacle, 60.0));
    }

    #[test]
    fn test_no_horizontal_overlap_misses() {
        let actor = Rect::from_xywh(50.0, 300.0, 30.0, 30.0);
        let obstacle = obstacle_at(200.0, 100.0, 250.0);
        assert!(!hits_obstacle(&actor, &obstacle, 60.0));
    }

    #[test]
    fn test_inside_gap_misses() {
        let actor = Rect::from_xywh(50.0, 150.0, 30.0, 30.0);
        let obstacle = obstacle_at(40.0, 100.0, 250.0);
        assert!(!hits_obstacle(&actor, &obstacle, 60.0));
    }

    #[test]
    fn test_above_gap_hits() {
        let actor = Rect::from_xywh(50.0, 90.0, 30.0, 30.0);
        let obstacle = obstacle_at(40.0, 100.0, 250.0);
        assert!(hits_obstacle(&actor, &obstacle, 60.0));
    }

    #[test]
    fn test_touching_edges_do_not_hit() {
        // Actor right edge exactly at obstacle left edge
        let actor = Rect::from_xywh(50.0, 0.0, 30.0, 30.0);
        let obstacle = obstacle_at(80.0, 100.0, 250.0);
        assert!(!hits_obstacle(&actor, &obstacle, 60.0));

        // Actor flush against both gap edges
        let actor = Rect::from_xywh(50.0, 100.0, 30.0, 150.0);
        let obstacle = obstacle_at(40.0, 100.0, 250.0);
        assert!(!hits_obstacle(&actor, &obstacle, 60.0));
    }

    #[test]
    fn test_ground_and_no_ceiling() {
        assert!(hits_ground(&Rect::from_xywh(50.0, 611.0, 30.0, 30.0), 640.0));
        assert!(!hits_ground(&Rect::from_xywh(50.0, 610.0, 30.0, 30.0), 640.0));
        // Far above the top of the world is fine
        assert!(!hits_ground(&Rect::from_xywh(50.0, -500.0, 30.0, 30.0), 640.0));
    }
}
