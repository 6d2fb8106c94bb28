//! Axis-aligned geometry for sprites and scripted motion
//!
//! Scene coordinates are centered on the screen with +y pointing up:
//! - `Rect`: center + size box used for sprites, borders and HUD nodes
//! - `TraversalPath`: constant-speed move from spawn point to removal point

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A center/size rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn half(&self) -> Vec2 {
        self.size * 0.5
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    /// Horizontal spans overlap (touching edges do not count)
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.left() < other.right() && other.left() < self.right()
    }

    /// Boxes overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlaps_x(other) && self.bottom() < other.top() && other.bottom() < self.top()
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.bottom()
            && point.y <= self.top()
    }

    /// Shrink by `amount` on every side (never below zero size)
    pub fn inset(&self, amount: f32) -> Rect {
        Rect::new(self.center, (self.size - Vec2::splat(amount * 2.0)).max(Vec2::ZERO))
    }
}

/// Scripted horizontal move, removed once the end point is reached
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraversalPath {
    pub start: Vec2,
    pub end: Vec2,
    /// Frame clock time when the move began (seconds)
    pub start_time: f64,
    /// Seconds to reach `end`
    pub duration: f64,
}

impl TraversalPath {
    /// Path from `start` to `end` at a constant `speed` (units/second)
    pub fn new(start: Vec2, end: Vec2, start_time: f64, speed: f32) -> Self {
        let duration = if speed > 0.0 {
            (start.distance(end) / speed) as f64
        } else {
            0.0
        };
        Self {
            start,
            end,
            start_time,
            duration,
        }
    }

    /// Position at frame clock `time` (clamped to the path ends)
    pub fn position_at(&self, time: f64) -> Vec2 {
        if self.duration <= 0.0 {
            return self.end;
        }
        let t = ((time - self.start_time) / self.duration).clamp(0.0, 1.0);
        self.start.lerp(self.end, t as f32)
    }

    pub fn is_finished(&self, time: f64) -> bool {
        time - self.start_time >= self.duration
    }
}
