//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

pub use glam::Vec2;

/// Axis-aligned bounding box in playfield pixels (y grows downward).
/// `min` is the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap test. Boxes that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Simulation time tracking.
///
/// Unlike a fixed-step clock, the timestamp is supplied by the caller each
/// tick and `dt_ms` is the gap to the previous tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks processed since the session started.
    pub tick: u64,
    /// Timestamp of the latest tick in milliseconds.
    pub timestamp_ms: f64,
    /// Milliseconds elapsed since the previous tick (0 on the first tick).
    pub dt_ms: f64,
}

impl SimTime {
    /// Advance to a new timestamp. The first call yields a zero delta.
    /// Timestamps that go backwards are treated as a zero delta.
    pub fn advance(&mut self, timestamp_ms: f64) {
        self.dt_ms = if self.tick == 0 {
            0.0
        } else {
            (timestamp_ms - self.timestamp_ms).max(0.0)
        };
        self.timestamp_ms = timestamp_ms.max(self.timestamp_ms);
        self.tick += 1;
    }
}
