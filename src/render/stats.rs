//! Headless renderer that only measures what would be drawn

use super::{Frame, SphereRenderer};
use crate::core::{Rotation, Viewport};

/// Counts frames and projected geometry instead of drawing it
#[derive(Clone, Debug, Default)]
pub struct StatsRenderer {
    pub viewport: Viewport,
    pub frames: u64,
    pub resizes: u64,
    /// Points in front of the camera on the last frame
    pub visible_points: usize,
    /// Points culled on the last frame
    pub culled_points: usize,
    pub visible_edges: usize,
    /// Projected point bounds on the last frame: (min_x, min_y, max_x, max_y)
    pub bounds: Option<(f32, f32, f32, f32)>,
    pub rotation: Rotation,
    pub elapsed: f64,
}

impl StatsRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SphereRenderer for StatsRenderer {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.resizes += 1;
    }

    fn draw(&mut self, frame: &Frame<'_>) {
        let mut visible = 0usize;
        let mut bounds: Option<(f32, f32, f32, f32)> = None;
        for p in frame.projected_points() {
            visible += 1;
            bounds = Some(match bounds {
                None => (p.x, p.y, p.x, p.y),
                Some((x0, y0, x1, y1)) => (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)),
            });
        }

        self.frames += 1;
        self.visible_points = visible;
        self.culled_points = frame.cloud.len() - visible;
        self.visible_edges = frame.projected_edges().count();
        self.bounds = bounds;
        self.rotation = frame.rotation;
        self.elapsed = frame.elapsed;
    }
}
