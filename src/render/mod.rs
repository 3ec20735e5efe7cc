//! Renderer seam for the particle sphere
//!
//! The component hands a [`Frame`] to a [`SphereRenderer`] once per tick.
//! Frames carry borrowed geometry plus the current rotation, and offer
//! projected iterators so renderers never redo the math.

mod stats;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod canvas;

pub use stats::StatsRenderer;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub use canvas::CanvasRenderer;

use crate::core::{
    rotate_xy, Camera, CloudAngle, PointCloud, Projected, Rotation, SphereConfig, Viewport,
    Wireframe,
};

/// Colors and sizes for one draw
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub point_size: f32,
    pub point_color: u32,
    pub point_opacity: f32,
    pub wireframe_color: u32,
    pub wireframe_opacity: f32,
}

impl From<&SphereConfig> for Style {
    fn from(c: &SphereConfig) -> Self {
        Self {
            point_size: c.point_size,
            point_color: c.point_color,
            point_opacity: c.point_opacity,
            wireframe_color: c.wireframe_color,
            wireframe_opacity: c.wireframe_opacity,
        }
    }
}

/// Everything a renderer needs for one frame
pub struct Frame<'a> {
    pub cloud: &'a PointCloud,
    pub wireframe: &'a Wireframe,
    pub camera: &'a Camera,
    pub viewport: Viewport,
    pub rotation: Rotation,
    pub style: &'a Style,
    pub elapsed: f64,
}

impl<'a> Frame<'a> {
    /// Cloud points rotated by the cloud angle and projected; culled points
    /// are skipped.
    pub fn projected_points(&self) -> impl Iterator<Item = Projected> + '_ {
        let angle = self.rotation.cloud;
        self.cloud
            .iter()
            .filter_map(move |p| self.camera.project(rotate_xy(p, angle), self.viewport))
    }

    /// Wireframe edges rotated by the wireframe yaw and projected; an edge is
    /// dropped if either end is culled.
    pub fn projected_edges(&self) -> impl Iterator<Item = (Projected, Projected)> + '_ {
        let angle = CloudAngle {
            x: 0.0,
            y: self.rotation.wireframe_y,
        };
        self.wireframe.segments().filter_map(move |(a, b)| {
            let pa = self.camera.project(rotate_xy(a, angle), self.viewport)?;
            let pb = self.camera.project(rotate_xy(b, angle), self.viewport)?;
            Some((pa, pb))
        })
    }
}

/// Draw target for the sphere
pub trait SphereRenderer {
    /// Surface changed size
    fn resize(&mut self, viewport: Viewport);

    /// Draw one frame. Must not block.
    fn draw(&mut self, frame: &Frame<'_>);
}
