//! HTML canvas 2D renderer

use tracing::{debug, warn};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Frame, SphereRenderer};
use crate::core::Viewport;
use crate::theme::css_rgba;

/// Draws the sphere into a `<canvas>` with the 2D context.
///
/// The backing store is scaled by the device pixel ratio; drawing happens in
/// CSS pixels.
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pixel_ratio: f64,
    viewport: Viewport,
    /// Cached style strings, rebuilt only when the style changes
    point_style: String,
    edge_style: String,
    style_key: Option<(u32, u32, u32, u32)>,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d, pixel_ratio: f64) -> Self {
        Self {
            canvas,
            ctx,
            pixel_ratio: if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 },
            viewport: Viewport::default(),
            point_style: String::new(),
            edge_style: String::new(),
            style_key: None,
        }
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn refresh_styles(&mut self, frame: &Frame<'_>) {
        let s = frame.style;
        let key = (
            s.point_color,
            s.point_opacity.to_bits(),
            s.wireframe_color,
            s.wireframe_opacity.to_bits(),
        );
        if self.style_key != Some(key) {
            self.point_style = css_rgba(s.point_color, s.point_opacity);
            self.edge_style = css_rgba(s.wireframe_color, s.wireframe_opacity);
            self.style_key = Some(key);
        }
    }
}

impl SphereRenderer for CanvasRenderer {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let w = (viewport.width as f64 * self.pixel_ratio).round().max(1.0) as u32;
        let h = (viewport.height as f64 * self.pixel_ratio).round().max(1.0) as u32;
        self.canvas.set_width(w);
        self.canvas.set_height(h);

        let css = format!(
            "display:block;width:{}px;height:{}px",
            viewport.width, viewport.height
        );
        if let Err(e) = self.canvas.set_attribute("style", &css) {
            warn!(?e, "Failed to size canvas");
        }
        // Resizing resets the transform
        if let Err(e) = self
            .ctx
            .set_transform(self.pixel_ratio, 0.0, 0.0, self.pixel_ratio, 0.0, 0.0)
        {
            warn!(?e, "Failed to set canvas transform");
        }
        debug!(width = w, height = h, ratio = self.pixel_ratio, "Canvas resized");
    }

    fn draw(&mut self, frame: &Frame<'_>) {
        self.refresh_styles(frame);
        let ctx = &self.ctx;
        ctx.clear_rect(
            0.0,
            0.0,
            self.viewport.width as f64,
            self.viewport.height as f64,
        );

        // Wireframe: one path for all edges
        ctx.set_stroke_style_str(&self.edge_style);
        ctx.set_line_width(1.0);
        ctx.begin_path();
        for (a, b) in frame.projected_edges() {
            ctx.move_to(a.x as f64, a.y as f64);
            ctx.line_to(b.x as f64, b.y as f64);
        }
        ctx.stroke();

        // Particles: squares sized by perspective
        ctx.set_fill_style_str(&self.point_style);
        let size = frame.style.point_size;
        for p in frame.projected_points() {
            let px = frame.camera.point_pixels(size, p.depth, frame.viewport).max(1.0) as f64;
            ctx.fill_rect(p.x as f64 - px / 2.0, p.y as f64 - px / 2.0, px, px);
        }
    }
}
