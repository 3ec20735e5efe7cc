//! Perspective camera looking down -Z from a fixed distance

use super::driver::CloudAngle;

/// Pixel size of the rendering surface
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// width / height, None when either side is empty
    pub fn aspect(&self) -> Option<f32> {
        (self.width > 0.0 && self.height > 0.0).then(|| self.width / self.height)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// A point after projection to pixel space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub x: f32,
    pub y: f32,
    /// Distance in front of the camera (positive)
    pub depth: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Vertical field of view in degrees
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Camera position on +Z, looking at the origin
    pub distance: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
            distance: 2.5,
        }
    }
}

impl Camera {
    /// Update aspect for a new surface size. An empty surface keeps the
    /// previous aspect.
    pub fn resize(&mut self, viewport: Viewport) {
        if let Some(aspect) = viewport.aspect() {
            self.aspect = aspect;
        }
    }

    #[inline]
    fn tan_half_fov(&self) -> f32 {
        (self.fov_deg.to_radians() / 2.0).tan()
    }

    /// Project a world-space point onto `viewport`. None when the point falls
    /// outside the near/far range.
    pub fn project(&self, p: [f32; 3], viewport: Viewport) -> Option<Projected> {
        let depth = self.distance - p[2];
        if depth < self.near || depth > self.far {
            return None;
        }
        let half_h = depth * self.tan_half_fov();
        let ndc_x = p[0] / (half_h * self.aspect);
        let ndc_y = p[1] / half_h;
        Some(Projected {
            x: (ndc_x + 1.0) * 0.5 * viewport.width,
            y: (1.0 - ndc_y) * 0.5 * viewport.height,
            depth,
        })
    }

    /// Pixel size of a `size` world-unit sprite at `depth`, attenuated the
    /// same way point sprites are in the browser renderer.
    pub fn point_pixels(&self, size: f32, depth: f32, viewport: Viewport) -> f32 {
        if depth <= 0.0 {
            return 0.0;
        }
        size * (viewport.height * 0.5) / depth
    }
}

/// Rotate `p` by yaw `angle.y` around Y, then pitch `angle.x` around X.
#[inline]
pub fn rotate_xy(p: [f32; 3], angle: CloudAngle) -> [f32; 3] {
    let (sy, cy) = angle.y.sin_cos();
    let (sx, cx) = angle.x.sin_cos();

    let x = p[0] * cy + p[2] * sy;
    let z = -p[0] * sy + p[2] * cy;

    let y = p[1] * cx - z * sx;
    let z = p[1] * sx + z * cx;
    [x, y, z]
}
