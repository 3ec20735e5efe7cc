//! Sphere palette and CSS color helpers

/// Default palette (0xRRGGBB)
pub mod colors {
    pub const POINT: u32 = 0x2563EB;     // blue-600, particles
    pub const WIREFRAME: u32 = 0x0EA5E9; // sky-500, icosphere lines

    pub const POINT_OPACITY: f32 = 0.8;
    pub const WIREFRAME_OPACITY: f32 = 0.1;
}

/// Split 0xRRGGBB into channels
pub fn rgb(hex: u32) -> (u8, u8, u8) {
    (((hex >> 16) & 0xFF) as u8, ((hex >> 8) & 0xFF) as u8, (hex & 0xFF) as u8)
}

/// `rgba(r, g, b, a)` string for canvas fill/stroke styles
pub fn css_rgba(hex: u32, alpha: f32) -> String {
    let (r, g, b) = rgb(hex);
    format!("rgba({}, {}, {}, {:.3})", r, g, b, alpha.clamp(0.0, 1.0))
}
