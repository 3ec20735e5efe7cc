//! Particle sphere component
//!
//! Owns the sampled cloud, the wireframe, the camera and the rotation driver
//! state, and forwards one [`Frame`] per tick to its renderer. Constructing it
//! without a surface yields `None` and does nothing else.

use rand::RngCore;
use tracing::{debug, info, trace};

use crate::core::{
    sample_ball, Camera, DriverParams, DriverState, PointCloud, PointerOffset, Rotation,
    SphereConfig, Viewport, Wireframe,
};
use crate::render::{Frame, SphereRenderer, Style};

pub struct ParticleSphere<R> {
    cloud: PointCloud,
    wireframe: Wireframe,
    camera: Camera,
    viewport: Viewport,
    params: DriverParams,
    style: Style,
    state: DriverState,
    renderer: R,
}

impl<R: SphereRenderer> ParticleSphere<R> {
    /// Build the sphere on `surface`, sized to `viewport`.
    ///
    /// Returns None (and does no work) when `surface` is None.
    pub fn init<G: RngCore + ?Sized>(
        config: &SphereConfig,
        surface: Option<R>,
        viewport: Viewport,
        rng: &mut G,
    ) -> Option<Self> {
        let Some(mut renderer) = surface else {
            debug!("No rendering surface, particle sphere disabled");
            return None;
        };

        let cloud = sample_ball(rng, config.point_count, config.radius);
        let wireframe = Wireframe::icosphere(config.wireframe_radius, config.wireframe_detail);
        let mut camera = config.camera();
        camera.resize(viewport);
        renderer.resize(viewport);

        info!(
            points = cloud.len(),
            radius = config.radius,
            wire_vertices = wireframe.vertices().len(),
            wire_edges = wireframe.edges().len(),
            width = viewport.width,
            height = viewport.height,
            "Particle sphere initialized"
        );

        Some(Self {
            cloud,
            wireframe,
            camera,
            viewport,
            params: config.driver_params(),
            style: Style::from(config),
            state: DriverState::new(),
            renderer,
        })
    }

    /// Pointer moved to `(px, py)` inside a viewport of the given size.
    /// Only the pointer offset changes; rotation follows on the next frame.
    pub fn pointer_moved(&mut self, px: f32, py: f32, viewport: Viewport) {
        let offset = PointerOffset::from_viewport(
            px,
            py,
            viewport.width,
            viewport.height,
            self.params.pointer_scale,
        );
        trace!(x = offset.x, y = offset.y, "Pointer offset");
        self.state.set_pointer(offset);
    }

    /// Surface changed size: update projection and renderer output size
    pub fn resized(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.resize(viewport);
        self.renderer.resize(viewport);
        debug!(width = viewport.width, height = viewport.height, "Particle sphere resized");
    }

    /// Advance rotation to `elapsed` seconds and draw
    pub fn frame(&mut self, elapsed: f64) -> Rotation {
        let rotation = self.state.tick(elapsed, &self.params);
        let frame = Frame {
            cloud: &self.cloud,
            wireframe: &self.wireframe,
            camera: &self.camera,
            viewport: self.viewport,
            rotation,
            style: &self.style,
            elapsed,
        };
        self.renderer.draw(&frame);
        rotation
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    pub fn rotation(&self) -> Rotation {
        self.state.rotation
    }

    pub fn pointer(&self) -> PointerOffset {
        self.state.pointer
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::StatsRenderer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sphere(config: &SphereConfig) -> ParticleSphere<StatsRenderer> {
        let mut rng = StdRng::seed_from_u64(5);
        ParticleSphere::init(
            config,
            Some(StatsRenderer::new()),
            Viewport::new(800.0, 600.0),
            &mut rng,
        )
        .unwrap()
    }

    #[test]
    fn test_no_surface_disables() {
        let mut rng = StdRng::seed_from_u64(5);
        let s = ParticleSphere::<StatsRenderer>::init(
            &SphereConfig::default(),
            None,
            Viewport::new(800.0, 600.0),
            &mut rng,
        );
        assert!(s.is_none());
    }

    #[test]
    fn test_init_samples_and_sizes() {
        let s = sphere(&SphereConfig::default());
        assert_eq!(s.cloud().len(), 1200);
        assert_eq!(s.cloud().as_slice().len(), 3600);
        assert_eq!(s.renderer().resizes, 1);
        assert_eq!(s.renderer().viewport, Viewport::new(800.0, 600.0));
        assert!((s.camera().aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_frames_drive_renderer() {
        let mut s = sphere(&SphereConfig::default());
        for i in 1..=10 {
            s.frame(i as f64 / 60.0);
        }
        let stats = s.renderer();
        assert_eq!(stats.frames, 10);
        // Camera sits outside the 1.8 ball, so nothing is culled
        assert_eq!(stats.visible_points, 1200);
        assert_eq!(stats.culled_points, 0);
        assert_eq!(stats.visible_edges, 120);
        assert!(stats.bounds.is_some());
        assert_eq!(stats.rotation, s.rotation());
        assert!((stats.elapsed - 10.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_pointer_does_not_touch_wireframe() {
        let mut a = sphere(&SphereConfig::default());
        let mut b = sphere(&SphereConfig::default());
        b.pointer_moved(0.0, 0.0, Viewport::new(800.0, 600.0));
        assert!((b.pointer().x + 0.2).abs() < 1e-6);
        assert!((b.pointer().y + 0.15).abs() < 1e-6);

        let ra = a.frame(3.0);
        let rb = b.frame(3.0);
        assert_eq!(ra.wireframe_y, rb.wireframe_y);
        assert_ne!(ra.cloud, rb.cloud);
    }

    #[test]
    fn test_pointer_waits_for_next_frame() {
        let mut s = sphere(&SphereConfig::default());
        s.frame(1.0);
        let before = s.rotation();
        s.pointer_moved(800.0, 600.0, Viewport::new(800.0, 600.0));
        assert_eq!(s.rotation(), before);
    }

    #[test]
    fn test_resize_updates_camera_and_renderer() {
        let mut s = sphere(&SphereConfig::default());
        s.resized(Viewport::new(1920.0, 1080.0));
        assert!((s.camera().aspect - 1920.0 / 1080.0).abs() < 1e-6);
        assert_eq!(s.renderer().resizes, 2);
        assert_eq!(s.renderer().viewport.width, 1920.0);
    }

    #[test]
    fn test_empty_cloud_renders_nothing() {
        let config = SphereConfig {
            point_count: 0,
            ..SphereConfig::default()
        };
        let mut s = sphere(&config);
        s.frame(0.5);
        assert_eq!(s.renderer().visible_points, 0);
        assert_eq!(s.renderer().bounds, None);
        assert_eq!(s.renderer().frames, 1);
    }
}
