//! Rotation driver for the particle sphere
//!
//! Per frame, the wireframe spins at a constant rate while the point cloud
//! eases toward a target that mixes constant spin with the pointer offset.

/// Angular velocities and easing for [`DriverState::tick`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriverParams {
    /// Baseline yaw rate of the point cloud (rad/s)
    pub cloud_spin: f32,
    /// Yaw rate of the wireframe (rad/s)
    pub wireframe_spin: f32,
    /// Easing factor k in `x += (target - x) * k`
    pub easing: f32,
    /// Pixel-to-radian scale for the pointer offset
    pub pointer_scale: f32,
}

impl Default for DriverParams {
    fn default() -> Self {
        Self {
            cloud_spin: 0.1,
            wireframe_spin: 0.1,
            easing: 0.05,
            pointer_scale: 0.0005,
        }
    }
}

/// Pointer offset from the viewport center, already scaled to radian range
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerOffset {
    pub x: f32,
    pub y: f32,
}

impl PointerOffset {
    /// Offset of pointer `(px, py)` from the center of a `width` x `height`
    /// viewport, multiplied by `scale`.
    pub fn from_viewport(px: f32, py: f32, width: f32, height: f32, scale: f32) -> Self {
        Self {
            x: (px - width / 2.0) * scale,
            y: (py - height / 2.0) * scale,
        }
    }
}

/// Pitch/yaw of the point cloud
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CloudAngle {
    pub x: f32,
    pub y: f32,
}

/// Rotation state exposed to renderers
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    pub cloud: CloudAngle,
    pub wireframe_y: f32,
}

/// Mutable per-instance driver state
#[derive(Clone, Debug, Default)]
pub struct DriverState {
    /// Seconds since start, as of the last tick
    pub elapsed: f64,
    /// Last observed pointer offset
    pub pointer: PointerOffset,
    pub rotation: Rotation,
}

impl DriverState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer-move. Rotation is only touched on the next tick.
    pub fn set_pointer(&mut self, pointer: PointerOffset) {
        self.pointer = pointer;
    }

    /// Target yaw the cloud eases toward at `elapsed`
    #[inline]
    pub fn cloud_target_y(&self, elapsed: f64, params: &DriverParams) -> f32 {
        (elapsed * params.cloud_spin as f64) as f32 + self.pointer.x
    }

    /// Advance one frame
    pub fn tick(&mut self, elapsed: f64, params: &DriverParams) -> Rotation {
        self.elapsed = elapsed;

        let k = params.easing;
        let target_y = self.cloud_target_y(elapsed, params);
        let target_x = self.pointer.y;

        let rot = &mut self.rotation;
        rot.wireframe_y = (elapsed * params.wireframe_spin as f64) as f32;
        rot.cloud.y += (target_y - rot.cloud.y) * k;
        rot.cloud.x += (target_x - rot.cloud.x) * k;

        self.rotation
    }
}

/// Converts host timestamps (seconds) into elapsed seconds since the first
/// observation.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    start: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock that already started at `start`
    pub fn started_at(start: f64) -> Self {
        Self { start: Some(start) }
    }

    /// Elapsed seconds at host time `now`. Never negative.
    pub fn elapsed(&mut self, now: f64) -> f64 {
        let start = *self.start.get_or_insert(now);
        (now - start).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_offset_from_viewport_center() {
        let p = PointerOffset::from_viewport(500.0, 300.0, 1000.0, 600.0, 0.0005);
        assert_eq!(p, PointerOffset::default());

        let p = PointerOffset::from_viewport(1000.0, 0.0, 1000.0, 600.0, 0.0005);
        assert!((p.x - 0.25).abs() < 1e-6);
        assert!((p.y + 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_easing_converges_geometrically() {
        let params = DriverParams::default();
        let mut state = DriverState::new();
        state.set_pointer(PointerOffset { x: 0.3, y: -0.2 });

        // Frozen clock: target is just the pointer offset
        let elapsed = 0.0;
        let target_y = state.cloud_target_y(elapsed, &params);
        let target_x = -0.2f32;

        let mut prev_gap_y = (target_y - state.rotation.cloud.y).abs();
        let mut prev_gap_x = (target_x - state.rotation.cloud.x).abs();
        for _ in 0..200 {
            let rot = state.tick(elapsed, &params);
            let gap_y = (target_y - rot.cloud.y).abs();
            let gap_x = (target_x - rot.cloud.x).abs();

            assert!(gap_y < prev_gap_y);
            assert!(gap_x < prev_gap_x);
            assert!((gap_y - prev_gap_y * (1.0 - params.easing)).abs() < 1e-6);
            assert!((gap_x - prev_gap_x * (1.0 - params.easing)).abs() < 1e-6);

            prev_gap_y = gap_y;
            prev_gap_x = gap_x;
        }
        assert!(prev_gap_y < 1e-4);
        assert!(prev_gap_x < 1e-4);
    }

    #[test]
    fn test_wireframe_depends_only_on_elapsed() {
        let params = DriverParams::default();

        let mut a = DriverState::new();
        a.set_pointer(PointerOffset { x: 0.4, y: 0.1 });
        let mut b = DriverState::new();
        b.set_pointer(PointerOffset { x: -0.7, y: 0.9 });

        for elapsed in [0.0, 1.5, 12.25] {
            let ra = a.tick(elapsed, &params);
            let rb = b.tick(elapsed, &params);
            assert_eq!(ra.wireframe_y, rb.wireframe_y);
            assert!((ra.wireframe_y - elapsed as f32 * 0.1).abs() < 1e-6);
        }
    }

    #[test]
    fn test_cloud_spins_without_pointer() {
        let params = DriverParams::default();
        let mut state = DriverState::new();
        let mut last = 0.0;
        for frame in 1..=600 {
            let elapsed = frame as f64 / 60.0;
            let rot = state.tick(elapsed, &params);
            assert!(rot.cloud.y > last);
            assert_eq!(rot.cloud.x, 0.0);
            last = rot.cloud.y;
        }
        // Lags behind the 1.0 rad target at t = 10s but follows it
        assert!(last > 0.5 && last < 1.0, "yaw after 10s = {}", last);
    }

    #[test]
    fn test_frame_clock() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.elapsed(100.0), 0.0);
        assert_eq!(clock.elapsed(101.5), 1.5);
        assert_eq!(clock.elapsed(99.0), 0.0);

        let mut clock = FrameClock::started_at(10.0);
        assert_eq!(clock.elapsed(12.0), 2.0);
    }
}
