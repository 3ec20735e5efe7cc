//! Sphere configuration
//!
//! Defaults reproduce the hero sphere of the landing page. Every field may be
//! overridden from JSON; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use super::camera::Camera;
use super::driver::DriverParams;
use crate::errors::SphereError;
use crate::theme::colors;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    /// Number of particles
    pub point_count: usize,
    /// Radius of the particle ball
    pub radius: f32,
    /// Particle size in world units
    pub point_size: f32,
    pub point_color: u32,
    pub point_opacity: f32,

    pub wireframe_radius: f32,
    pub wireframe_detail: u32,
    pub wireframe_color: u32,
    pub wireframe_opacity: f32,

    /// Cloud baseline yaw rate (rad/s)
    pub cloud_spin: f32,
    /// Wireframe yaw rate (rad/s)
    pub wireframe_spin: f32,
    pub easing: f32,
    pub pointer_scale: f32,

    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub camera_distance: f32,

    /// Fixed sampler seed; entropy when None
    pub seed: Option<u64>,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            point_count: 1200,
            radius: 1.8,
            point_size: 0.012,
            point_color: colors::POINT,
            point_opacity: colors::POINT_OPACITY,
            wireframe_radius: 1.2,
            wireframe_detail: 1,
            wireframe_color: colors::WIREFRAME,
            wireframe_opacity: colors::WIREFRAME_OPACITY,
            cloud_spin: 0.1,
            wireframe_spin: 0.1,
            easing: 0.05,
            pointer_scale: 0.0005,
            fov_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_distance: 2.5,
            seed: None,
        }
    }
}

impl SphereConfig {
    pub fn from_json(json: &str) -> Result<Self, SphereError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self, SphereError> {
        if !path.exists() {
            return Err(SphereError::ConfigNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        debug!(path = %path.display(), points = config.point_count, "Loaded sphere config");
        Ok(config)
    }

    pub fn driver_params(&self) -> DriverParams {
        DriverParams {
            cloud_spin: self.cloud_spin,
            wireframe_spin: self.wireframe_spin,
            easing: self.easing,
            pointer_scale: self.pointer_scale,
        }
    }

    /// Camera with aspect 1.0; callers resize it to the surface
    pub fn camera(&self) -> Camera {
        Camera {
            fov_deg: self.fov_deg,
            aspect: 1.0,
            near: self.near,
            far: self.far,
            distance: self.camera_distance,
        }
    }
}
