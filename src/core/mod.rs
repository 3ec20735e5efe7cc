//! Platform-agnostic core - shared between the browser build and the CLI

pub mod camera;
pub mod config;
pub mod driver;
pub mod form;
pub mod sampler;
pub mod wireframe;

pub use camera::{rotate_xy, Camera, Projected, Viewport};
pub use config::SphereConfig;
pub use driver::{CloudAngle, DriverParams, DriverState, FrameClock, PointerOffset, Rotation};
pub use form::{validate_lead, Captcha, FormError, LeadForm};
pub use sampler::{sample_ball, PointCloud};
pub use wireframe::Wireframe;
