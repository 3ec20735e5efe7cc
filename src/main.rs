//! Headless runner for the particle sphere
//!
//! Run with: cargo run --features cli --bin sphere-cli
//!
//! Environment:
//! - SPHERE_CONFIG: JSON config file (defaults otherwise)
//! - SPHERE_SECONDS: how long to run (default 5)
//! - SPHERE_DUMP: write the sampled point buffer as JSON to this path
//! - RUST_LOG: log filter

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use particle_sphere::{
        FrameLoop, ParticleSphere, SphereConfig, StatsRenderer, Viewport, DEFAULT_FRAME_PERIOD,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tracing::{info, warn};
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,particle_sphere=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = match std::env::var("SPHERE_CONFIG") {
        Ok(path) => SphereConfig::load(&PathBuf::from(path))?,
        Err(_) => SphereConfig::default(),
    };
    let seconds: f64 = std::env::var("SPHERE_SECONDS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5.0);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let viewport = Viewport::new(1280.0, 720.0);
    let Some(sphere) = ParticleSphere::init(&config, Some(StatsRenderer::new()), viewport, &mut rng)
    else {
        warn!("No surface, nothing to run");
        return Ok(());
    };

    if let Ok(path) = std::env::var("SPHERE_DUMP") {
        let points: Vec<[f32; 3]> = sphere.cloud().iter().collect();
        std::fs::write(&path, serde_json::to_string(&points)?)?;
        info!(path = %path, points = points.len(), "Point buffer written");
    }

    let sphere = Arc::new(Mutex::new(sphere));
    let s = sphere.clone();
    let frame_loop = FrameLoop::spawn(DEFAULT_FRAME_PERIOD, move |elapsed| {
        if let Ok(mut sphere) = s.lock() {
            sphere.frame(elapsed);
        }
    });

    let start = std::time::Instant::now();
    let deadline = tokio::time::sleep(Duration::from_secs_f64(seconds.max(0.0)));
    tokio::pin!(deadline);
    let mut pointer_interval = tokio::time::interval(Duration::from_millis(50));
    let mut stats_interval = tokio::time::interval(Duration::from_secs(1));
    let (cx, cy) = viewport.center();

    info!(seconds, "Running particle sphere");

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            _ = pointer_interval.tick() => {
                // Sweep a simulated pointer around the viewport center
                let t = start.elapsed().as_secs_f32() * 0.8;
                let (px, py) = (cx + t.cos() * cx * 0.6, cy + t.sin() * cy * 0.6);
                if let Ok(mut sphere) = sphere.lock() {
                    sphere.pointer_moved(px, py, viewport);
                }
            }
            _ = stats_interval.tick() => {
                if let Ok(sphere) = sphere.lock() {
                    let stats = sphere.renderer();
                    info!(
                        frames = stats.frames,
                        visible = stats.visible_points,
                        culled = stats.culled_points,
                        edges = stats.visible_edges,
                        yaw = format!("{:.3}", stats.rotation.cloud.y),
                        pitch = format!("{:.3}", stats.rotation.cloud.x),
                        wire_yaw = format!("{:.3}", stats.rotation.wireframe_y),
                        "stats"
                    );
                }
            }
        }
    }

    let frames = frame_loop.cancel().await;
    let secs = start.elapsed().as_secs_f64();
    info!(
        frames,
        fps = format!("{:.1}", frames as f64 / secs.max(f64::EPSILON)),
        "Stopped"
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
