//! Volumetric point sampler
//!
//! Fills a ball of radius R with N points of uniform volumetric density.
//! Points are stored as one flat `[x0, y0, z0, x1, y1, z1, ...]` buffer that
//! renderers read directly.

use rand::{Rng, RngCore};
use std::f32::consts::TAU;

/// Immutable point cloud produced by [`sample_ball`].
///
/// Length of the backing buffer is always exactly `3 * len()`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    positions: Vec<f32>,
}

impl PointCloud {
    /// Number of points
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Flat coordinate buffer, 3 floats per point
    pub fn as_slice(&self) -> &[f32] {
        &self.positions
    }

    /// Point `i` as `[x, y, z]`, or None if out of range
    #[inline]
    pub fn point(&self, i: usize) -> Option<[f32; 3]> {
        let p = self.positions.get(i * 3..i * 3 + 3)?;
        Some([p[0], p[1], p[2]])
    }

    /// Iterate points as `[x, y, z]` triples
    pub fn iter(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.positions.chunks_exact(3).map(|p| [p[0], p[1], p[2]])
    }
}

/// Draw one point uniformly from the ball of `radius`.
///
/// Consumes exactly three uniform draws, in order: radius, azimuth, polar.
#[inline]
pub fn sample_point<R: RngCore + ?Sized>(rng: &mut R, radius: f32) -> [f32; 3] {
    let u: f64 = rng.gen();
    let u_theta: f64 = rng.gen();
    let u_phi: f64 = rng.gen();

    // cbrt: shell volume grows with r², linear u would crowd the center
    let r = radius * (u as f32).cbrt();
    let theta = TAU * u_theta as f32;
    // arccos: linear polar angle would crowd the poles
    let phi = (2.0 * u_phi as f32 - 1.0).clamp(-1.0, 1.0).acos();

    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    [
        r * sin_phi * cos_theta,
        r * sin_phi * sin_theta,
        r * cos_phi,
    ]
}

/// Sample `count` points uniformly by volume inside the ball of `radius`
/// centered at the origin.
///
/// `count == 0` gives an empty cloud. `radius == 0.0` collapses every point
/// to the origin.
pub fn sample_ball<R: RngCore + ?Sized>(rng: &mut R, count: usize, radius: f32) -> PointCloud {
    let mut positions = Vec::with_capacity(count * 3);
    for _ in 0..count {
        positions.extend_from_slice(&sample_point(rng, radius));
    }
    PointCloud { positions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// RNG replaying a fixed cycle of u64 words.
    ///
    /// `rand` maps a u64 word `w` to the f64 `(w >> 11) * 2^-53`, so `1 << 63`
    /// yields exactly 0.5 and `0` yields 0.0.
    struct CycleRng {
        words: Vec<u64>,
        next: usize,
    }

    impl CycleRng {
        fn new(words: &[u64]) -> Self {
            Self { words: words.to_vec(), next: 0 }
        }
    }

    impl RngCore for CycleRng {
        fn next_u32(&mut self) -> u32 {
            (self.next_u64() >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            let w = self.words[self.next % self.words.len()];
            self.next += 1;
            w
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    const HALF: u64 = 1 << 63;

    #[test]
    fn test_buffer_length_is_three_per_point() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in [0usize, 1, 2, 17, 1200] {
            let cloud = sample_ball(&mut rng, n, 1.8);
            assert_eq!(cloud.as_slice().len(), 3 * n);
            assert_eq!(cloud.len(), n);
            assert_eq!(cloud.iter().count(), n);
        }
    }

    #[test]
    fn test_empty_cloud() {
        let mut rng = StdRng::seed_from_u64(1);
        let cloud = sample_ball(&mut rng, 0, 1.0);
        assert!(cloud.is_empty());
        assert_eq!(cloud.point(0), None);
    }

    #[test]
    fn test_points_inside_radius() {
        let mut rng = StdRng::seed_from_u64(42);
        let radius = 1.8;
        let cloud = sample_ball(&mut rng, 20_000, radius);
        for [x, y, z] in cloud.iter() {
            let d = (x * x + y * y + z * z).sqrt();
            assert!(d <= radius + 1e-5, "point at distance {} outside radius {}", d, radius);
        }
    }

    #[test]
    fn test_zero_radius_collapses_to_origin() {
        let mut rng = StdRng::seed_from_u64(3);
        let cloud = sample_ball(&mut rng, 50, 0.0);
        assert!(cloud.iter().all(|p| p.iter().all(|c| *c == 0.0)));
    }

    #[test]
    fn test_volumetric_uniformity() {
        let mut rng = StdRng::seed_from_u64(2024);
        let n = 100_000;
        let cloud = sample_ball(&mut rng, n, 1.0);

        // r³ should be uniform on [0, 1]: each of 10 bins holds ~10%
        let mut r3_bins = [0usize; 10];
        // cos φ = z / r should be uniform on [-1, 1]
        let mut cos_bins = [0usize; 10];
        for [x, y, z] in cloud.iter() {
            let r = (x * x + y * y + z * z).sqrt();
            let r3 = r * r * r;
            r3_bins[((r3 * 10.0) as usize).min(9)] += 1;
            if r > 0.0 {
                let c = z / r;
                cos_bins[(((c + 1.0) * 5.0) as usize).min(9)] += 1;
            }
        }

        let expected = n as f64 / 10.0;
        for (i, &count) in r3_bins.iter().enumerate() {
            let dev = (count as f64 - expected).abs() / expected;
            assert!(dev < 0.05, "r³ bin {} off by {:.3}", i, dev);
        }
        for (i, &count) in cos_bins.iter().enumerate() {
            let dev = (count as f64 - expected).abs() / expected;
            assert!(dev < 0.05, "cos φ bin {} off by {:.3}", i, dev);
        }
    }

    #[test]
    fn test_fixed_source_gives_identical_points() {
        // u = 0.5, u_θ = 0.0, u_φ = 0.5 for every point
        let mut rng = CycleRng::new(&[HALF, 0, HALF]);
        let cloud = sample_ball(&mut rng, 4, 1.0);
        assert_eq!(cloud.len(), 4);

        let r = 0.5f32.cbrt();
        for [x, y, z] in cloud.iter() {
            assert!((x - r).abs() < 1e-6, "x = {}", x);
            assert!(y.abs() < 1e-6, "y = {}", y);
            assert!(z.abs() < 1e-6, "z = {}", z);
        }
        assert_eq!(cloud.point(0), cloud.point(3));
    }

    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let a = sample_ball(&mut StdRng::seed_from_u64(99), 64, 1.8);
        let b = sample_ball(&mut StdRng::seed_from_u64(99), 64, 1.8);
        assert_eq!(a, b);
    }
}
