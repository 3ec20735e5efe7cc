//! Wireframe icosphere drawn around the point cloud
//!
//! Icosahedron faces are split into `(detail + 1)²` triangles and every vertex
//! is pushed out to the sphere. Only unique vertices and unique edges are
//! kept, since the renderer draws lines.

use std::collections::{BTreeSet, HashMap};

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

fn icosahedron_vertices() -> [[f64; 3]; 12] {
    let t = (1.0 + 5f64.sqrt()) / 2.0;
    [
        [-1.0, t, 0.0], [1.0, t, 0.0], [-1.0, -t, 0.0], [1.0, -t, 0.0],
        [0.0, -1.0, t], [0.0, 1.0, t], [0.0, -1.0, -t], [0.0, 1.0, -t],
        [t, 0.0, -1.0], [t, 0.0, 1.0], [-t, 0.0, -1.0], [-t, 0.0, 1.0],
    ]
}

#[inline]
fn lerp(a: [f64; 3], b: [f64; 3], t: f64) -> [f64; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// Line geometry of a subdivided icosahedron
#[derive(Clone, Debug, Default)]
pub struct Wireframe {
    vertices: Vec<[f32; 3]>,
    edges: Vec<(u32, u32)>,
}

/// Deduplicates subdivided vertices shared between faces
struct VertexWelder {
    radius: f64,
    index: HashMap<[i64; 3], u32>,
    vertices: Vec<[f32; 3]>,
}

impl VertexWelder {
    fn weld(&mut self, p: [f64; 3]) -> u32 {
        let len = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
        let s = if len > 0.0 { 1.0 / len } else { 0.0 };
        let unit = [p[0] * s, p[1] * s, p[2] * s];
        let key = unit.map(|c| (c * 1e6).round() as i64);

        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.vertices.len() as u32;
        let radius = self.radius;
        self.vertices.push(unit.map(|c| (c * radius) as f32));
        self.index.insert(key, idx);
        idx
    }
}

impl Wireframe {
    /// Icosphere of `radius` with `detail` subdivision levels
    pub fn icosphere(radius: f32, detail: u32) -> Self {
        let base = icosahedron_vertices();
        let cols = detail as usize + 1;

        let mut welder = VertexWelder {
            radius: radius as f64,
            index: HashMap::new(),
            vertices: Vec::new(),
        };
        let mut edges = BTreeSet::new();
        let mut add_tri = |a: u32, b: u32, c: u32| {
            for (p, q) in [(a, b), (b, c), (c, a)] {
                edges.insert((p.min(q), p.max(q)));
            }
        };

        for face in ICOSAHEDRON_FACES {
            let [a, b, c] = face.map(|i| base[i]);

            // grid[i][j]: row i from edge ab toward c, j across the row
            let mut grid: Vec<Vec<u32>> = Vec::with_capacity(cols + 1);
            for i in 0..=cols {
                let t = i as f64 / cols as f64;
                let aj = lerp(a, c, t);
                let bj = lerp(b, c, t);
                let rows = cols - i;
                let row = (0..=rows)
                    .map(|j| {
                        if rows == 0 {
                            welder.weld(aj)
                        } else {
                            welder.weld(lerp(aj, bj, j as f64 / rows as f64))
                        }
                    })
                    .collect();
                grid.push(row);
            }

            for i in 0..cols {
                for j in 0..(2 * (cols - i) - 1) {
                    let k = j / 2;
                    if j % 2 == 0 {
                        add_tri(grid[i][k + 1], grid[i + 1][k], grid[i][k]);
                    } else {
                        add_tri(grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]);
                    }
                }
            }
        }

        Self {
            vertices: welder.vertices,
            edges: edges.into_iter().collect(),
        }
    }

    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    /// Vertex index pairs, each edge once with the lower index first
    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    /// Edge endpoints as coordinates
    pub fn segments(&self) -> impl Iterator<Item = ([f32; 3], [f32; 3])> + '_ {
        self.edges
            .iter()
            .map(|&(a, b)| (self.vertices[a as usize], self.vertices[b as usize]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icosahedron_counts() {
        let w = Wireframe::icosphere(1.0, 0);
        assert_eq!(w.vertices().len(), 12);
        assert_eq!(w.edges().len(), 30);
    }

    #[test]
    fn test_subdivided_counts() {
        let w = Wireframe::icosphere(1.2, 1);
        assert_eq!(w.vertices().len(), 42);
        assert_eq!(w.edges().len(), 120);

        let w = Wireframe::icosphere(1.2, 2);
        assert_eq!(w.vertices().len(), 92);
        assert_eq!(w.edges().len(), 270);
    }

    #[test]
    fn test_vertices_on_sphere() {
        let radius = 1.2;
        let w = Wireframe::icosphere(radius, 1);
        for v in w.vertices() {
            let d = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((d - radius).abs() < 1e-5, "vertex at {}", d);
        }
    }

    #[test]
    fn test_edges_are_unique_and_ordered() {
        let w = Wireframe::icosphere(1.0, 1);
        for &(a, b) in w.edges() {
            assert!(a < b);
            assert!((b as usize) < w.vertices().len());
        }
        let unique: BTreeSet<_> = w.edges().iter().collect();
        assert_eq!(unique.len(), w.edges().len());
        assert_eq!(w.segments().count(), w.edges().len());
    }
}
