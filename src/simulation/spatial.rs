//! Proximity edge search.
//!
//! Two strategies produce the same edge set:
//! 1. All pairs: every unordered pair `i < j`, checked once.
//! 2. Grid: particles are bucketed into square cells as wide as the
//!    threshold, so only the home cell and its forward neighbours need to be
//!    compared. Each unordered pair is still visited exactly once.

use super::network_config::{EdgeStrategy, NetworkConfig};
use crate::resources::{Edge, Particle, SurfaceSize};

/// Visit every proximity edge of `particles` using the configured strategy.
pub fn for_each_edge<F>(
    particles: &[Particle],
    size: SurfaceSize,
    config: &NetworkConfig,
    visit: F,
) where
    F: FnMut(Edge),
{
    match config.edge_strategy {
        EdgeStrategy::AllPairs => all_pairs(particles, config, visit),
        EdgeStrategy::Grid => SpatialGrid::build(particles, size, config.proximity_threshold)
            .for_each_edge(particles, config, visit),
    }
}

/// Collect every proximity edge into a vector.
pub fn collect_edges(
    particles: &[Particle],
    size: SurfaceSize,
    config: &NetworkConfig,
) -> Vec<Edge> {
    let mut edges = Vec::new();
    for_each_edge(particles, size, config, |edge| edges.push(edge));
    edges
}

fn all_pairs<F: FnMut(Edge)>(particles: &[Particle], config: &NetworkConfig, mut visit: F) {
    for (i, a) in particles.iter().enumerate() {
        for (j, b) in particles.iter().enumerate().skip(i + 1) {
            test_pair(i, a, j, b, config, &mut visit);
        }
    }
}

#[inline]
fn test_pair<F: FnMut(Edge)>(
    i: usize,
    a: &Particle,
    j: usize,
    b: &Particle,
    config: &NetworkConfig,
    visit: &mut F,
) {
    let distance = a.distance(b);
    if let Some(opacity) = config.edge_opacity(distance) {
        let (a, b) = if i < j { (i, j) } else { (j, i) };
        visit(Edge { a, b, distance, opacity });
    }
}

/// Uniform bucket grid over the surface.
///
/// Particles overshooting the surface by a frame land in the border cells.
#[derive(Debug)]
pub struct SpatialGrid {
    cell_size: f32,
    columns: usize,
    rows: usize,
    /// Particle indices per cell, row-major
    cells: Vec<Vec<usize>>,
}

/// Right, bottom-left, bottom, bottom-right: half of the 8-neighbourhood,
/// so each pair of adjacent cells is compared from one side only.
const FORWARD_NEIGHBOURS: [(isize, isize); 4] = [(1, 0), (-1, 1), (0, 1), (1, 1)];

impl SpatialGrid {
    pub fn build(particles: &[Particle], size: SurfaceSize, cell_size: f32) -> Self {
        let cell_size = if cell_size > 0.0 { cell_size } else { 1.0 };
        let columns = ((size.width as f32 / cell_size).ceil() as usize).max(1);
        let rows = ((size.height as f32 / cell_size).ceil() as usize).max(1);

        let mut grid = Self {
            cell_size,
            columns,
            rows,
            cells: vec![Vec::new(); columns * rows],
        };
        for (index, particle) in particles.iter().enumerate() {
            let cell = grid.cell_of(particle);
            grid.cells[cell].push(index);
        }
        grid
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn cell_of(&self, particle: &Particle) -> usize {
        let column = Self::axis_cell(particle.pos[0], self.cell_size, self.columns);
        let row = Self::axis_cell(particle.pos[1], self.cell_size, self.rows);
        row * self.columns + column
    }

    fn axis_cell(coordinate: f32, cell_size: f32, cells: usize) -> usize {
        let cell = (coordinate / cell_size).floor();
        if cell.is_nan() || cell < 0.0 {
            0
        } else {
            (cell as usize).min(cells - 1)
        }
    }

    pub fn for_each_edge<F: FnMut(Edge)>(
        &self,
        particles: &[Particle],
        config: &NetworkConfig,
        mut visit: F,
    ) {
        for row in 0..self.rows {
            for column in 0..self.columns {
                let home = &self.cells[row * self.columns + column];

                for (k, &i) in home.iter().enumerate() {
                    for &j in &home[k + 1..] {
                        test_pair(i, &particles[i], j, &particles[j], config, &mut visit);
                    }
                }

                for (dc, dr) in FORWARD_NEIGHBOURS {
                    let (Some(c), Some(r)) =
                        (column.checked_add_signed(dc), row.checked_add_signed(dr))
                    else {
                        continue;
                    };
                    if c >= self.columns || r >= self.rows {
                        continue;
                    }
                    let neighbour = &self.cells[r * self.columns + c];
                    for &i in home {
                        for &j in neighbour {
                            test_pair(i, &particles[i], j, &particles[j], config, &mut visit);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::field::ParticleField;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(x: f32, y: f32) -> Particle {
        Particle::new([x, y], [0.0, 0.0], 1.0)
    }

    fn sorted_pairs(mut edges: Vec<Edge>) -> Vec<(usize, usize)> {
        edges.sort_by_key(|e| (e.a, e.b));
        edges.into_iter().map(|e| (e.a, e.b)).collect()
    }

    #[test]
    fn exactly_threshold_apart_has_no_edge() {
        let config = NetworkConfig::default();
        let particles = [at(10.0, 10.0), at(130.0, 10.0)];
        assert!(collect_edges(&particles, SurfaceSize::new(200, 200), &config).is_empty());
    }

    #[test]
    fn just_inside_threshold_has_faint_edge() {
        let config = NetworkConfig::default();
        let particles = [at(0.0, 0.0), at(72.0, 96.0)]; // 3-4-5 triangle, d = 120
        assert!(collect_edges(&particles, SurfaceSize::new(200, 200), &config).is_empty());

        let particles = [at(0.0, 0.0), at(0.0, 119.0)];
        let edges = collect_edges(&particles, SurfaceSize::new(200, 200), &config);
        assert_eq!(edges.len(), 1);
        assert!(edges[0].opacity > 0.0 && edges[0].opacity < 0.01);
    }

    #[test]
    fn pairs_are_unique_and_never_self() {
        let config = NetworkConfig::default();
        let particles = [at(0.0, 0.0), at(1.0, 0.0), at(2.0, 0.0)];
        let edges = collect_edges(&particles, SurfaceSize::new(10, 10), &config);
        assert_eq!(sorted_pairs(edges), vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn grid_matches_all_pairs() {
        let mut rng = StdRng::seed_from_u64(2024);
        let size = SurfaceSize::new(1600, 900);
        let all = NetworkConfig::default();
        let grid = NetworkConfig {
            edge_strategy: EdgeStrategy::Grid,
            ..NetworkConfig::default()
        };

        for _ in 0..5 {
            let mut field = ParticleField::seed(size, &all, &mut rng);
            // push a few particles past the walls, as a mid-bounce frame would
            if let Some(p) = field.particles_mut().first_mut() {
                p.pos = [-0.3, 900.2];
            }
            let expected = sorted_pairs(collect_edges(field.particles(), size, &all));
            let actual = sorted_pairs(collect_edges(field.particles(), size, &grid));
            assert!(!expected.is_empty());
            assert_eq!(expected, actual);
        }
    }

    #[test]
    fn grid_covers_surface() {
        let grid = SpatialGrid::build(&[], SurfaceSize::new(250, 120), 120.0);
        assert_eq!((grid.columns(), grid.rows()), (3, 1));
        let grid = SpatialGrid::build(&[], SurfaceSize::new(0, 0), 120.0);
        assert_eq!((grid.columns(), grid.rows()), (1, 1));
    }
}
