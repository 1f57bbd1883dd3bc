//! One frame of the network: move, bounce, paint.
//!
//! Frame order:
//! 1. Clear the surface
//! 2. Per particle: advance, resolve walls, draw its disk
//! 3. Stroke every proximity edge between the updated positions

use super::field::ParticleField;
use super::network_config::NetworkConfig;
use super::spatial;
use crate::render::DrawSurface;
use crate::resources::{with_alpha, FrameStats, SurfaceSize};

/// Run the update and paint passes of one tick against `surface`.
///
/// `size` is the surface size the field was seeded for and bounds the
/// particles.
pub fn paint_frame<S: DrawSurface + ?Sized>(
    surface: &mut S,
    field: &mut ParticleField,
    size: SurfaceSize,
    config: &NetworkConfig,
) -> FrameStats {
    surface.clear();

    for particle in field.particles_mut() {
        particle.advance();
        particle.resolve_walls(size);
        surface.fill_disk(particle.pos, particle.radius, config.particle_color);
    }

    let particles = field.particles();
    let mut edges = 0;
    if particles.len() > 1 {
        spatial::for_each_edge(particles, size, config, |edge| {
            let color = with_alpha(config.edge_color, edge.opacity);
            let (from, to) = (particles[edge.a].pos, particles[edge.b].pos);
            surface.stroke_line(from, to, config.edge_width, color);
            edges += 1;
        });
    }

    FrameStats {
        particles: particles.len(),
        edges,
    }
}
