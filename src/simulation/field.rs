//! The particle field and its seeding.

use rand::Rng;

use super::network_config::NetworkConfig;
use crate::resources::{Particle, SurfaceSize};

/// The full set of particles currently on screen.
///
/// A field is never patched after a resize: [`ParticleField::seed`] builds a
/// new one and the old one is dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// An empty field, valid for degenerate surfaces.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a field from existing particles.
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    /// Seed a fresh field sized to the surface area.
    ///
    /// Positions are uniform in `[0, width) × [0, height)`; each velocity
    /// axis and the radius are sampled independently.
    pub fn seed<R: Rng>(size: SurfaceSize, config: &NetworkConfig, rng: &mut R) -> Self {
        let count = config.particle_count(size.area());
        let (width, height) = (size.width as f32, size.height as f32);
        let (min_radius, max_radius) = config.radius_range;
        let speed = config.max_speed;

        let particles = (0..count)
            .map(|_| {
                let x = rng.gen_range(0.0..width);
                let y = rng.gen_range(0.0..height);
                let vx = rng.gen_range(-speed..=speed);
                let vy = rng.gen_range(-speed..=speed);
                let radius = rng.gen_range(min_radius..=max_radius);
                Particle::new([x, y], [vx, vy], radius)
            })
            .collect();

        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn seed_count_follows_area() {
        let config = NetworkConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for (w, h) in [(800, 600), (400, 300), (1920, 1080), (120, 100), (119, 100), (1, 1)] {
            let field = ParticleField::seed(SurfaceSize::new(w, h), &config, &mut rng);
            assert_eq!(field.len(), (w as u64 * h as u64 / 12_000) as usize, "{w}x{h}");
        }
    }

    #[test]
    fn seeded_particles_respect_ranges() {
        let config = NetworkConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let size = SurfaceSize::new(1280, 720);
        let field = ParticleField::seed(size, &config, &mut rng);
        assert_eq!(field.len(), 76);

        for p in field.particles() {
            assert!(p.pos[0] >= 0.0 && p.pos[0] < 1280.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] < 720.0);
            assert!(p.vel[0].abs() <= 0.2 && p.vel[1].abs() <= 0.2);
            assert!((0.5..=2.0).contains(&p.radius));
        }
    }

    #[test]
    fn zero_area_surface_is_an_empty_field() {
        let config = NetworkConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let field = ParticleField::seed(SurfaceSize::new(0, 0), &config, &mut rng);
        assert!(field.is_empty());
        let field = ParticleField::seed(SurfaceSize::new(0, 5000), &config, &mut rng);
        assert!(field.is_empty());
    }
}
