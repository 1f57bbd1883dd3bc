//! Tunable parameters of the particle network.
//!
//! All visual and kinematic constants live here instead of being scattered
//! across the seeding and drawing code. The canonical values are produced by
//! [`NetworkConfig::default`]; an app may insert its own `NetworkConfig`
//! resource before adding the plugin to override them.

use bevy::prelude::*;

/// How proximity edges are found each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeStrategy {
    /// Compare every unordered pair. O(n²), fine for area-bounded counts.
    #[default]
    AllPairs,
    /// Bucket particles into cells one threshold wide and only compare
    /// neighbouring cells.
    Grid,
}

/// Canonical configuration of the background network.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct NetworkConfig {
    /// Surface pixels per particle: `count = floor(area / density_area)`
    pub density_area: u64,
    /// Each velocity axis is sampled from `[-max_speed, max_speed]`
    pub max_speed: f32,
    /// Radius range `[min, max]`
    pub radius_range: (f32, f32),
    /// Pairs closer than this are connected by an edge
    pub proximity_threshold: f32,
    /// Edge alpha at distance zero
    pub max_edge_opacity: f32,
    /// Stroke width of edges in pixels
    pub edge_width: f32,
    /// Fill of every particle disk
    pub particle_color: Srgba,
    /// Edge stroke color; its alpha is replaced per edge
    pub edge_color: Srgba,
    pub edge_strategy: EdgeStrategy,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            density_area: 12_000,
            max_speed: 0.2,          // slow ambient drift
            radius_range: (0.5, 2.0),
            proximity_threshold: 120.0,
            max_edge_opacity: 0.15,
            edge_width: 0.5,
            particle_color: Srgba::rgb_u8(16, 185, 129).with_alpha(0.5),
            edge_color: Srgba::rgb_u8(16, 185, 129),
            edge_strategy: EdgeStrategy::AllPairs,
        }
    }
}

impl NetworkConfig {
    /// Number of particles a surface of `area` pixels holds.
    pub fn particle_count(&self, area: u64) -> usize {
        if self.density_area == 0 {
            return 0;
        }
        (area / self.density_area) as usize
    }

    /// Edge alpha for a pair at `distance`, or `None` when the pair is not
    /// strictly inside the threshold.
    ///
    /// Fades linearly from `max_edge_opacity` at zero to nothing at the
    /// threshold, clipped to `[0, max_edge_opacity]`.
    pub fn edge_opacity(&self, distance: f32) -> Option<f32> {
        if !(distance < self.proximity_threshold) {
            return None;
        }
        let fade = 1.0 - distance / self.proximity_threshold;
        Some((self.max_edge_opacity * fade).clamp(0.0, self.max_edge_opacity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_count_floors() {
        let config = NetworkConfig::default();
        assert_eq!(config.particle_count(800 * 600), 40);
        assert_eq!(config.particle_count(400 * 300), 10);
        assert_eq!(config.particle_count(11_999), 0);
        assert_eq!(config.particle_count(12_000), 1);
        assert_eq!(config.particle_count(23_999), 1);
    }

    #[test]
    fn zero_density_area_yields_no_particles() {
        let config = NetworkConfig {
            density_area: 0,
            ..default()
        };
        assert_eq!(config.particle_count(1_000_000), 0);
    }

    #[test]
    fn edge_opacity_fades_linearly() {
        let config = NetworkConfig::default();
        assert_eq!(config.edge_opacity(0.0), Some(0.15));
        let half = config.edge_opacity(60.0).unwrap();
        assert!((half - 0.075).abs() < 1e-6);
        assert_eq!(config.edge_opacity(120.0), None);
        assert_eq!(config.edge_opacity(500.0), None);
        assert_eq!(config.edge_opacity(f32::NAN), None);
    }

    #[test]
    fn default_colors_match_theme() {
        let config = NetworkConfig::default();
        assert_eq!(config.particle_color.alpha, 0.5);
        assert!((config.edge_color.green - 185.0 / 255.0).abs() < 1e-6);
    }
}
