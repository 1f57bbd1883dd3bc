//! Plain data shared by the simulation and the drawing surfaces.

use bevy::color::Srgba;

/// A single drifting point of the network.
///
/// Velocity is expressed in pixels per tick. Only its sign ever changes,
/// when the particle crosses a wall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Position (x, y) in surface pixels, origin at the top-left corner
    pub pos: [f32; 2],
    /// Velocity (vx, vy)
    pub vel: [f32; 2],
    /// Disk radius, fixed for the particle's lifetime
    pub radius: f32,
}

impl Particle {
    pub fn new(pos: [f32; 2], vel: [f32; 2], radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Move by one tick worth of velocity.
    pub fn advance(&mut self) {
        self.pos[0] += self.vel[0];
        self.pos[1] += self.vel[1];
    }

    /// Flip the velocity on any axis whose position left `[0, extent]`.
    ///
    /// The position is left where it is, so a particle can sit outside the
    /// surface for one frame before the flipped velocity brings it back.
    pub fn resolve_walls(&mut self, size: SurfaceSize) {
        let (width, height) = (size.width as f32, size.height as f32);
        if self.pos[0] < 0.0 || self.pos[0] > width {
            self.vel[0] = -self.vel[0];
        }
        if self.pos[1] < 0.0 || self.pos[1] > height {
            self.vel[1] = -self.vel[1];
        }
    }

    /// Euclidean distance to another particle.
    pub fn distance(&self, other: &Particle) -> f32 {
        let dx = self.pos[0] - other.pos[0];
        let dy = self.pos[1] - other.pos[1];
        (dx * dx + dy * dy).sqrt()
    }
}

/// Pixel dimensions of the drawing surface, mirroring the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Area in pixels. Computed in u64 so large viewports cannot overflow.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }
}

/// One proximity edge between particles `a` and `b` (`a < b`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
    /// Stroke alpha, already faded by distance
    pub opacity: f32,
}

/// Per-frame counters reported by a painted tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub particles: usize,
    pub edges: usize,
}

/// `color` with its alpha replaced.
pub fn with_alpha(color: Srgba, alpha: f32) -> Srgba {
    Srgba { alpha, ..color }
}
