//! The network background component: surface lifecycle, field ownership and
//! the per-frame tick.

use bevy::log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::field::ParticleField;
use super::network_config::NetworkConfig;
use super::renderer;
use crate::render::DrawSurface;
use crate::resources::{FrameStats, SurfaceSize};

/// Where a background is in its mount lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Lifecycle {
    /// No drawing surface yet. Resizes still reseed the field.
    #[default]
    Unattached,
    /// Bound to a drawing surface.
    Attached,
    /// Resize subscription dropped and frames cancelled. Terminal.
    TornDown,
}

/// Handle of a requested animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequest(u64);

/// Result of one [`NetworkBackground::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The frame was updated and painted.
    Painted(FrameStats),
    /// No surface to draw on; nothing moved. The next frame is still
    /// requested.
    Skipped,
    /// No frame was pending (never mounted, or torn down).
    Cancelled,
}

/// Decorative particle network bound to one drawing surface.
///
/// Owns the surface dimensions, the particle field and the pending frame
/// request. All work happens on the caller's thread; hosts call
/// [`tick`](Self::tick) once per animation frame and
/// [`resize`](Self::resize) on every viewport change.
pub struct NetworkBackground<S> {
    config: NetworkConfig,
    surface: Option<S>,
    size: SurfaceSize,
    field: ParticleField,
    lifecycle: Lifecycle,
    pending_frame: Option<FrameRequest>,
    next_request: u64,
    reseeds: u64,
    last_frame: Option<FrameStats>,
    rng: StdRng,
}

impl<S: DrawSurface> NetworkBackground<S> {
    pub fn new(config: NetworkConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic background for reproducible runs.
    pub fn with_seed(config: NetworkConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: NetworkConfig, rng: StdRng) -> Self {
        Self {
            config,
            surface: None,
            size: SurfaceSize::default(),
            field: ParticleField::empty(),
            lifecycle: Lifecycle::Unattached,
            pending_frame: None,
            next_request: 0,
            reseeds: 0,
            last_frame: None,
            rng,
        }
    }

    /// Attach the surface if there is one, size everything to the viewport
    /// and request the first frame.
    pub fn mount(&mut self, surface: Option<S>, viewport: SurfaceSize) {
        if self.lifecycle == Lifecycle::TornDown {
            return;
        }
        self.attach(surface);
        self.resize(viewport);
        self.request_frame();
        info!(
            "Particle network mounted at {}x{} with {} particles",
            self.size.width,
            self.size.height,
            self.field.len()
        );
    }

    /// Bind a drawing surface. `None` means it does not exist yet and is
    /// not an error.
    pub fn attach(&mut self, surface: Option<S>) {
        if self.lifecycle != Lifecycle::Unattached {
            return;
        }
        let Some(mut surface) = surface else {
            debug!("No drawing surface available yet; staying unattached");
            return;
        };
        if !self.size.is_empty() {
            surface.set_size(self.size);
        }
        self.surface = Some(surface);
        self.lifecycle = Lifecycle::Attached;
    }

    /// Match the surface to the viewport and reseed the field for it.
    pub fn resize(&mut self, viewport: SurfaceSize) {
        if self.lifecycle == Lifecycle::TornDown {
            return;
        }
        self.size = viewport;
        if let Some(surface) = self.surface.as_mut() {
            surface.set_size(viewport);
        }
        self.reseed();
    }

    fn reseed(&mut self) {
        self.field = ParticleField::seed(self.size, &self.config, &mut self.rng);
        self.reseeds += 1;
        debug!(
            "Reseeded {} particles for {}x{}",
            self.field.len(),
            self.size.width,
            self.size.height
        );
    }

    /// Run one frame: move, bounce, paint, then request the next frame.
    pub fn tick(&mut self) -> TickOutcome {
        if self.lifecycle == Lifecycle::TornDown || self.pending_frame.take().is_none() {
            return TickOutcome::Cancelled;
        }

        let outcome = match self.surface.as_mut() {
            Some(surface) => {
                let stats =
                    renderer::paint_frame(surface, &mut self.field, self.size, &self.config);
                self.last_frame = Some(stats);
                TickOutcome::Painted(stats)
            }
            None => TickOutcome::Skipped,
        };

        self.request_frame();
        outcome
    }

    /// Drop the resize subscription and cancel the pending frame. Safe to
    /// call any number of times, mounted or not.
    pub fn teardown(&mut self) {
        if self.lifecycle == Lifecycle::TornDown {
            return;
        }
        self.pending_frame = None;
        self.lifecycle = Lifecycle::TornDown;
        self.surface = None;
        self.field = ParticleField::empty();
        info!("Particle network torn down after {} reseeds", self.reseeds);
    }

    fn request_frame(&mut self) {
        self.pending_frame = Some(FrameRequest(self.next_request));
        self.next_request += 1;
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_torn_down(&self) -> bool {
        self.lifecycle == Lifecycle::TornDown
    }

    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.pending_frame
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Total reseeds since construction.
    pub fn reseeds(&self) -> u64 {
        self.reseeds
    }

    pub fn last_frame(&self) -> Option<FrameStats> {
        self.last_frame
    }
}
