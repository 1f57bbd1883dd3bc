//! Host-agnostic frame loop.
//!
//! Bevy drives the background through its own schedules (see `systems`).
//! Any other host implements [`FrameHost`] and hands control to [`drive`],
//! which keeps ticking until the background is torn down.

use std::thread;
use std::time::{Duration, Instant};

use super::background::{NetworkBackground, TickOutcome};
use crate::render::DrawSurface;
use crate::resources::{FrameStats, SurfaceSize};

/// Something the host wants the background to react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEvent {
    /// A paint opportunity.
    Frame,
    /// The viewport changed size.
    Resized(SurfaceSize),
    /// The host is going away.
    Closed,
}

/// Source of frames and viewport events.
pub trait FrameHost {
    /// Wait for the next event. Hosts yield here instead of busy-waiting.
    fn next_event(&mut self) -> HostEvent;
}

/// Totals collected over one [`drive`] run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriveSummary {
    pub painted: u64,
    pub skipped: u64,
    pub resizes: u64,
    pub last_frame: Option<FrameStats>,
}

/// Pump `host` into `background` until it is torn down.
///
/// Teardown happens on `Closed`, and always before returning.
pub fn drive<S, H>(background: &mut NetworkBackground<S>, host: &mut H) -> DriveSummary
where
    S: DrawSurface,
    H: FrameHost + ?Sized,
{
    let mut summary = DriveSummary::default();

    while !background.is_torn_down() {
        match host.next_event() {
            HostEvent::Frame => match background.tick() {
                TickOutcome::Painted(stats) => {
                    summary.painted += 1;
                    summary.last_frame = Some(stats);
                }
                TickOutcome::Skipped => summary.skipped += 1,
                TickOutcome::Cancelled => break,
            },
            HostEvent::Resized(size) => {
                background.resize(size);
                summary.resizes += 1;
            }
            HostEvent::Closed => background.teardown(),
        }
    }

    background.teardown();
    summary
}

/// Host that offers a frame at a fixed interval, like a display's vsync,
/// and closes after a set number of frames.
#[derive(Debug)]
pub struct PacedHost {
    interval: Duration,
    remaining: Option<u64>,
    next_deadline: Option<Instant>,
}

impl PacedHost {
    /// Display refresh interval of a 60 Hz monitor.
    pub const SIXTY_HZ: Duration = Duration::from_micros(16_667);

    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            remaining: None,
            next_deadline: None,
        }
    }

    /// Close after `frames` frames.
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }
}

impl FrameHost for PacedHost {
    fn next_event(&mut self) -> HostEvent {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return HostEvent::Closed;
            }
            *remaining -= 1;
        }

        let now = Instant::now();
        let deadline = self.next_deadline.unwrap_or(now);
        if deadline > now {
            thread::sleep(deadline - now);
        }
        // skip missed deadlines rather than bursting to catch up
        self.next_deadline = Some(deadline.max(now) + self.interval);
        HostEvent::Frame
    }
}
