//! Simulation module - particle field, per-frame update and the bevy host.

mod background;
mod driver;
mod field;
mod network_config;
mod renderer;
mod spatial;
mod systems;

use bevy::prelude::*;

pub use background::{FrameRequest, Lifecycle, NetworkBackground, TickOutcome};
pub use driver::{drive, DriveSummary, FrameHost, HostEvent, PacedHost};
pub use field::ParticleField;
pub use network_config::{EdgeStrategy, NetworkConfig};
pub use renderer::paint_frame;
pub use spatial::{collect_edges, for_each_edge, SpatialGrid};
pub use systems::{viewport_size, NetworkLayer};

/// Plugin that mounts the particle network on the primary window and ticks
/// it once per frame.
pub struct NetworkPlugin;

/// `Update` set holding resize handling and the tick, for apps that need
/// to order their own systems around the frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetworkTickSet;

impl Plugin for NetworkPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NetworkConfig>()
            .add_systems(Startup, systems::mount_network)
            .add_systems(
                Update,
                (systems::handle_resize, systems::tick_network)
                    .chain()
                    .in_set(NetworkTickSet),
            )
            .add_systems(Last, systems::teardown_on_exit);
    }
}
