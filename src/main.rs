//! Particle Network Background - Main Entry
//!
//! Opens a window and runs the ambient particle network behind it.

use bevy::prelude::*;
use particle_network::render::ParticleRenderPlugin;
use particle_network::simulation::{NetworkLayer, NetworkPlugin};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Particle Network".into(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb_u8(9, 9, 11)))
        .add_plugins(NetworkPlugin)
        .add_plugins(ParticleRenderPlugin)
        .add_systems(Startup, setup_camera)
        .add_systems(Update, log_frame)
        .run();
}

/// Set up the 2D main camera
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
    commands.insert_resource(FrameCounter(0));
}

/// Frame counter for logging
#[derive(Resource)]
struct FrameCounter(u32);

/// Log network stats every N frames
fn log_frame(mut counter: ResMut<FrameCounter>, layer: Option<Res<NetworkLayer>>) {
    counter.0 += 1;
    if counter.0 % 300 != 0 {
        return;
    }
    if let Some(stats) = layer.and_then(|layer| layer.0.last_frame()) {
        info!(
            "Frame {}: {} particles, {} edges",
            counter.0, stats.particles, stats.edges
        );
    }
}
