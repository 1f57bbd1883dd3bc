//! Bevy systems wiring the background to the primary window.
//!
//! Host mapping:
//! 1. Startup mounts the background at the window's size
//! 2. `WindowResized` is the resize subscription
//! 3. `Update` is the frame scheduler, one tick per app update
//! 4. `AppExit` tears the background down

use bevy::{
    prelude::*,
    window::{PrimaryWindow, WindowResized},
};

use super::background::{NetworkBackground, TickOutcome};
use super::network_config::NetworkConfig;
use crate::render::PixelCanvas;
use crate::resources::SurfaceSize;

/// The mounted background, painting into a CPU canvas.
#[derive(Resource)]
pub struct NetworkLayer(pub NetworkBackground<PixelCanvas>);

/// Logical size of a window, in whole pixels.
pub fn viewport_size(window: &Window) -> SurfaceSize {
    SurfaceSize::new(
        window.width().max(0.0).round() as u32,
        window.height().max(0.0).round() as u32,
    )
}

/// Mount the background. A missing window leaves it unattached until the
/// first resize brings one.
pub fn mount_network(
    mut commands: Commands,
    config: Res<NetworkConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let viewport = windows.get_single().ok().map(viewport_size);
    let mut background = NetworkBackground::new(config.clone());
    background.mount(viewport.map(PixelCanvas::new), viewport.unwrap_or_default());
    commands.insert_resource(NetworkLayer(background));
}

/// Forward primary-window resizes, reseeding once per event.
pub fn handle_resize(
    mut resized: EventReader<WindowResized>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut layer: ResMut<NetworkLayer>,
) {
    for event in resized.read() {
        let Ok(window) = windows.get(event.window) else {
            continue;
        };
        let size = viewport_size(window);
        let background = &mut layer.0;
        if background.surface().is_none() {
            background.attach(Some(PixelCanvas::new(size)));
        }
        background.resize(size);
    }
}

/// Run one tick of the background per frame.
pub fn tick_network(mut layer: ResMut<NetworkLayer>) {
    if let TickOutcome::Skipped = layer.0.tick() {
        trace!("Particle network tick skipped: no surface");
    }
}

/// Tear down when the app is exiting.
pub fn teardown_on_exit(mut exit: EventReader<AppExit>, mut layer: ResMut<NetworkLayer>) {
    if exit.read().next().is_some() {
        layer.0.teardown();
    }
}
