//! Particle rendering module - drawing surfaces and the on-screen sprite.
//!
//! The background paints into a [`PixelCanvas`] on the CPU. Each frame the
//! canvas bytes are copied into a bevy [`Image`] shown by a sprite that
//! spans the window behind everything else and ignores picking.

mod canvas;
mod surface;

use bevy::{
    picking::PickingBehavior,
    prelude::*,
    render::{
        render_asset::RenderAssetUsages,
        render_resource::{Extent3d, TextureDimension, TextureFormat},
    },
};

pub use canvas::{PixelCanvas, Rgba8};
pub use surface::{DisplayList, DrawCommand, DrawSurface};

use crate::resources::SurfaceSize;
use crate::simulation::NetworkLayer;

/// Depth of the background sprite; anything drawn at z >= 0 covers it.
pub const BACKGROUND_Z: f32 = -100.0;

/// Plugin for showing the network canvas as a full-window sprite.
pub struct ParticleRenderPlugin;

impl Plugin for ParticleRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_background_sprite)
            .add_systems(PostUpdate, upload_canvas);
    }
}

/// Marker for the sprite displaying the network.
#[derive(Component)]
pub struct BackgroundSprite;

/// Handle of the image the canvas is uploaded into.
#[derive(Resource)]
pub struct BackgroundImage(pub Handle<Image>);

fn extent(size: SurfaceSize) -> Extent3d {
    Extent3d {
        width: size.width,
        height: size.height,
        depth_or_array_layers: 1,
    }
}

/// Spawn the sprite with a placeholder image; the first upload sizes it.
pub fn spawn_background_sprite(mut commands: Commands, mut images: ResMut<Assets<Image>>) {
    let image = Image::new_fill(
        extent(SurfaceSize::new(1, 1)),
        TextureDimension::D2,
        &[0, 0, 0, 0],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    let handle = images.add(image);

    commands.spawn((
        Sprite::from_image(handle.clone()),
        Transform::from_xyz(0.0, 0.0, BACKGROUND_Z),
        PickingBehavior::IGNORE,
        BackgroundSprite,
    ));
    commands.insert_resource(BackgroundImage(handle));
}

/// Copy the painted canvas into the sprite's image.
pub fn upload_canvas(
    layer: Option<Res<NetworkLayer>>,
    target: Option<Res<BackgroundImage>>,
    mut images: ResMut<Assets<Image>>,
    mut sprites: Query<&mut Sprite, With<BackgroundSprite>>,
) {
    let (Some(layer), Some(target)) = (layer, target) else {
        return;
    };
    let Some(canvas) = layer.0.surface() else {
        return;
    };
    let size = canvas.size();
    if size.is_empty() {
        return;
    }
    let Some(image) = images.get_mut(&target.0) else {
        return;
    };

    if image.width() != size.width || image.height() != size.height {
        debug!("Resizing background image to {}x{}", size.width, size.height);
        image.resize(extent(size));
    }
    if let Err(err) = canvas.write_rgba(&mut image.data) {
        warn!("Skipping background upload: {}", err);
        return;
    }

    let display = Some(Vec2::new(size.width as f32, size.height as f32));
    for mut sprite in &mut sprites {
        if sprite.custom_size != display {
            sprite.custom_size = display;
        }
    }
}
